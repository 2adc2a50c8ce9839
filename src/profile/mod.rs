// User interest profiles — accumulation, decay, and group aggregation.

pub mod group;
pub mod store;

pub use group::aggregate;
pub use store::{ProfileStore, UpdateOutcome};
