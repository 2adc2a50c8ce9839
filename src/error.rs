// Error taxonomy for the recommendation core.
//
// Only two conditions are worth failing a call over: an empty corpus (there
// is nothing to vectorize, the caller must retry once data exists) and an
// interaction kind outside the known taxonomy (malformed collaborator
// input). Everything else — missing dates, stale item references, empty
// candidate pools — degrades to a neutral value instead of erroring,
// because upstream feed content is noisy at normal operating rates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    /// The corpus handed to the vectorizer contained no documents.
    #[error("corpus is empty — nothing to vectorize")]
    EmptyCorpus,

    /// An interaction event carried a kind outside the known taxonomy.
    /// Rejecting one event never aborts the rest of an update batch.
    #[error("unknown interaction kind: {0:?}")]
    UnknownInteractionKind(String),
}
