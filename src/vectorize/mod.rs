// Vectorization — TF-IDF vector space construction and cosine similarity.

pub mod similarity;
pub mod tfidf;
pub mod tokenize;
pub mod vector;

pub use tfidf::{VectorSpace, Vectorizer};
pub use vector::SparseVector;
