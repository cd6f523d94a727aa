use thiserror::Error;

pub type Result<T> = std::result::Result<T, TravelError>;

#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod commands;
pub mod config;
pub mod corpus;
pub mod embeddings;
pub mod index;
pub mod municipality;
pub mod planner;
pub mod ranker;
pub mod weather;
