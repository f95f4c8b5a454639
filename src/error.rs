use crate::table::Pass;
use std::path::PathBuf;
use thiserror::Error;

/// A substitution table that cannot be trusted to run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("pair #{index} has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("pattern {pattern:?} appears twice (pairs #{first} and #{second})")]
    DuplicatePattern {
        pattern: String,
        first: usize,
        second: usize,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no config file found (tried {})", display_paths(.tried))]
    ConfigNotFound { tried: Vec<PathBuf> },

    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {} table: {source}", .pass.as_str())]
    Table {
        pass: Pass,
        #[source]
        source: TableError,
    },

    #[error("failed to read {path:?}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to write {path:?}: {source}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{p:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
