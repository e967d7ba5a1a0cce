//! Append-only names ledger kept as a text file in a Git hosting repository.
//!
//! Runs server-side only: the write token is read from the environment or a
//! mounted secret and is never handed to a browser. Use a fine-grained token
//! scoped to the one repository with contents write access.

pub mod client;
pub mod config;
pub mod content;

pub use client::{AppendOutcome, LedgerClient};
pub use config::LedgerConfig;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name cannot contain line breaks")]
    MultilineName,

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{action} returned HTTP {status}")]
    Status {
        action: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Stored file is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Stored file is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
