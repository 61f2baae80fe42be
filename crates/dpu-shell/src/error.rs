//! Error taxonomy for the shell's command handlers (§7).
//!
//! Every variant here is recoverable: the caller prints it and resumes the
//! prompt. Nothing in this crate panics on operator input.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid hex value: {0}")]
    BadHex(String),

    #[error("offset {offset:#06x} is outside memory (size {size:#06x})")]
    OutOfRange { offset: u32, size: usize },

    #[error("empty input")]
    EmptyInput,
}
