// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

/// Errors surfaced by the ledger, the task list and their storage.
///
/// Every variant renders as a single human-readable message; none of them
/// leave a store partially mutated.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad user input: non-numeric or non-positive amount, malformed date,
    /// empty required text, unknown enum value.
    #[error("{0}")]
    Validation(String),

    /// A data file could not be read or written, or held malformed JSON.
    #[error("{action} {}: {reason}", path.display())]
    Persistence {
        action: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// An operation referenced a record that does not exist.
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },

    /// An imported document does not have the expected top-level shape.
    #[error("Invalid import file: {0}")]
    ImportFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn persistence(
        action: &'static str,
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Error::Persistence {
            action,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
