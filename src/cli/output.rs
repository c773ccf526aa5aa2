//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, LibraryError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Library(LibraryError::NoData) => format!(
            "{}\nRun `reponest init` to write the starter seed.",
            e
        ),
        _ => e.to_string(),
    }
}
