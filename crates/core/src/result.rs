//! Result alias and logging combinators for graph mutations.

use crate::error::Error;

/// The standard Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Discard a refused mutation after logging it.
///
/// Event handlers (key presses, toolbar clicks) have nobody to return an
/// error to; they log and carry on.
pub trait ResultExt<T> {
    /// `Some(value)` on success. On failure logs `action` with the error and
    /// whether it was a graph contract violation, then returns `None`.
    fn or_log(self, action: &str) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn or_log(self, action: &str) -> Option<T> {
        self.inspect_err(|e| {
            if e.is_contract_violation() {
                tracing::warn!(action, error = %e, "Graph contract violation");
            } else {
                tracing::error!(action, error = %e, "Graph mutation failed");
            }
        })
        .ok()
    }
}
