//! Error types for the editor layer.

use thiserror::Error;

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A graph contract violation from the store.
    #[error(transparent)]
    Graph(#[from] mindmap_core::Error),

    /// A suggestion request failed.
    #[error(transparent)]
    Suggest(#[from] mindmap_suggest::SuggestError),

    /// The notification channel has no sender left.
    #[error("notification channel closed")]
    ChannelClosed,

    /// A subscriber fell behind and missed notifications.
    #[error("notification subscriber lagged by {skipped} messages")]
    Lagged { skipped: u64 },

    /// A script or key command could not be parsed.
    #[error("invalid command '{command}': {reason}")]
    InvalidCommand { command: String, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid command error.
    pub fn invalid_command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// True when the store refused a mutation that would break the graph
    /// (duplicate ids, dangling or duplicate edges).
    pub const fn is_contract_violation(&self) -> bool {
        match self {
            Self::Graph(e) => e.is_contract_violation(),
            _ => false,
        }
    }
}
