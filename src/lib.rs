#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # mindmap
//!
//! Mind map editing engine: the editor workflow on top of the graph store,
//! AI topic suggestions, clipboard image paste and user notifications.
//!
//! Everything is in memory. A session starts with a single "Main Topic" and
//! ends with a `{nodes, edges}` JSON export.

pub mod clipboard;
pub mod editor;
pub mod error;
pub mod notify;
pub mod script;

pub use clipboard::ClipboardItem;
pub use editor::{Key, KeyOutcome, MindMapEditor, SuggestionRequest};
pub use error::{Error, Result};
pub use notify::{Notification, NotificationLevel, Notifier, NotificationSubscription};

pub use mindmap_core;
pub use mindmap_graph;
pub use mindmap_suggest;
