#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # mindmap-core
//!
//! Error and result types shared by every mindmap crate.
//!
//! Graph contract violations (duplicate ids, dangling edge endpoints, unknown
//! patch fields) are reported as typed [`Error`] values rather than being
//! silently accepted into the store.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::{Result, ResultExt};
