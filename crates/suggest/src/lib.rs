#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # mindmap-suggest
//!
//! AI topic suggestions for mind maps via an OpenAI-compatible chat
//! completions endpoint (Together by default).
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mindmap_suggest::{SuggestionClient, SuggestionConfig, strategy};
//!
//! let client = Arc::new(SuggestionClient::with_config(SuggestionConfig::from_env())?);
//! let strategy = strategy::from_config(client);
//! let label = strategy.suggest(store.nodes(), store.edges(), &target).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod strategy;

pub use client::SuggestionClient;
pub use config::{DEFAULT_API_URL, StrategyKind, SuggestionConfig};
pub use error::{Result, SuggestError};
pub use prompt::Prompt;
pub use strategy::{ContextualStrategy, SuggestionStrategy, TopicListStrategy};
