//! todoview - remote todo list viewer
//!
//! This library provides the list-processing pipeline behind the todoview
//! CLI: the collection is fetched once, then filtered, paged and decorated
//! with favorites entirely in session memory.
//!
//! # Core Concepts
//!
//! - **Data source**: one read of the task collection per view session
//! - **Filter pipeline**: search text, completion and owner predicates
//! - **Paginator**: fixed-size pages with an active page
//! - **Favorites**: insertion-ordered set of task ids independent of filters
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.todoview.toml`
//! - `controller`: Session state and user intents
//! - `error`: Error types and result aliases
//! - `favorites`: Favorite set
//! - `filter`: Query and filter pipeline
//! - `output`: Human and JSON output for commands
//! - `paginate`: Page arithmetic
//! - `source`: HTTP and file data sources
//! - `task`: Task records
//! - `ui`: Terminal list view

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod output;
pub mod paginate;
pub mod source;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
