//! Terminal presentation layer.

pub mod list_view;
