//! bcd-query - Query MDN browser-compat-data by engine support and baseline status
//!
//! This library projects the nested browser-compat-data document into a
//! simplified feature tree, and prunes that tree with composable predicates:
//! engine support, exact version support, approaching/newly baseline, and
//! free-text title search.

pub mod cli;
pub mod compat_data;
pub mod config;
pub mod csv_output;
pub mod engine;
pub mod feature;
pub mod filter_def;
pub mod json_output;
pub mod predicates;
pub mod projector;
pub mod query_state;
pub mod release;
pub mod text_output;
pub mod tree_filter;
