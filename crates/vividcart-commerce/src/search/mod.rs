//! Search module.
//!
//! Contains the query type, the catalog filter and its results.

mod filter;
mod query;
mod results;

pub use filter::filter;
pub use query::SearchQuery;
pub use results::SearchResults;
