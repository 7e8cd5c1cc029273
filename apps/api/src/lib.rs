//! Member Search API Library
//!
//! Searches members joined with their team through optional, composable
//! filter fragments, unpaged or paged with count elision on the last page.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
