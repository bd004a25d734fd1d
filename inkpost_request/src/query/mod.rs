//! # Query
//!
//! Turning raw search requests into normalized query plans and shaping the
//! results into pages.

pub mod error;
pub mod page;
pub mod search;
