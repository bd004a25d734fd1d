pub mod error;
pub mod filter;
pub mod ordering;
pub mod query;
pub mod schema;
pub mod sql;
pub mod value;

#[cfg(any(feature = "testing", debug_assertions))]
pub mod testing;
