pub mod date_time;
pub mod id;
pub mod macros;
