pub mod read;
pub mod source;
pub mod table;
pub mod tracing;
