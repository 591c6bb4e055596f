pub mod exporter;
pub mod records;
pub mod source;
pub mod writer;
