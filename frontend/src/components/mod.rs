pub mod charts;
pub mod forms;
pub mod header;
pub mod summary;
pub mod tables;
