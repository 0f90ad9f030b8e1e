pub mod charts;
pub mod expenses;
pub mod predefined;
pub mod summary;
