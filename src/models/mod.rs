pub mod category;
pub mod envelope;
pub mod records;
