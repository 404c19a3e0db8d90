pub mod my;
pub mod summary;
