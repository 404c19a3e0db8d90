pub mod account;
pub mod error;
pub mod registration;
pub mod response;
pub mod token;
