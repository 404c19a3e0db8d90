pub mod account;
pub mod postgres_service;
pub mod registration;
pub mod token_denylist;
