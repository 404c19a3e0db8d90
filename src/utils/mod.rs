pub mod password;
pub mod token;
pub mod validate;
pub mod webutils;
