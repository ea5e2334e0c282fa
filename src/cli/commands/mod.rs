pub mod comment;
pub mod customer;
pub mod login;
pub mod system;
