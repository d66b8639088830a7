pub mod accounts;
pub mod streams;
