pub mod error;
pub mod logger;
pub mod terminal;
pub mod validation;
