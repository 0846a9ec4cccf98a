#![forbid(unsafe_code)]

pub mod json;
mod mapping;
pub mod repository;

pub use json::JsonBank;
pub use repository::{BankError, InMemoryBank, QuestionBank, SubjectOverview};
