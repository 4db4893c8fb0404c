//! Question catalog, selection and answer checking

pub mod bank;
pub mod loader;
pub mod question;

pub use bank::{QuestionBank, QuestionProvider};
pub use loader::{builtin_catalog, load_catalog, parse_catalog};
pub use question::Question;
