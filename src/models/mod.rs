pub mod detail;
pub mod issue;
pub mod project;
pub mod summary;
