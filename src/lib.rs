// Lib file to expose modules for testing
pub mod logger_import;
pub mod opacity;
pub mod pr_comment;
pub mod report;
pub mod router;
