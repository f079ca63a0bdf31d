pub mod app;
pub mod report;
pub mod version;
