pub mod catalog;
pub mod report_model;
pub mod text;
