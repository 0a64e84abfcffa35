pub mod parser;
pub mod tree_model;
