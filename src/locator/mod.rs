pub mod candidates;
pub mod path_index;
