pub mod capture_loop;
pub mod sink;
pub mod source;
pub mod stop;
