pub mod handler;
pub mod store;
