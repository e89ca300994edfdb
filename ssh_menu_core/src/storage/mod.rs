pub mod errors;
pub mod registry;
pub mod server;
pub mod store;
