pub mod storage;
pub mod utils;

// re‑export ergonomic entry points
pub use storage::errors::ConfigError;
pub use storage::registry::ServerRegistry;
pub use storage::server::Server;
pub use storage::store::{
    default_config_dir, default_servers_path, initialize, load, save, ConfigStore,
};
