use env_logger::Env;

/// Initialize logging using env_logger.
/// Filtering comes from the RUST_LOG environment variable and defaults to `warn`,
/// e.g. `RUST_LOG=ssh_menu_core=debug ssh-menu list`
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
}
