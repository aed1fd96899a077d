use env_logger::{Builder, Env, Target};

/// Logs go to stderr so stdout only carries sweep results.
/// `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default))
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
