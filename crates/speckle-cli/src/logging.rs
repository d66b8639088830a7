use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbosity: u8) {
    // 0 = warnings only
    // 1 (-v) = info for speckle crates
    // 2+ (-vv) = debug for everything
    let filter = match verbosity {
        0 => "warn",
        1 => "warn,speckle_application=info,speckle_interaction=info,speckle=info",
        _ => "debug",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}
