use log::LevelFilter;

/// Initialize logging for crossfill.
///
/// Defaults to `Info`, or `Debug` when `debug_enabled` is set; an explicit
/// `RUST_LOG` specification overrides both.
pub fn init_logger(debug_enabled: bool) {
    use std::env;

    let level = if debug_enabled { LevelFilter::Debug } else { LevelFilter::Info };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
    log::info!("Logger initialized at {level:?} level");
}
