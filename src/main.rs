use std::env;
use std::io;

use log::Log;

use pattern_logger::{stderr_handler, HandlerConfig, PatternLogger};

/// Logs a few lines to stderr through the `log` facade.
///
/// Usage: `pattern_logger [FORMAT] [--json]`
fn main() -> io::Result<()> {
    let mut config = HandlerConfig::default();
    for arg in env::args().skip(1) {
        if arg == "--json" {
            config.json = true;
        } else {
            config.format = arg;
        }
    }

    let logger: &'static PatternLogger<_> = Box::leak(Box::new(PatternLogger::new(stderr_handler(&config))));
    log::set_logger(logger).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    log::set_max_level(log::LevelFilter::Trace);

    log::info!("pattern logger demo starting");
    log::warn!("format in use: {}", config.format);
    log::error!("done");
    log::logger().flush();
    Ok(())
}
