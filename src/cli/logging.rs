use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Change the log level after initialization
pub fn set_log_level(level: LevelFilter) {
    log::set_max_level(level);
}

/// Initialize logging with the level chosen on the command line.
///
/// The logger itself accepts everything down to debug so the level can
/// still be raised once the configuration has been read.
pub fn init_logging(debug: bool, quiet: bool) -> LevelFilter {
    let log_level = if quiet {
        LevelFilter::Error
    } else if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if SimpleLogger::new().with_level(LevelFilter::Debug).init().is_ok() {
        set_log_level(log_level);
    }

    log_level
}

/// Configure backtrace if trace is enabled
pub fn configure_backtrace(trace: bool) {
    if trace {
        std::env::set_var("RUST_BACKTRACE", "1");
    }
}
