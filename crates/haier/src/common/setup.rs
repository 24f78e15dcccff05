use std::io::Write;

use env_logger::DEFAULT_FILTER_ENV;
use env_logger::fmt::style::AnsiColor;
use log::LevelFilter;

/// HTTP stack crates that are only interesting when something breaks.
const QUIET_MODULES: [&str; 3] = ["hyper_util", "reqwest", "h2"];

/// Initializes the global logger. `RUST_LOG` overrides the defaults.
pub fn setup_logging(verbose: bool) {
    let mut builder = env_logger::Builder::default();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    for module in QUIET_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }

    let has_debug = std::env::var(DEFAULT_FILTER_ENV)
        .map(|v| v.contains("debug"))
        .unwrap_or(false);

    if verbose || has_debug {
        builder.format_timestamp_millis();
    } else {
        // Shortened format
        // <time> <level> <message>
        builder.format(|buf, record| {
            let level_style = buf.default_level_style(record.level()).bold();
            let time_style = AnsiColor::BrightBlack.on_default();
            writeln!(
                buf,
                "{time_style}{}{time_style:#} {level_style}{}{level_style:#} {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        });
    }

    builder.parse_default_env();
    if let Err(e) = builder.try_init() {
        log::warn!("Logger was already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::setup_logging;

    #[test]
    fn test_setup_logging_twice() {
        setup_logging(false);
        setup_logging(true);
    }
}
