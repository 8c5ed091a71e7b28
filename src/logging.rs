use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::path::Path;

/// Maps the number of `-v` flags to the log level
fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger
///
/// Logs go to stderr unless `logoutput` names a file, or `-` for stdout. Stdout is where the page
/// is printed, so it is only used when asked for.
pub fn init(verbose: u8, logoutput: Option<&Path>) -> Result<()> {
    let level = level_filter(verbose);
    let to_file = matches!(logoutput, Some(path) if path != Path::new("-"));

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    let dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            if to_file {
                out.finish(format_args!(
                    "[{}][{}] {}",
                    record.target(),
                    record.level(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{}][{}] {}",
                    record.target(),
                    colors.color(record.level()),
                    message
                ))
            }
        })
        .level(level)
        // connection pool chatter
        .level_for("hyper", level.min(LevelFilter::Info))
        .level_for("rustls", level.min(LevelFilter::Info));

    let dispatch = match logoutput {
        Some(path) if path == Path::new("-") => dispatch.chain(std::io::stdout()),
        Some(path) => dispatch.chain(
            fern::log_file(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?,
        ),
        None => dispatch.chain(std::io::stderr()),
    };

    dispatch.apply().context("Failed to setup logging utility")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(level_filter(0), LevelFilter::Warn);
        assert_eq!(level_filter(1), LevelFilter::Info);
        assert_eq!(level_filter(2), LevelFilter::Debug);
        assert_eq!(level_filter(3), LevelFilter::Trace);
        assert_eq!(level_filter(7), LevelFilter::Trace);
    }
}
