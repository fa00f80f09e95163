//! Logger setup: plain messages for info, a coloured tag for problems.

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

/// Map `-v` / `-q` to a level filter.
pub(crate) fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
pub(crate) fn init(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        })
        .init();
}
