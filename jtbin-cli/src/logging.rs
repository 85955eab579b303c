//! Logger setup. All log output goes to stderr; stdout carries table data only.

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

/// Level implied by the `--quiet` / `--verbose` flags.
pub(crate) fn level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
pub(crate) fn init_logging(quiet: bool, verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_filter(quiet, verbose))
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                record.args()
            ),
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                record.args()
            ),
            level => writeln!(
                buf,
                "{}",
                format!("[{level}] {}", record.args()).if_supports_color(Stderr, |t| t.dimmed())
            ),
        });
    builder.init();
}
