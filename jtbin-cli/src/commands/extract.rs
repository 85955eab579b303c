use std::io::{self, Write};
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use jtbin_mra::settings::{load_settings, resolve_root, resolve_value};
use jtbin_mra::{DEFAULT_BOARD, ExtractOptions, ExtractSummary, Settings};

use crate::cli_types::ExtractArgs;
use crate::error::CliError;

/// Build extraction options from CLI arguments and settings.
///
/// The board and region fall back to `settings.toml`, then to the defaults.
pub(crate) fn build_options(
    args: ExtractArgs,
    settings: &Settings,
) -> Result<ExtractOptions, CliError> {
    let board = resolve_value(
        args.board,
        settings.extract.board.clone(),
        DEFAULT_BOARD.to_string(),
    );
    if board.value.trim().is_empty() {
        return Err(CliError::config(format!(
            "board identifier is empty (from {})",
            board.source
        )));
    }
    let region = resolve_value(args.region, settings.extract.region, 0);
    log::debug!(
        "board {} ({}), region {} ({})",
        board.value,
        board.source,
        region.value,
        region.source
    );

    Ok(ExtractOptions {
        descriptor_dir: args.mra_dir,
        extension: args.extension,
        board: board.value,
        region: region.value,
    })
}

/// Directory to walk. Relative to the root once the process has changed
/// into it; joined onto the root when it could not.
pub(crate) fn walk_dir(root: &Path, descriptor_dir: &Path, entered_root: bool) -> PathBuf {
    if entered_root {
        descriptor_dir.to_path_buf()
    } else {
        root.join(descriptor_dir)
    }
}

/// Walk `<root>/<mra-dir>` and print one line per descriptor of the board.
pub(crate) fn run_extract(
    root: Option<PathBuf>,
    args: ExtractArgs,
) -> Result<ExtractSummary, CliError> {
    let settings = load_settings().unwrap_or_else(|e| {
        log::warn!("{e}");
        Settings::default()
    });
    let root = resolve_root(root, &settings);
    let mut options = build_options(args, &settings)?;

    log::debug!("JTBIN root {} ({})", root.value.display(), root.source);
    let entered = match std::env::set_current_dir(&root.value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Cannot enter {}: {e}", root.value.display());
            false
        }
    };
    options.descriptor_dir = walk_dir(&root.value, &options.descriptor_dir, entered);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = jtbin_mra::run_extract(&options, &mut out)?;
    out.flush()?;

    log_summary(&summary);
    Ok(summary)
}

fn log_summary(summary: &ExtractSummary) {
    let errors = format!("{} errors", summary.errors);
    log::info!(
        "Scanned {} descriptors: {} matched, {} rows, {} skipped, {}",
        summary.scanned,
        summary.matched,
        summary.rows.if_supports_color(Stderr, |t| t.green()),
        summary.skipped.if_supports_color(Stderr, |t| t.yellow()),
        if summary.errors > 0 {
            format!("{}", errors.if_supports_color(Stderr, |t| t.red()))
        } else {
            errors
        },
    );
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
