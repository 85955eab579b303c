use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use jtbin_mra::DEFAULT_BOARD;
use jtbin_mra::settings::{load_settings, resolve_root, resolve_value, settings_path};

use crate::error::CliError;

/// Show the resolved settings and where each value came from.
pub(crate) fn run_config_show(root: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "jtbin settings".if_supports_color(Stderr, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(exists)".if_supports_color(Stderr, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(not found)".if_supports_color(Stderr, |t| t.dimmed()),
        );
    }
    log::info!("");

    let settings = load_settings()?;
    let root = resolve_root(root, &settings);
    let board = resolve_value(
        None,
        settings.extract.board.clone(),
        DEFAULT_BOARD.to_string(),
    );
    let region = resolve_value(None, settings.extract.region, 0);

    log::info!(
        "  root:   {} {}",
        root.value.display(),
        format!("({})", root.source).if_supports_color(Stderr, |t| t.dimmed()),
    );
    log::info!(
        "  board:  {} {}",
        board.value,
        format!("({})", board.source).if_supports_color(Stderr, |t| t.dimmed()),
    );
    log::info!(
        "  region: {} {}",
        region.value,
        format!("({})", region.source).if_supports_color(Stderr, |t| t.dimmed()),
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
