use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use jtbin_mra::{Cps2Key, parse_mra_file};

use crate::error::CliError;

/// Decode a CPS2 key given as hex on the command line or stored in a descriptor.
pub(crate) fn run_keys(hex: Vec<String>, mra: Option<PathBuf>, region: i32) -> Result<(), CliError> {
    let key = match mra {
        Some(path) => {
            let file = parse_mra_file(&path)?;
            log::info!(
                "{} [{}] region {}",
                file.setname.if_supports_color(Stderr, |t| t.bold()),
                file.rbf.if_supports_color(Stderr, |t| t.cyan()),
                region,
            );
            Cps2Key::from_mra(&file, region)?
        }
        None => Cps2Key::from_hex(&hex.join(" "))?,
    };

    println!("{key}");
    Ok(())
}
