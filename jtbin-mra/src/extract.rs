//! Region byte extraction and table-row formatting.
//!
//! The pipeline for one descriptor is: collect the part text of a region,
//! normalize it into space-separated upper-case byte tokens, then decide
//! whether the set gets a table row or a skip notice.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::MraError;
use crate::mra::{MraFile, parse_mra_file};
use crate::scanner::scan_descriptors;

/// Board identifier processed when nothing else is configured.
pub const DEFAULT_BOARD: &str = "jtcps1";

/// Parts repeated more than this many times are dropped.
pub const MAX_REPEAT: i64 = 256;

/// A set needs more than this many tokens to get a table row.
pub const MIN_ROW_TOKENS: usize = 16;

/// Leading tokens of the region that belong to the board header.
pub const HEADER_TOKENS: usize = 17;

/// Value of the `pointer` field in every emitted row.
pub const DATA_POINTER: u32 = 16;

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
static RE_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n\t ]+").unwrap());

#[allow(clippy::unwrap_used)] // Static regex pattern is hardcoded and valid
static RE_TRAILING_FF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"( FF)+$").unwrap());

/// How many times a part's text is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Times(u32),
    /// Above [`MAX_REPEAT`]; the part contributes nothing.
    TooLarge,
}

/// Interpret a part's `repeat` attribute.
///
/// Accepts `0x`, `0o` and `0b` prefixes and C-style leading-zero octal.
/// A missing or malformed attribute means one repetition; negative counts
/// mean none.
pub fn parse_repeat(raw: Option<&str>) -> Repeat {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Repeat::Times(1);
    };

    match parse_prefixed_int(raw) {
        ParsedInt::Value(n) if n > MAX_REPEAT => Repeat::TooLarge,
        ParsedInt::Value(n) if n <= 0 => Repeat::Times(0),
        ParsedInt::Value(n) => Repeat::Times(n as u32),
        ParsedInt::Overflow { negative: false } => Repeat::TooLarge,
        ParsedInt::Overflow { negative: true } => Repeat::Times(0),
        ParsedInt::Invalid => Repeat::Times(1),
    }
}

enum ParsedInt {
    Value(i64),
    Overflow { negative: bool },
    Invalid,
}

fn parse_prefixed_int(raw: &str) -> ParsedInt {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let lower = body.to_ascii_lowercase();
    let (radix, digits) = if let Some(d) = lower.strip_prefix("0x") {
        (16, d)
    } else if let Some(d) = lower.strip_prefix("0b") {
        (2, d)
    } else if let Some(d) = lower.strip_prefix("0o") {
        (8, d)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return ParsedInt::Invalid;
    }

    match u64::from_str_radix(digits, radix) {
        Ok(magnitude) => match i64::try_from(magnitude) {
            Ok(v) if negative => ParsedInt::Value(-v),
            Ok(v) => ParsedInt::Value(v),
            Err(_) => ParsedInt::Overflow { negative },
        },
        Err(_) => ParsedInt::Overflow { negative },
    }
}

/// Concatenate the trimmed part text of every region with the given index,
/// honouring repeat counts. Occurrences are joined by single spaces.
pub fn collect_region_text(mra: &MraFile, index: i32) -> String {
    let mut pieces: Vec<&str> = Vec::new();

    for rom in mra.regions(index) {
        for part in &rom.parts {
            let count = match parse_repeat(part.repeat.as_deref()) {
                Repeat::Times(n) => n,
                Repeat::TooLarge => {
                    log::debug!(
                        "{}: dropping part {:?} with repeat {:?}",
                        mra.setname,
                        part.name.as_deref().unwrap_or(""),
                        part.repeat.as_deref().unwrap_or(""),
                    );
                    continue;
                }
            };
            let text = part.data.trim();
            for _ in 0..count {
                pieces.push(text);
            }
        }
    }

    pieces.join(" ")
}

/// Upper-case the text, collapse whitespace runs to one space, and strip
/// trailing `FF` byte tokens.
pub fn normalize_region_text(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let collapsed = RE_WHITESPACE_RUN.replace_all(&upper, " ");
    RE_TRAILING_FF.replace(&collapsed, "").into_owned()
}

/// Split normalized text into byte tokens on single spaces.
pub fn split_tokens(normalized: &str) -> Vec<&str> {
    normalized.split(' ').collect()
}

/// What gets printed for one matching descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEntry {
    /// A table row carrying the bytes after the header.
    Row { setname: String, data: String },
    /// Too few bytes for a row.
    Skipped { setname: String, tokens: Vec<String> },
}

impl TableEntry {
    pub fn from_tokens(setname: &str, tokens: &[&str]) -> Self {
        if tokens.len() > MIN_ROW_TOKENS {
            TableEntry::Row {
                setname: setname.to_string(),
                data: tokens[HEADER_TOKENS..].join(" "),
            }
        } else {
            TableEntry::Skipped {
                setname: setname.to_string(),
                tokens: tokens.iter().map(|t| t.to_string()).collect(),
            }
        }
    }

    pub fn setname(&self) -> &str {
        match self {
            TableEntry::Row { setname, .. } | TableEntry::Skipped { setname, .. } => setname,
        }
    }

    pub fn is_row(&self) -> bool {
        matches!(self, TableEntry::Row { .. })
    }
}

impl fmt::Display for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEntry::Row { setname, data } => {
                let quoted = format!("\"{setname}\",");
                write!(
                    f,
                    "\t{{ setname={quoted:<14} pointer={DATA_POINTER}, data=\"{data}\" }},"
                )
            }
            TableEntry::Skipped { setname, tokens } => {
                write!(f, "# skipping {} ([{}])", setname, tokens.join(" "))
            }
        }
    }
}

/// Build the table entry for one region of a decoded descriptor.
pub fn table_entry(mra: &MraFile, region: i32) -> TableEntry {
    let raw = collect_region_text(mra, region);
    let normalized = normalize_region_text(&raw);
    let tokens = split_tokens(&normalized);
    TableEntry::from_tokens(&mra.setname, &tokens)
}

/// Options controlling which descriptors are processed.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Directory walked for descriptors.
    pub descriptor_dir: PathBuf,
    /// File name suffix of descriptor files.
    pub extension: String,
    /// Only descriptors whose `rbf` equals this are processed.
    pub board: String,
    /// ROM region index to extract.
    pub region: i32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            descriptor_dir: PathBuf::from("mra"),
            extension: ".mra".to_string(),
            board: DEFAULT_BOARD.to_string(),
            region: 0,
        }
    }
}

/// Decode one descriptor and build its entry.
///
/// Returns `Ok(None)` when the descriptor targets another board.
pub fn extract_file(path: &Path, options: &ExtractOptions) -> Result<Option<TableEntry>, MraError> {
    let mra = parse_mra_file(path)?;
    if mra.rbf != options.board {
        log::debug!("{}: board {:?} ignored", path.display(), mra.rbf);
        return Ok(None);
    }
    Ok(Some(table_entry(&mra, options.region)))
}

/// Counters for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub scanned: usize,
    pub matched: usize,
    pub rows: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Walk the descriptor directory and write one line per matching set.
///
/// Per-file failures are written to `out` as `<path>: <error>` and the walk
/// continues. Only failures to write `out` abort the run.
pub fn run_extract<W: Write>(options: &ExtractOptions, out: &mut W) -> io::Result<ExtractSummary> {
    let mut summary = ExtractSummary::default();

    for path in scan_descriptors(&options.descriptor_dir, &options.extension) {
        summary.scanned += 1;
        match extract_file(&path, options) {
            Ok(Some(entry)) => {
                summary.matched += 1;
                if entry.is_row() {
                    summary.rows += 1;
                } else {
                    summary.skipped += 1;
                }
                writeln!(out, "{entry}")?;
            }
            Ok(None) => {}
            Err(e) => {
                summary.errors += 1;
                log::debug!("Failed to read {}: {e}", path.display());
                writeln!(out, "{}: {e}", path.display())?;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
