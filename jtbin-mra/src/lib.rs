pub mod cps2_key;
pub mod error;
pub mod extract;
pub mod mra;
pub mod scanner;
pub mod settings;

pub use cps2_key::Cps2Key;
pub use error::MraError;
pub use extract::{
    DEFAULT_BOARD, ExtractOptions, ExtractSummary, Repeat, TableEntry, extract_file, run_extract,
    table_entry,
};
pub use mra::{MraFile, MraPart, MraRom, parse_mra, parse_mra_file};
pub use scanner::scan_descriptors;
pub use settings::{Resolved, Settings, ValueSource};
