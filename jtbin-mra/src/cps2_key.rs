//! CPS2 security key decoding.
//!
//! A CPS2 board stores a 20-byte key. The bits are stored scrambled; once
//! reordered into ten 16-bit words they give the 64-bit master key, the
//! watchdog instruction, and the bounds of the encrypted program range.

use std::fmt;

use crate::error::MraError;
use crate::extract::collect_region_text;
use crate::mra::MraFile;

/// Length of a CPS2 key blob in bytes.
pub const KEY_LEN: usize = 20;

/// A decoded CPS2 key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cps2Key {
    /// 64-bit master key, high word first.
    pub master: [u32; 2],
    /// Watchdog instruction words, first to third.
    pub watchdog: [u16; 3],
    /// First encrypted address.
    pub lower: u32,
    /// End of the encrypted range.
    pub upper: u32,
}

impl Cps2Key {
    /// Decode a raw key blob.
    pub fn decode(key: &[u8; KEY_LEN]) -> Self {
        let words = unscramble(key);

        let master = [
            (u32::from(words[0]) << 16) | u32::from(words[1]),
            (u32::from(words[2]) << 16) | u32::from(words[3]),
        ];

        // An all-ones range word marks a dead board: only the upper half of
        // the last 128kB bank stays encrypted.
        let (lower, upper) = if words[9] == 0xFFFF {
            (0xFF0000, 0xFFFFFF)
        } else {
            let upper = (((u32::from(!words[9]) & 0x3FF) << 14) | 0x3FFF) + 1;
            (0, upper)
        };

        Self {
            master,
            watchdog: [words[6], words[5], words[4]],
            lower,
            upper,
        }
    }

    /// Decode a key written as hex bytes. Whitespace between bytes is optional.
    pub fn from_hex(text: &str) -> Result<Self, MraError> {
        let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != KEY_LEN * 2 {
            return Err(MraError::invalid_key(format!(
                "expected {KEY_LEN} bytes, got {} hex digits",
                digits.len()
            )));
        }

        let mut key = [0u8; KEY_LEN];
        for (i, byte) in key.iter_mut().enumerate() {
            let pair = digits
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| MraError::invalid_key("non-ASCII key text"))?;
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| MraError::invalid_key(format!("invalid hex byte {pair:?}")))?;
        }

        Ok(Self::decode(&key))
    }

    /// Read the key stored in a descriptor region.
    pub fn from_mra(mra: &MraFile, region: i32) -> Result<Self, MraError> {
        let text = collect_region_text(mra, region);
        if text.trim().is_empty() {
            return Err(MraError::invalid_key(format!(
                "{}: region {region} holds no key data",
                mra.setname
            )));
        }
        Self::from_hex(&text)
    }

    /// True when the key describes a dead board.
    pub fn is_dead_board(&self) -> bool {
        self.lower == 0xFF0000 && self.upper == 0xFFFFFF
    }
}

/// Reorder the 160 key bits into ten big-endian 16-bit words.
fn unscramble(key: &[u8; KEY_LEN]) -> [u16; 10] {
    let mut words = [0u16; 10];
    for b in 0..KEY_LEN * 8 {
        let bit = (317 - b) % 160;
        if (key[bit / 8] >> (7 - bit % 8)) & 1 != 0 {
            words[b / 16] |= 0x8000 >> (b % 16);
        }
    }
    words
}

impl fmt::Display for Cps2Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "master key : {:08X} {:08X}",
            self.master[0], self.master[1]
        )?;
        writeln!(
            f,
            "watchdog   : {:04X} {:04X} {:04X}",
            self.watchdog[0], self.watchdog[1], self.watchdog[2]
        )?;
        write!(f, "encrypted  : {:06X}-{:06X}", self.lower, self.upper)?;
        if self.is_dead_board() {
            write!(f, " (dead board)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/cps2_key_tests.rs"]
mod tests;
