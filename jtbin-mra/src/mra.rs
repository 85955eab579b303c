use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::MraError;

/// A parsed MiSTer ROM descriptor (`.mra`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MraFile {
    /// Core bitstream name (e.g. "jtcps1"), used as the board identifier.
    pub rbf: String,
    pub setname: String,
    /// ROM regions in document order.
    pub roms: Vec<MraRom>,
}

/// A `<rom>` region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MraRom {
    /// The `index` attribute; a missing attribute reads as 0.
    pub index: i32,
    pub parts: Vec<MraPart>,
}

/// A `<part>` directly inside a `<rom>` region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MraPart {
    pub name: Option<String>,
    /// Raw `repeat` attribute, unparsed.
    pub repeat: Option<String>,
    /// Character data (hex byte text), untrimmed.
    pub data: String,
}

impl MraFile {
    /// Regions carrying the given index, in document order.
    pub fn regions(&self, index: i32) -> impl Iterator<Item = &MraRom> {
        self.roms.iter().filter(move |rom| rom.index == index)
    }
}

/// Parse an MRA document.
///
/// Only `<part>` elements that are direct children of a top-level `<rom>`
/// are collected; parts nested in `<interleave>` blocks are ignored. A
/// repeated `<rbf>` or `<setname>` replaces the earlier value, and reading
/// stops at the end of the root element.
pub fn parse_mra<R: BufRead>(reader: R) -> Result<MraFile, MraError> {
    let mut xml = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut mra = MraFile::default();

    // Open element names, outermost first.
    let mut stack: Vec<String> = Vec::new();
    let mut saw_root = false;
    let mut current_rom: Option<MraRom> = None;
    let mut current_part: Option<MraPart> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = tag_name(e);
                match (stack.len(), tag.as_str()) {
                    (0, _) => saw_root = true,
                    (1, "rbf") => mra.rbf.clear(),
                    (1, "setname") => mra.setname.clear(),
                    (1, "rom") => current_rom = Some(parse_rom_attributes(e)?),
                    (2, "part") if stack[1] == "rom" => {
                        current_part = Some(parse_part_attributes(e)?);
                    }
                    _ => {}
                }
                stack.push(tag);
            }
            Event::Empty(ref e) => {
                let tag = tag_name(e);
                match (stack.len(), tag.as_str()) {
                    (0, _) => {
                        saw_root = true;
                        break;
                    }
                    (1, "rbf") => mra.rbf.clear(),
                    (1, "setname") => mra.setname.clear(),
                    (1, "rom") => mra.roms.push(parse_rom_attributes(e)?),
                    (2, "part") => {
                        if let Some(ref mut rom) = current_rom {
                            rom.parts.push(parse_part_attributes(e)?);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                if let Some(target) = text_target(&stack, &mut mra, &mut current_part) {
                    target.push_str(&text);
                }
            }
            Event::CData(ref e) => {
                let text = String::from_utf8_lossy(e);
                if let Some(target) = text_target(&stack, &mut mra, &mut current_part) {
                    target.push_str(&text);
                }
            }
            Event::End(_) => {
                let tag = stack.pop().unwrap_or_default();
                match (stack.len(), tag.as_str()) {
                    (1, "rom") => {
                        if let Some(rom) = current_rom.take() {
                            mra.roms.push(rom);
                        }
                    }
                    (2, "part") => {
                        if let (Some(part), Some(rom)) = (current_part.take(), current_rom.as_mut())
                        {
                            rom.parts.push(part);
                        }
                    }
                    _ => {}
                }
                // Anything after the root element is not part of the descriptor.
                if stack.is_empty() {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(MraError::invalid_mra("No root element found"));
    }
    if let Some(open) = stack.last() {
        return Err(MraError::invalid_mra(format!(
            "Unexpected end of document inside <{open}>"
        )));
    }

    mra.rbf = mra.rbf.trim().to_string();
    mra.setname = mra.setname.trim().to_string();
    Ok(mra)
}

/// Parse an MRA file from a path.
pub fn parse_mra_file(path: &Path) -> Result<MraFile, MraError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_mra(reader)
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Where character data at the current nesting lands, if anywhere.
fn text_target<'a>(
    stack: &[String],
    mra: &'a mut MraFile,
    part: &'a mut Option<MraPart>,
) -> Option<&'a mut String> {
    match stack {
        [_, tag] if tag.as_str() == "rbf" => Some(&mut mra.rbf),
        [_, tag] if tag.as_str() == "setname" => Some(&mut mra.setname),
        [_, rom, tag] if rom.as_str() == "rom" && tag.as_str() == "part" => {
            part.as_mut().map(|p| &mut p.data)
        }
        _ => None,
    }
}

fn parse_rom_attributes(e: &BytesStart<'_>) -> Result<MraRom, MraError> {
    let mut rom = MraRom::default();

    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"index" {
            let value = attr.unescape_value()?;
            let value = value.trim();
            if !value.is_empty() {
                rom.index = value
                    .parse()
                    .map_err(|_| MraError::invalid_mra(format!("Invalid ROM index: {value}")))?;
            }
        }
    }

    Ok(rom)
}

fn parse_part_attributes(e: &BytesStart<'_>) -> Result<MraPart, MraError> {
    let mut part = MraPart::default();

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"name" => part.name = Some(attr.unescape_value()?.into_owned()),
            b"repeat" => part.repeat = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    Ok(part)
}

#[cfg(test)]
#[path = "tests/mra_tests.rs"]
mod tests;
