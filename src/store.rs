//! Persistence of a [`FrequencyTable`] so a decoder can rebuild the same tree.
//!
//! The document is a root `items` element holding one `HuffItemXML` entry per
//! symbol, with the symbol's integer code point in `id` and its decimal count
//! in `value`:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <items>
//!   <HuffItemXML id="97" value="3"/>
//!   <HuffItemXML id="98" value="1"/>
//! </items>
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

const ROOT: &str = "items";
const ITEM: &str = "HuffItemXML";

/// File name used when no frequency-store path is configured.
pub const DEFAULT_STORE_PATH: &str = "char_freq";

fn xml_err(e: quick_xml::Error) -> io::Error {
    io::Error::other(e)
}

/// Write `table` as an XML document, entries ascending by symbol.
pub fn write_to<W: Write>(table: &FrequencyTable, writer: W) -> Result<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    xml.write_event(Event::Start(BytesStart::new(ROOT)))
        .map_err(xml_err)?;

    for (symbol, count) in table.iter() {
        let id = symbol.to_string();
        let value = count.to_string();
        let mut item = BytesStart::new(ITEM);
        item.push_attribute(("id", id.as_str()));
        item.push_attribute(("value", value.as_str()));
        xml.write_event(Event::Empty(item)).map_err(xml_err)?;
    }

    xml.write_event(Event::End(BytesEnd::new(ROOT)))
        .map_err(xml_err)?;
    xml.into_inner().flush()?;

    Ok(())
}

/// Read a table written by [`write_to`].
///
/// Every structural problem is reported as [`Error::CorruptFrequencyStore`].
pub fn read_from<R: BufRead>(mut reader: R) -> Result<FrequencyTable> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::corrupt_store(format!("unreadable document: {e}")))?;

    parse(&text)
}

fn parse(text: &str) -> Result<FrequencyTable> {
    let mut reader = Reader::from_str(text);
    let mut counts: BTreeMap<u8, u64> = BTreeMap::new();
    let mut in_root = false;
    let mut seen_root = false;
    let mut total: u64 = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == ROOT.as_bytes() => {
                if seen_root {
                    return Err(Error::corrupt_store("more than one <items> element"));
                }
                seen_root = true;
                in_root = true;
            }
            // `<items/>`: an empty table
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == ROOT.as_bytes() => {
                if seen_root {
                    return Err(Error::corrupt_store("more than one <items> element"));
                }
                seen_root = true;
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == ITEM.as_bytes() =>
            {
                if !in_root {
                    return Err(Error::corrupt_store("entry outside of <items>"));
                }
                let (symbol, count) = parse_item(e)?;
                total = total
                    .checked_add(count)
                    .ok_or_else(|| Error::corrupt_store("counts add up past u64::MAX"))?;
                if counts.insert(symbol, count).is_some() {
                    return Err(Error::corrupt_store(format!("duplicate id {symbol}")));
                }
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Err(Error::corrupt_store(format!(
                    "unexpected element <{}>",
                    String::from_utf8_lossy(e.local_name().as_ref())
                )));
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == ROOT.as_bytes() => {
                in_root = false;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::corrupt_store(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    if !seen_root {
        return Err(Error::corrupt_store("missing <items> root element"));
    }
    if in_root {
        return Err(Error::corrupt_store("unterminated <items> element"));
    }

    Ok(counts.into_iter().collect())
}

fn parse_item(item: &BytesStart<'_>) -> Result<(u8, u64)> {
    let mut id = None;
    let mut value = None;

    for attr in item.attributes() {
        let attr = attr.map_err(|e| Error::corrupt_store(format!("bad attribute: {e}")))?;
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|_| Error::corrupt_store("attribute is not UTF-8"))?
            .to_owned();
        match attr.key.local_name().as_ref() {
            b"id" => id = Some(raw),
            b"value" => value = Some(raw),
            _ => {}
        }
    }

    let id = id.ok_or_else(|| Error::corrupt_store("entry without id"))?;
    let value = value.ok_or_else(|| Error::corrupt_store(format!("entry {id} without value")))?;

    if !is_decimal(&id) {
        return Err(Error::corrupt_store(format!("id {id:?} is not a decimal number")));
    }
    if !is_decimal(&value) {
        return Err(Error::corrupt_store(format!(
            "value {value:?} of id {id} is not a decimal number"
        )));
    }

    let symbol: u8 = id
        .parse()
        .map_err(|_| Error::corrupt_store(format!("id {id:?} is not a byte value")))?;
    let count: u64 = value
        .parse()
        .map_err(|_| Error::corrupt_store(format!("value {value:?} of id {id} is not a count")))?;
    if count == 0 {
        return Err(Error::corrupt_store(format!("id {id} has a zero count")));
    }

    Ok((symbol, count))
}

fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Write `table` to the file at `path`, replacing any previous content.
pub fn save(table: &FrequencyTable, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_to(table, BufWriter::new(file))?;
    debug!(path = %path.display(), symbols = table.len(), "saved frequency store");
    Ok(())
}

/// Load a table from `path`. A missing file is a corrupt store, since the
/// payload cannot be decoded without it.
pub fn load(path: &Path) -> Result<FrequencyTable> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::corrupt_store(format!(
                "{} does not exist",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let table = read_from(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        symbols = table.len(),
        bytes = fs::metadata(path).map(|m| m.len()).unwrap_or_default(),
        "loaded frequency store"
    );
    Ok(table)
}
