//! Record framing for vocabulary files.
//!
//! One record per word: `u32` little-endian payload length, the UTF-8
//! payload, then a `u64` reserved field written as zero (space for a global
//! id during index merging). Files are written in collation order; every
//! range query on a loaded vocabulary relies on that order.

use std::io::{self, BufRead, Read, Write};

pub(crate) fn write_record<W: Write>(writer: &mut W, word: &str) -> io::Result<()> {
    writer.write_all(&(word.len() as u32).to_le_bytes())?;
    writer.write_all(word.as_bytes())?;
    writer.write_all(&0u64.to_le_bytes())
}

/// Read the next record, or `None` on a clean end of file.
pub(crate) fn read_record<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut len_bytes = [0u8; 4];
    match reader.read_exact(&mut len_bytes) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    let len = u32::from_le_bytes(len_bytes) as usize;
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;
    let mut reserved = [0u8; 8];
    reader.read_exact(&mut reserved)?;
    String::from_utf8(payload)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
