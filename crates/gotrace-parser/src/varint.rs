//! Base-128 unsigned varints.
//!
//! Each byte carries 7 bits of the value, least significant group first. A set
//! high bit means another byte follows.

use std::io::{self, Read};

/// Read one unsigned varint from `r`.
///
/// End of input anywhere inside the value is reported as
/// [`io::ErrorKind::UnexpectedEof`]. There is no length limit: groups shifted
/// past bit 63 are dropped, matching plain 64-bit shift-and-or accumulation.
pub fn read_uvarint<R: Read + ?Sized>(r: &mut R) -> io::Result<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    let mut byte = [0u8; 1];

    loop {
        r.read_exact(&mut byte)?;
        let b = byte[0];

        value |= u64::from(b & 0x7f).checked_shl(shift).unwrap_or(0);

        if b & 0x80 == 0 {
            return Ok(value);
        }
        shift = shift.saturating_add(7);
    }
}

#[cfg(test)]
pub(crate) fn put_uvarint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}
