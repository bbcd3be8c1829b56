//! Binary codecs for the window protocol
//!
//! Integers larger than a byte are big-endian; lengths and ids are VarInts.

use crate::{ProtocolError, Result};
use anvilgui_core::ItemStack;
use bytes::{Buf, BufMut, BytesMut};

/// Longest string any supported family accepts (in UTF-16 units, checked as bytes)
pub const MAX_STRING_LENGTH: usize = 32767;

/// Write a VarInt
///
/// # Format
/// - 7 data bits per byte, least significant group first
/// - High bit set on every byte except the last
/// - Negative values always take 5 bytes
#[inline]
pub fn write_varint(buf: &mut BytesMut, val: i32) {
    let mut val = val as u32;
    loop {
        if val & !0x7F == 0 {
            buf.put_u8(val as u8);
            return;
        }
        buf.put_u8((val & 0x7F) as u8 | 0x80);
        val >>= 7;
    }
}

/// Read a VarInt
#[inline]
pub fn read_varint(buf: &mut BytesMut) -> Result<i32> {
    let mut result: u32 = 0;
    for position in 0..5 {
        if buf.remaining() < 1 {
            return Err(ProtocolError::Truncated("VarInt"));
        }
        let byte = buf.get_u8();
        result |= ((byte & 0x7F) as u32) << (7 * position);
        if byte & 0x80 == 0 {
            return Ok(result as i32);
        }
    }
    Err(ProtocolError::VarIntTooLong)
}

/// Write a length-prefixed UTF-8 string
#[inline]
pub fn write_string(buf: &mut BytesMut, val: &str) {
    write_varint(buf, val.len() as i32);
    buf.put_slice(val.as_bytes());
}

/// Read a length-prefixed UTF-8 string of at most `max_len` bytes
pub fn read_string(buf: &mut BytesMut, max_len: usize) -> Result<String> {
    let len = read_varint(buf)?;
    if len < 0 {
        return Err(ProtocolError::InvalidValue(format!("negative string length {}", len)));
    }
    let len = len as usize;
    if len > max_len {
        return Err(ProtocolError::StringTooLong { len, max: max_len });
    }
    if buf.remaining() < len {
        return Err(ProtocolError::Truncated("String"));
    }
    let bytes = buf.split_to(len);
    String::from_utf8(bytes.to_vec()).map_err(|_| ProtocolError::InvalidUtf8)
}

#[inline]
pub fn write_bool(buf: &mut BytesMut, val: bool) {
    buf.put_u8(val as u8);
}

#[inline]
pub fn read_bool(buf: &mut BytesMut) -> Result<bool> {
    Ok(read_u8(buf)? != 0)
}

#[inline]
pub fn read_u8(buf: &mut BytesMut) -> Result<u8> {
    if buf.remaining() < 1 {
        return Err(ProtocolError::Truncated("u8"));
    }
    Ok(buf.get_u8())
}

#[inline]
pub fn read_i16(buf: &mut BytesMut) -> Result<i16> {
    if buf.remaining() < 2 {
        return Err(ProtocolError::Truncated("i16"));
    }
    Ok(buf.get_i16())
}

/// Write an optional item
///
/// # Format
/// ```text
/// {BOOL present}[{STRING material}{U8 amount}{BOOL named}[{STRING name}]]
/// ```
pub fn write_item(buf: &mut BytesMut, item: Option<&ItemStack>) {
    match item {
        None => write_bool(buf, false),
        Some(item) => {
            write_bool(buf, true);
            write_string(buf, &item.material);
            buf.put_u8(item.amount);
            match &item.display_name {
                Some(name) => {
                    write_bool(buf, true);
                    write_string(buf, name);
                }
                None => write_bool(buf, false),
            }
        }
    }
}

/// Read an optional item
pub fn read_item(buf: &mut BytesMut) -> Result<Option<ItemStack>> {
    if !read_bool(buf)? {
        return Ok(None);
    }
    let material = read_string(buf, MAX_STRING_LENGTH)?;
    let amount = read_u8(buf)?;
    let display_name = if read_bool(buf)? {
        Some(read_string(buf, MAX_STRING_LENGTH)?)
    } else {
        None
    };
    Ok(Some(ItemStack {
        material,
        amount,
        display_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_known_encodings() {
        let cases: [(i32, &[u8]); 5] = [
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7F]),
            (300, &[0xAC, 0x02]),
            (-1, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
        ];
        for (val, expected) in cases {
            let mut buf = BytesMut::new();
            write_varint(&mut buf, val);
            assert_eq!(&buf[..], expected, "encoding of {}", val);
            assert_eq!(read_varint(&mut buf).unwrap(), val);
        }
    }

    #[test]
    fn test_varint_too_long() {
        let mut buf = BytesMut::from(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01][..]);
        assert!(matches!(read_varint(&mut buf), Err(ProtocolError::VarIntTooLong)));
    }

    #[test]
    fn test_string_limit() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "too long for the limit");
        assert!(matches!(
            read_string(&mut buf, 5),
            Err(ProtocolError::StringTooLong { max: 5, .. })
        ));
    }

    #[test]
    fn test_truncated_string() {
        let mut buf = BytesMut::from(&[0x05, b'a', b'b'][..]);
        assert!(matches!(read_string(&mut buf, 10), Err(ProtocolError::Truncated(_))));
    }

    #[test]
    fn test_named_item() {
        let item = ItemStack::paper().with_amount(3).with_display_name("Note");
        let mut buf = BytesMut::new();
        write_item(&mut buf, Some(&item));
        write_item(&mut buf, None);
        assert_eq!(read_item(&mut buf).unwrap(), Some(item));
        assert_eq!(read_item(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }
}
