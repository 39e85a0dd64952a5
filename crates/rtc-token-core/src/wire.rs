//! Little-endian field helpers shared by the message and content codecs.
//!
//! Writers append to a `Vec<u8>` through [`BufMut`]. Readers consume a
//! `&[u8]` cursor through [`Buf`], checking `remaining()` first since the
//! `get_*` methods panic on underflow.

use bytes::{Buf, BufMut};

/// Append a `u16` length prefix followed by the bytes.
///
/// Returns `None` if the slice does not fit a `u16` length.
pub(crate) fn put_bytes16(buf: &mut Vec<u8>, bytes: &[u8]) -> Option<()> {
    let len = u16::try_from(bytes.len()).ok()?;
    buf.put_u16_le(len);
    buf.put_slice(bytes);
    Some(())
}

pub(crate) fn take_u16(cursor: &mut &[u8]) -> Option<u16> {
    if cursor.remaining() < 2 {
        return None;
    }
    Some(cursor.get_u16_le())
}

pub(crate) fn take_u32(cursor: &mut &[u8]) -> Option<u32> {
    if cursor.remaining() < 4 {
        return None;
    }
    Some(cursor.get_u32_le())
}

/// Read a `u16` length prefix and that many bytes.
pub(crate) fn take_bytes16<'a>(cursor: &mut &'a [u8]) -> Option<&'a [u8]> {
    let len = take_u16(cursor)? as usize;
    take_slice(cursor, len)
}

pub(crate) fn take_slice<'a>(cursor: &mut &'a [u8], len: usize) -> Option<&'a [u8]> {
    if cursor.len() < len {
        return None;
    }
    let (head, tail) = cursor.split_at(len);
    *cursor = tail;
    Some(head)
}
