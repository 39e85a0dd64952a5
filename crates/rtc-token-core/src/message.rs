//! The signed message: salt, timestamp and privilege table.
//!
//! Layout (little-endian):
//!
//! ```text
//! salt(4) | ts(4) | count(2) | count × [ code(2) | expire(4) ]
//! ```
//!
//! **CRITICAL**: This layout is FROZEN. The remote verifier decodes it
//! independently; any change breaks every issued token.

use bytes::BufMut;

use crate::error::CoreError;
use crate::privilege::PrivilegeTable;
use crate::wire::{take_u16, take_u32};

/// Upper bound on privilege entries accepted when decoding.
pub const MAX_PRIVILEGES: usize = 64;

const HEADER_LEN: usize = 4 + 4 + 2;
const ENTRY_LEN: usize = 2 + 4;

/// The message carried inside a token's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Salt. Set to the issuance time by default, so it is not random.
    pub salt: u32,
    /// Issuance time (unix seconds).
    pub ts: u32,
    /// Granted privileges and their expiries.
    pub privileges: PrivilegeTable,
}

impl Message {
    pub fn new(salt: u32, ts: u32, privileges: PrivilegeTable) -> Self {
        Self {
            salt,
            ts,
            privileges,
        }
    }

    /// Encoded length in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.privileges.len() * ENTRY_LEN
    }

    /// Encode to the fixed wire layout.
    pub fn encode(&self) -> Result<Vec<u8>, CoreError> {
        encode_message(self.salt, self.ts, &self.privileges)
    }

    /// Decode from wire bytes.
    ///
    /// Entry order is taken as-is; no ordering of codes is assumed.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let mut cursor = bytes;

        let salt = take_u32(&mut cursor).ok_or_else(|| malformed("truncated salt"))?;
        let ts = take_u32(&mut cursor).ok_or_else(|| malformed("truncated timestamp"))?;
        let count = take_u16(&mut cursor).ok_or_else(|| malformed("truncated count"))? as usize;

        if count > MAX_PRIVILEGES {
            return Err(malformed(format!(
                "privilege count {} exceeds maximum of {}",
                count, MAX_PRIVILEGES
            )));
        }
        if cursor.len() < count * ENTRY_LEN {
            return Err(malformed(format!(
                "count {} needs {} bytes, {} remain",
                count,
                count * ENTRY_LEN,
                cursor.len()
            )));
        }

        let mut privileges = PrivilegeTable::new();
        for _ in 0..count {
            let code = take_u16(&mut cursor).ok_or_else(|| malformed("truncated entry"))?;
            let expire_at = take_u32(&mut cursor).ok_or_else(|| malformed("truncated entry"))?;
            if privileges.insert_code(code, expire_at).is_some() {
                return Err(malformed(format!("duplicate privilege code {}", code)));
            }
        }

        if !cursor.is_empty() {
            return Err(malformed(format!("{} trailing bytes", cursor.len())));
        }

        Ok(Self {
            salt,
            ts,
            privileges,
        })
    }
}

fn malformed(reason: impl Into<String>) -> CoreError {
    CoreError::MalformedMessage(reason.into())
}

/// Encode `salt | ts | table` to message bytes.
pub fn encode_message(salt: u32, ts: u32, table: &PrivilegeTable) -> Result<Vec<u8>, CoreError> {
    if table.len() > MAX_PRIVILEGES {
        return Err(CoreError::EncodingError(format!(
            "{} privileges exceeds maximum of {}",
            table.len(),
            MAX_PRIVILEGES
        )));
    }

    let mut buf = Vec::with_capacity(HEADER_LEN + table.len() * ENTRY_LEN);
    buf.put_u32_le(salt);
    buf.put_u32_le(ts);
    buf.put_u16_le(table.len() as u16);
    for (code, expire_at) in table.iter() {
        buf.put_u16_le(code);
        buf.put_u32_le(expire_at);
    }
    Ok(buf)
}

/// Decode message bytes into `(salt, ts, table)`.
pub fn decode_message(bytes: &[u8]) -> Result<(u32, u32, PrivilegeTable), CoreError> {
    let message = Message::decode(bytes)?;
    Ok((message.salt, message.ts, message.privileges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privilege::{build_privileges, Privilege, Role};

    #[test]
    fn test_publisher_message_layout() {
        let table = build_privileges(Role::Publisher, 1_700_003_600);
        let bytes = encode_message(1_700_000_000, 1_700_000_000, &table).unwrap();

        assert_eq!(bytes.len(), 10 + 4 * 6);
        // salt and ts: 1_700_000_000 = 0x6553_F100
        assert_eq!(&bytes[0..4], &[0x00, 0xf1, 0x53, 0x65]);
        assert_eq!(&bytes[4..8], &[0x00, 0xf1, 0x53, 0x65]);
        // count = 4
        assert_eq!(&bytes[8..10], &[0x04, 0x00]);
        // first entry: JoinChannel -> 1_700_003_600 = 0x6553_FF10
        assert_eq!(&bytes[10..16], &[0x01, 0x00, 0x10, 0xff, 0x53, 0x65]);
    }

    #[test]
    fn test_struct_and_free_function_agree() {
        let table = build_privileges(Role::Subscriber, 77);
        let message = Message::new(5, 6, table.clone());
        assert_eq!(message.encode().unwrap(), encode_message(5, 6, &table).unwrap());
        assert_eq!(message.encoded_len(), 16);
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let mut table = PrivilegeTable::new();
        table.insert(Privilege::PublishDataStream, 400);
        table.insert(Privilege::JoinChannel, 100);
        table.insert_code(0x7f, 700);

        let bytes = encode_message(1, 2, &table).unwrap();
        let (salt, ts, decoded) = decode_message(&bytes).unwrap();
        assert_eq!((salt, ts), (1, 2));
        assert_eq!(decoded, table);
    }

    #[test]
    fn test_empty_table_roundtrip() {
        let bytes = encode_message(0, 0, &PrivilegeTable::new()).unwrap();
        assert_eq!(bytes, vec![0u8; 10]);
        let (_, _, table) = decode_message(&bytes).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_truncated_entries_rejected() {
        let table = build_privileges(Role::Publisher, 9);
        let bytes = encode_message(1, 2, &table).unwrap();
        let err = decode_message(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, CoreError::MalformedMessage(_)));
    }

    #[test]
    fn test_short_header_rejected() {
        assert!(matches!(
            decode_message(&[1, 2, 3]),
            Err(CoreError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_count_above_bound_rejected() {
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(&65u16.to_le_bytes());
        bytes.extend(std::iter::repeat(0u8).take(65 * 6));
        assert!(matches!(
            decode_message(&bytes),
            Err(CoreError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&[1, 0, 9, 0, 0, 0]);
        bytes.extend_from_slice(&[1, 0, 9, 0, 0, 0]);
        assert!(matches!(
            decode_message(&bytes),
            Err(CoreError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_message(1, 2, &PrivilegeTable::new()).unwrap();
        bytes.push(0);
        assert!(matches!(
            decode_message(&bytes),
            Err(CoreError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_encode_rejects_oversized_table() {
        let mut table = PrivilegeTable::new();
        for code in 0..=MAX_PRIVILEGES as u16 {
            table.insert_code(code, 1);
        }
        assert!(matches!(
            encode_message(0, 0, &table),
            Err(CoreError::EncodingError(_))
        ));
    }
}
