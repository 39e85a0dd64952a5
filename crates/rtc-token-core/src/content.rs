//! The token content: signature, user id and message bytes.
//!
//! Layout (little-endian):
//!
//! ```text
//! sig_len(2) | signature(sig_len) | user_id(4) | msg_len(2) | message(msg_len)
//! ```
//!
//! **CRITICAL**: This layout is FROZEN.

use bytes::BufMut;

use crate::crypto::{HmacSignature, SIGNATURE_LEN};
use crate::error::CoreError;
use crate::message::Message;
use crate::types::UserId;
use crate::wire::{put_bytes16, take_bytes16, take_u32};

/// Largest content buffer the layout can describe.
pub const MAX_CONTENT_LEN: usize = 2 + u16::MAX as usize + 4 + 2 + u16::MAX as usize;

/// Decoded token content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Signature bytes (32 for HMAC-SHA256).
    pub signature: Vec<u8>,
    /// The user the token was issued to.
    pub user_id: UserId,
    /// Encoded [`Message`] bytes, exactly as signed.
    pub message: Vec<u8>,
}

impl Content {
    pub fn new(signature: HmacSignature, user_id: UserId, message: Vec<u8>) -> Self {
        Self {
            signature: signature.0.to_vec(),
            user_id,
            message,
        }
    }

    /// Encode to the fixed wire layout.
    pub fn encode(&self) -> Result<Vec<u8>, CoreError> {
        encode_content(&self.signature, self.user_id, &self.message)
    }

    /// Decode from wire bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let mut cursor = bytes;

        let signature = take_bytes16(&mut cursor)
            .ok_or_else(|| malformed("signature length exceeds buffer"))?
            .to_vec();
        let user_id = take_u32(&mut cursor).ok_or_else(|| malformed("truncated user id"))?;
        let message = take_bytes16(&mut cursor)
            .ok_or_else(|| malformed("message length exceeds buffer"))?
            .to_vec();

        if !cursor.is_empty() {
            return Err(malformed(format!("{} trailing bytes", cursor.len())));
        }

        Ok(Self {
            signature,
            user_id: UserId(user_id),
            message,
        })
    }

    /// The signature as a fixed-size HMAC tag, if it has the right length.
    pub fn hmac_signature(&self) -> Option<HmacSignature> {
        let arr: [u8; SIGNATURE_LEN] = self.signature.as_slice().try_into().ok()?;
        Some(HmacSignature(arr))
    }

    /// Decode the embedded message.
    pub fn decode_message(&self) -> Result<Message, CoreError> {
        Message::decode(&self.message)
    }
}

fn malformed(reason: impl Into<String>) -> CoreError {
    CoreError::MalformedContent(reason.into())
}

/// Encode `signature | user_id | message` to content bytes.
pub fn encode_content(
    signature: &[u8],
    user_id: UserId,
    message: &[u8],
) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::with_capacity(2 + signature.len() + 4 + 2 + message.len());
    put_bytes16(&mut buf, signature).ok_or_else(|| {
        CoreError::EncodingError(format!("signature of {} bytes too long", signature.len()))
    })?;
    buf.put_u32_le(user_id.get());
    put_bytes16(&mut buf, message).ok_or_else(|| {
        CoreError::EncodingError(format!("message of {} bytes too long", message.len()))
    })?;
    Ok(buf)
}

/// Decode content bytes into `(signature, user_id, message)`.
pub fn decode_content(bytes: &[u8]) -> Result<(Vec<u8>, UserId, Vec<u8>), CoreError> {
    let content = Content::decode(bytes)?;
    Ok((content.signature, content.user_id, content.message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_layout() {
        let bytes = encode_content(&[0xaa; 32], UserId(42), &[1, 2, 3]).unwrap();

        assert_eq!(bytes.len(), 2 + 32 + 4 + 2 + 3);
        assert_eq!(&bytes[0..2], &[32, 0]);
        assert_eq!(&bytes[2..34], &[0xaa; 32]);
        assert_eq!(&bytes[34..38], &[42, 0, 0, 0]);
        assert_eq!(&bytes[38..40], &[3, 0]);
        assert_eq!(&bytes[40..], &[1, 2, 3]);
    }

    #[test]
    fn test_content_roundtrip() {
        let content = Content::new(HmacSignature([7; 32]), UserId(u32::MAX), vec![9; 40]);
        let decoded = Content::decode(&content.encode().unwrap()).unwrap();
        assert_eq!(decoded, content);
        assert_eq!(decoded.hmac_signature(), Some(HmacSignature([7; 32])));
    }

    #[test]
    fn test_free_functions_roundtrip() {
        let bytes = encode_content(b"sig", UserId(1), b"").unwrap();
        let (sig, uid, msg) = decode_content(&bytes).unwrap();
        assert_eq!(sig, b"sig");
        assert_eq!(uid, UserId(1));
        assert!(msg.is_empty());
    }

    #[test]
    fn test_short_signature_has_no_hmac_view() {
        let content = Content {
            signature: vec![1, 2, 3],
            user_id: UserId(0),
            message: vec![],
        };
        assert_eq!(content.hmac_signature(), None);
    }

    #[test]
    fn test_signature_length_past_buffer_rejected() {
        let mut bytes = encode_content(&[0; 32], UserId(1), b"m").unwrap();
        bytes[0] = 0xff;
        assert!(matches!(
            decode_content(&bytes),
            Err(CoreError::MalformedContent(_))
        ));
    }

    #[test]
    fn test_message_length_past_buffer_rejected() {
        let bytes = encode_content(&[0; 32], UserId(1), b"message").unwrap();
        assert!(matches!(
            decode_content(&bytes[..bytes.len() - 2]),
            Err(CoreError::MalformedContent(_))
        ));
    }

    #[test]
    fn test_truncated_user_id_rejected() {
        let bytes = encode_content(&[], UserId(1), b"").unwrap();
        assert!(matches!(
            decode_content(&bytes[..4]),
            Err(CoreError::MalformedContent(_))
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_content(&[0; 32], UserId(1), b"m").unwrap();
        bytes.push(0);
        assert!(matches!(
            decode_content(&bytes),
            Err(CoreError::MalformedContent(_))
        ));
    }

    #[test]
    fn test_oversized_message_rejected_on_encode() {
        let message = vec![0u8; u16::MAX as usize + 1];
        assert!(matches!(
            encode_content(&[0; 32], UserId(1), &message),
            Err(CoreError::EncodingError(_))
        ));
    }
}
