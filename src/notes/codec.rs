//! Byte encoding of [`Note`] records.
//!
//! Records are JSON objects with the fields `id`, `title`, `content`,
//! `created_at`, `modified_at` and `tags`. Timestamps are RFC 3339 with full
//! sub-second precision, so a decoded note compares equal to the one encoded.

use crate::error::CodecError;
use crate::model::Note;

pub fn encode(note: &Note) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(note).map_err(CodecError::Unencodable)
}

pub fn decode(bytes: &[u8]) -> Result<Note, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Malformed)
}
