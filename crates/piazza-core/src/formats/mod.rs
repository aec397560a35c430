//! # Slot Wire Format
//!
//! Binary serialization for persistence slot payloads.
//!
//! Format: Header (5 bytes) + postcard-serialized payload.
//! - 4 bytes: Magic ("PIAZ")
//! - 1 byte: Version
//!
//! Pure transformations only; the storage backends move the bytes.
//!
//! Payload size is validated BEFORE deserialization so corrupted slot data
//! cannot trigger oversized allocations, and a bad header is rejected before
//! the payload is touched. Callers treat any error here as "slot absent"
//! and fall back to default state.

use crate::policy::{FORMAT_VERSION, MAGIC_BYTES, MAX_SLOT_PAYLOAD_SIZE};
use crate::types::PiazzaError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Minimum valid slot size (header only).
const MIN_SLOT_SIZE: usize = 5;

// =============================================================================
// SLOT HEADER
// =============================================================================

/// The header preceding every slot payload.
#[derive(Debug, Clone, Copy)]
pub struct SlotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SlotHeader {
    /// Create a header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), PiazzaError> {
        if &self.magic != MAGIC_BYTES {
            return Err(PiazzaError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != FORMAT_VERSION {
            return Err(PiazzaError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PiazzaError> {
        if bytes.len() < MIN_SLOT_SIZE {
            return Err(PiazzaError::DeserializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SlotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SLOT PAYLOAD TYPES
// =============================================================================

/// The `demo-data-storage` slot payload.
///
/// Only the initialized flag is persisted; the bulk seed data is rebuilt
/// from the static source when a session starts with this flag set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMarker {
    pub initialized: bool,
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a slot payload to bytes (header + payload).
pub fn slot_to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, PiazzaError> {
    let header = SlotHeader::new();

    let payload = postcard::to_stdvec(value)
        .map_err(|e| PiazzaError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(MIN_SLOT_SIZE + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize a slot payload from bytes.
///
/// Validates, in order: minimum size, maximum payload size, header magic
/// and version. Only then is the payload parsed.
pub fn slot_from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PiazzaError> {
    if bytes.len() < MIN_SLOT_SIZE {
        return Err(PiazzaError::DeserializationError(
            "Slot data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > MAX_SLOT_PAYLOAD_SIZE {
        return Err(PiazzaError::DeserializationError(format!(
            "Slot data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SLOT_PAYLOAD_SIZE
        )));
    }

    let header = SlotHeader::from_bytes(bytes)?;
    header.validate()?;

    let payload = &bytes[MIN_SLOT_SIZE..];
    postcard::from_bytes(payload).map_err(|e| {
        PiazzaError::DeserializationError(format!("Failed to deserialize slot payload: {}", e))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::ConnectionStore;
    use crate::types::UserId;

    #[test]
    fn header_roundtrip() {
        let header = SlotHeader::new();
        let bytes = header.to_bytes();
        let restored = SlotHeader::from_bytes(&bytes).expect("parse header");

        assert_eq!(restored.magic, *MAGIC_BYTES);
        assert_eq!(restored.version, FORMAT_VERSION);
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn connection_slot_roundtrip() {
        let mut connections = ConnectionStore::new();
        connections.follow(UserId::new("user-x"));
        connections.queue_request(UserId::new("user-y"));

        let bytes = slot_to_bytes(&connections).expect("serialize");
        let restored: ConnectionStore = slot_from_bytes(&bytes).expect("deserialize");

        assert_eq!(connections, restored);
    }

    #[test]
    fn seed_marker_roundtrip() {
        let marker = SeedMarker { initialized: true };

        let bytes = slot_to_bytes(&marker).expect("serialize");
        let restored: SeedMarker = slot_from_bytes(&bytes).expect("deserialize");

        assert!(restored.initialized);
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = vec![0u8; 10];
        bytes[0..4].copy_from_slice(b"XXXX");

        let result: Result<SeedMarker, _> = slot_from_bytes(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn wrong_version_rejected() {
        let marker = SeedMarker { initialized: true };
        let mut bytes = slot_to_bytes(&marker).expect("serialize");
        bytes[4] = FORMAT_VERSION.wrapping_add(1);

        let result: Result<SeedMarker, _> = slot_from_bytes(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn truncated_data_rejected() {
        let result: Result<SeedMarker, _> = slot_from_bytes(&[0x50, 0x49]);
        assert!(result.is_err());
    }

    #[test]
    fn garbage_payload_rejected() {
        let mut bytes = SlotHeader::new().to_bytes().to_vec();
        bytes.extend_from_slice(&[0xFF; 16]);

        let result: Result<ConnectionStore, _> = slot_from_bytes(&bytes);
        assert!(result.is_err());
    }
}
