//! Image identifier codec.
//!
//! Every catalogued image carries a 4-digit identifier that packs three
//! coordinates:
//!
//! ```text
//! identifier = zone * 1000 + category * 100 + sequence
//!              ^^^^          ^^^^^^^^         ^^^^^^^^
//!              0..=9         0..=9            0..=99
//! ```
//!
//! The codec is pure arithmetic. It never rejects a value: bounds and
//! vocabulary membership are checked by the naming validator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest value representable with four digits.
pub const MAX_IDENTIFIER: u32 = 9_999;

const ZONE_BASE: u32 = 1_000;
const CATEGORY_BASE: u32 = 100;

/// Error returned when parsing an identifier fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    message: String,
}

impl IdParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for IdParseError {}

/// Decoded coordinates of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdParts {
    pub zone: u32,
    pub category: u32,
    pub sequence: u32,
}

impl IdParts {
    pub fn new(zone: u32, category: u32, sequence: u32) -> Self {
        Self {
            zone,
            category,
            sequence,
        }
    }

    /// Recompose the identifier value from the parts.
    pub fn encode(&self) -> u32 {
        encode_id(self.zone, self.category, self.sequence)
    }

    /// Key of the per-(zone, category) sequence bucket.
    pub fn bucket(&self) -> (u32, u32) {
        (self.zone, self.category)
    }
}

impl fmt::Display for IdParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{:02}", self.zone, self.category, self.sequence)
    }
}

/// Pack (zone, category, sequence) into an identifier value.
///
/// No bounds checking: `encode_id(0, 0, 150)` yields 150, which decodes
/// back to category 1, sequence 50.
pub fn encode_id(zone: u32, category: u32, sequence: u32) -> u32 {
    zone * ZONE_BASE + category * CATEGORY_BASE + sequence
}

/// [`encode_id`] for untrusted input: `None` when the value overflows `u32`.
pub fn checked_encode_id(zone: u32, category: u32, sequence: u32) -> Option<u32> {
    zone.checked_mul(ZONE_BASE)?
        .checked_add(category.checked_mul(CATEGORY_BASE)?)?
        .checked_add(sequence)
}

/// Split an identifier value into its coordinates.
///
/// Values above [`MAX_IDENTIFIER`] still decode; the zone simply exceeds 9.
pub fn decode_id(identifier: u32) -> IdParts {
    IdParts {
        zone: identifier / ZONE_BASE,
        category: (identifier % ZONE_BASE) / CATEGORY_BASE,
        sequence: identifier % CATEGORY_BASE,
    }
}

/// A 4-digit image identifier (0000..=9999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(u32);

impl Identifier {
    pub fn new(value: u32) -> Result<Self, IdParseError> {
        if value > MAX_IDENTIFIER {
            return Err(IdParseError::new(format!(
                "Invalid identifier: {} exceeds {}",
                value, MAX_IDENTIFIER
            )));
        }
        Ok(Self(value))
    }

    /// Encode `parts`, failing on overflow or a value above [`MAX_IDENTIFIER`].
    pub fn from_parts(parts: IdParts) -> Result<Self, IdParseError> {
        let value = checked_encode_id(parts.zone, parts.category, parts.sequence)
            .ok_or_else(|| IdParseError::new(format!("Invalid identifier: {} overflows", parts)))?;
        Self::new(value)
    }

    /// Parse exactly four ASCII digits ("0042").
    pub fn parse(value: &str) -> Result<Self, IdParseError> {
        if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdParseError::new(format!(
                "Invalid identifier '{}': expected exactly 4 digits",
                value
            )));
        }
        value
            .parse::<u32>()
            .map(Self)
            .map_err(|e| IdParseError::new(format!("Invalid identifier '{}': {}", value, e)))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn parts(&self) -> IdParts {
        decode_id(self.0)
    }

    /// Zero-padded form used in filenames and catalog ids.
    pub fn padded(&self) -> String {
        format!("{:04}", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl std::str::FromStr for Identifier {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
