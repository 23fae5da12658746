//! Text codec boundary for synced containers.
//!
//! # Responsibility
//! - Turn structured values into their text encoding and back.
//! - Report malformed or shape-incompatible text as typed errors.
//!
//! # Invariants
//! - `decode(encode(v)) == v` for every value the codec accepts.
//! - Encoding is deterministic for identical input.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Codec failure with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Value cannot be represented in the text format.
    Encode(String),
    /// Text is malformed or does not match the requested shape.
    Decode(String),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(reason) => write!(f, "encode failed: {reason}"),
            Self::Decode(reason) => write!(f, "decode failed: {reason}"),
        }
    }
}

impl Error for CodecError {}

/// Encoder/decoder pair used at the container serialization boundary.
pub trait Codec {
    fn encode<X: Serialize>(&self, value: &X) -> CodecResult<String>;
    fn decode<X: DeserializeOwned>(&self, text: &str) -> CodecResult<X>;
}

/// serde_json-backed codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec {
    /// Emit indented output instead of the compact form.
    pub pretty: bool,
}

impl JsonCodec {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn encode<X: Serialize>(&self, value: &X) -> CodecResult<String> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.map_err(|err| CodecError::Encode(err.to_string()))
    }

    fn decode<X: DeserializeOwned>(&self, text: &str) -> CodecResult<X> {
        serde_json::from_str(text).map_err(|err| CodecError::Decode(err.to_string()))
    }
}
