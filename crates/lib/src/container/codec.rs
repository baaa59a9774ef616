//! Versioned text encoding for containers.
//!
//! A container is written as a JSON envelope:
//!
//! ```text
//! {"_v":1,"entries":[["name","Alice"],[0,{"Int":42}]]}
//! ```
//!
//! Entries are `[key, value]` pairs in insertion order, so integer and named
//! keys survive a round trip unchanged and child containers nest naturally.
//! An empty container built as a map is written as `{}` instead of `[]`.
//! Non-finite floats are written as `"inf"`, `"-inf"` or `"nan"`.
//!
//! Configuration is never encoded; a decoded container starts without an
//! instance configuration. Decoding has no fixed nesting limit.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, DeserializeOwned, IgnoredAny, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};
use tracing::debug;

use super::{Container, ContainerError, Key, Shape, Value};
use crate::{Result, constants::FORMAT_VERSION};

// Serialize as an array of [key, value] pairs
impl Serialize for Container {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_empty() && self.shape() == Shape::Map {
            return serializer.serialize_map(Some(0))?.end();
        }
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (key, value) in self {
            seq.serialize_element(&(key, value))?;
        }
        seq.end()
    }
}

/// Decoded entries, before duplicate keys are checked.
struct Entries {
    pairs: Vec<(Key, Value)>,
    shape: Shape,
}

impl Entries {
    /// Builds the container, rejecting repeated keys.
    fn assemble(self) -> std::result::Result<Container, ContainerError> {
        let mut container = Container::new();
        container.shape = self.shape;
        for (key, value) in self.pairs {
            if container.has(&key) {
                debug!(%key, "rejecting duplicate container key");
                return Err(ContainerError::DuplicateKey {
                    key: key.to_string(),
                });
            }
            container.insert(key, value);
        }
        Ok(container)
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of [key, value] pairs or an empty map")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(pair) = seq.next_element::<(Key, Value)>()? {
                    pairs.push(pair);
                }
                Ok(Entries {
                    pairs,
                    shape: Shape::List,
                })
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                if map.next_key::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_value(de::Unexpected::Map, &self));
                }
                Ok(Entries {
                    pairs: Vec::new(),
                    shape: Shape::Map,
                })
            }
        }

        deserializer.deserialize_any(EntriesVisitor)
    }
}

impl<'de> Deserialize<'de> for Container {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Entries::deserialize(deserializer)?
            .assemble()
            .map_err(de::Error::custom)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    #[serde(rename = "_v")]
    version: u8,
    entries: &'a Container,
}

/// Read first, so a newer format is reported as such even when its entries
/// would not decode.
#[derive(Deserialize)]
struct Header {
    #[serde(rename = "_v")]
    version: u8,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    #[serde(rename = "_v")]
    #[allow(dead_code)]
    version: u8,
    entries: Entries,
}

impl Container {
    /// Encodes the container, with all nested children, as text.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::SerializationFailed`] if the encoder rejects
    /// the data.
    pub fn serialize(&self) -> Result<String> {
        let envelope = EnvelopeRef {
            version: FORMAT_VERSION,
            entries: self,
        };
        serde_json::to_string(&envelope).map_err(|err| {
            debug!(error = %err, "container serialization failed");
            ContainerError::SerializationFailed {
                reason: err.to_string(),
            }
            .into()
        })
    }

    /// Decodes text produced by [`Container::serialize`].
    ///
    /// Decoding either yields the complete container or fails; a partial
    /// container is never returned.
    ///
    /// # Errors
    ///
    /// - [`ContainerError::UnsupportedVersion`] if the envelope was written by
    ///   another format version
    /// - [`ContainerError::DuplicateKey`] if the top-level entries repeat a key
    /// - [`ContainerError::DeserializationFailed`] for malformed or truncated
    ///   input, including repeated keys inside a child container
    pub fn deserialize(text: &str) -> Result<Container> {
        let header: Header = decode(text).map_err(decode_failed)?;
        if header.version != FORMAT_VERSION {
            debug!(found = header.version, "rejecting unsupported container format");
            return Err(ContainerError::UnsupportedVersion {
                found: header.version,
                supported: FORMAT_VERSION,
            }
            .into());
        }

        let envelope: Envelope = decode(text).map_err(decode_failed)?;
        Ok(envelope.entries.assemble()?)
    }
}

/// Parses `text` as a whole, growing the stack as deep input requires.
fn decode<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

fn decode_failed(err: serde_json::Error) -> ContainerError {
    debug!(error = %err, "container deserialization failed");
    ContainerError::DeserializationFailed {
        reason: err.to_string(),
    }
}
