// src/property.rs

//! Property trees decoded from property-list documents
//!
//! Metadata blobs, `Manifest.plist` and `Status.plist` are all property lists
//! (binary or XML). They are decoded with the `plist` crate and converted
//! into a closed tagged tree so rendering code can match exhaustively.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

/// A decoded property-list value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyNode {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<PropertyNode>),
    Map(PropertyMap),
}

/// String-keyed map that keeps keys in decode order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyMap(Vec<(String, PropertyNode)>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key, keeping the original position on replace
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyNode) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertyNode> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyNode)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of this map with keys in ascending order
    pub fn sorted(&self) -> Self {
        let mut entries = self.0.clone();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self(entries)
    }
}

impl FromIterator<(String, PropertyNode)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (String, PropertyNode)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl PropertyNode {
    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PropertyNode]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value as seconds, for integer or real nodes
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Look up a key if this node is a map
    pub fn get(&self, key: &str) -> Option<&PropertyNode> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl From<::plist::Value> for PropertyNode {
    fn from(value: ::plist::Value) -> Self {
        use ::plist::Value;

        match value {
            Value::Boolean(b) => Self::Bool(b),
            Value::Integer(i) => match i.as_signed() {
                Some(v) => Self::Int(v),
                // Only values above i64::MAX fail the signed conversion
                None => Self::String(i.as_unsigned().map(|u| u.to_string()).unwrap_or_default()),
            },
            Value::Real(f) => Self::Float(f),
            Value::String(s) => Self::String(s),
            Value::Data(d) => Self::Bytes(d),
            Value::Date(d) => {
                let time: DateTime<Utc> = SystemTime::from(d).into();
                Self::String(time.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Value::Uid(uid) => Self::Int(uid.get() as i64),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Dictionary(dict) => Self::Map(
                dict.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
            _ => Self::Null,
        }
    }
}

impl fmt::Display for PropertyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::String(s) => write!(f, "{}", s),
            Self::Bytes(bytes) => {
                write!(f, "<")?;
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                write!(f, ">")
            }
            Self::Array(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (idx, (k, v)) in map.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Decode property-list bytes (binary or XML) into a property tree
pub fn decode_property_tree(bytes: &[u8]) -> std::result::Result<PropertyNode, ::plist::Error> {
    let value = ::plist::Value::from_reader(Cursor::new(bytes))?;
    Ok(PropertyNode::from(value))
}

/// Read and decode a property-list file
pub fn read_property_list(path: impl AsRef<Path>) -> Result<PropertyNode> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::PropertyListRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let tree = decode_property_tree(&bytes).map_err(|e| Error::PropertyListRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    debug!("Read property list {} ({} bytes)", path.display(), bytes.len());
    Ok(tree)
}
