// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use rand::Rng;
use smol_str::SmolStr;
use thiserror::Error;

const SUFFIX_LEN: usize = 7;
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Kind marker for a family of ids; supplies the human-readable prefix.
pub trait IdKind {
    const PREFIX: &'static str;
}

/// A stable, opaque identifier carrying its entity kind as a textual prefix
/// (`obj-`, `edge-`, `arrow-`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T: IdKind> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        validate_id(value, T::PREFIX)?;
        Ok(Self {
            value: SmolStr::new(value),
            _marker: PhantomData,
        })
    }

    /// A fresh id: the kind prefix followed by seven random base-36 characters.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let mut value = String::with_capacity(T::PREFIX.len() + SUFFIX_LEN);
        value.push_str(T::PREFIX);
        for _ in 0..SUFFIX_LEN {
            let idx = rng.random_range(0..SUFFIX_ALPHABET.len());
            value.push(char::from(SUFFIX_ALPHABET[idx]));
        }
        Self {
            value: SmolStr::new(value),
            _marker: PhantomData,
        }
    }
}

impl<T> Id<T> {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T: IdKind> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id '{value}' does not start with '{expected}'")]
    BadPrefix { value: String, expected: &'static str },
    #[error("id '{0}' has no recognised kind prefix (obj-, edge-, arrow-)")]
    UnknownKind(String),
}

fn validate_id(value: &str, prefix: &'static str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    match value.strip_prefix(prefix) {
        Some(suffix) if !suffix.is_empty() => Ok(()),
        _ => Err(IdError::BadPrefix {
            value: value.to_owned(),
            expected: prefix,
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjIdTag {}
pub type ObjId = Id<ObjIdTag>;

impl IdKind for ObjIdTag {
    const PREFIX: &'static str = "obj-";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdTag {}
pub type EdgeId = Id<EdgeIdTag>;

impl IdKind for EdgeIdTag {
    const PREFIX: &'static str = "edge-";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrowIdTag {}
pub type ArrowId = Id<ArrowIdTag>;

impl IdKind for ArrowIdTag {
    const PREFIX: &'static str = "arrow-";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Obj,
    Edge,
    Arrow,
}

/// Any selectable entity id. Selections are lists of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityId {
    Obj(ObjId),
    Edge(EdgeId),
    Arrow(ArrowId),
}

impl EntityId {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Obj(_) => EntityKind::Obj,
            Self::Edge(_) => EntityKind::Edge,
            Self::Arrow(_) => EntityKind::Arrow,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Obj(id) => id.as_str(),
            Self::Edge(id) => id.as_str(),
            Self::Arrow(id) => id.as_str(),
        }
    }

    pub fn as_obj(&self) -> Option<&ObjId> {
        match self {
            Self::Obj(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with(ObjIdTag::PREFIX) {
            ObjId::new(s).map(Self::Obj)
        } else if s.starts_with(EdgeIdTag::PREFIX) {
            EdgeId::new(s).map(Self::Edge)
        } else if s.starts_with(ArrowIdTag::PREFIX) {
            ArrowId::new(s).map(Self::Arrow)
        } else if s.is_empty() {
            Err(IdError::Empty)
        } else {
            Err(IdError::UnknownKind(s.to_owned()))
        }
    }
}

impl From<ObjId> for EntityId {
    fn from(id: ObjId) -> Self {
        Self::Obj(id)
    }
}

impl From<EdgeId> for EntityId {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}

impl From<ArrowId> for EntityId {
    fn from(id: ArrowId) -> Self {
        Self::Arrow(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{ArrowId, EdgeId, EntityId, EntityKind, IdError, ObjId};

    #[test]
    fn id_rejects_empty_and_foreign_prefix() {
        assert_eq!(ObjId::new(""), Err(IdError::Empty));
        assert_eq!(
            ObjId::new("edge-abc"),
            Err(IdError::BadPrefix {
                value: "edge-abc".to_owned(),
                expected: "obj-",
            })
        );
        assert!(ObjId::new("obj-").is_err());
    }

    #[test]
    fn generated_ids_carry_prefix_and_suffix() {
        let id = ArrowId::generate();
        let suffix = id.as_str().strip_prefix("arrow-").expect("prefix");
        assert_eq!(suffix.len(), 7);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(ArrowId::generate(), id);
    }

    #[test]
    fn entity_id_dispatches_on_prefix() {
        let parsed: EntityId = "edge-x1".parse().expect("edge id");
        assert_eq!(parsed.kind(), EntityKind::Edge);
        assert_eq!(parsed, EntityId::Edge(EdgeId::new("edge-x1").expect("edge id")));
        assert_eq!(parsed.to_string(), "edge-x1");

        let obj: EntityId = "obj-a".parse().expect("obj id");
        assert!(obj.as_obj().is_some());

        assert_eq!(
            "node-a".parse::<EntityId>(),
            Err(IdError::UnknownKind("node-a".to_owned()))
        );
    }
}
