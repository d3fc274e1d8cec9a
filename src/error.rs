// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Error types.
//!
//! Rejected user intent (occupied position, unknown endpoint, parallel extrusion, ...) is not an
//! error: operations report it as `None`/`false`/[`crate::ops::Outcome::Unchanged`]. The types here
//! cover broken model invariants and bad keymap/configuration input.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{EdgeId, EntityId, ObjId};

/// A model invariant was violated; the caller skipped validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("no object, arrow, or edge found with id: {0}")]
    UnknownEntity(EntityId),

    #[error("edge {edge} {role} is not object {obj}")]
    EndpointMismatch {
        edge: EdgeId,
        obj: ObjId,
        role: EndpointRole,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Domain,
    Codomain,
}

impl std::fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain => f.write_str("domain"),
            Self::Codomain => f.write_str("codomain"),
        }
    }
}

/// A keybinding or action string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("key combo must not be empty")]
    EmptyCombo,

    #[error("invalid mode mask '{mask}' in binding '{binding}'")]
    BadMask { binding: String, mask: String },

    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid keybinding: {0}")]
    Keymap(#[from] KeymapError),
}
