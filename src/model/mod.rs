// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Entity model.
//!
//! A [`Diagram`] owns objects and edges; arrows live inside their edge. Cross references
//! (edge endpoints, object in/out lists, arrow owner) are ids into the diagram's arenas.

pub mod diagram;
pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod obj;

pub use diagram::{Diagram, DiagramStats, EntityRef, LocKey};
pub use edge::{Arrow, ArrowStyle, Edge};
pub use ids::{ArrowId, EdgeId, EntityId, EntityKind, Id, IdError, IdKind, ObjId};
pub use obj::Obj;
