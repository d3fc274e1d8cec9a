// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Directional focus movement.
//!
//! From a focused entity, the next entity in a direction is the object or edge (arrows are not
//! targets) with the lowest penalty among those strictly ahead of it:
//!
//! ```text
//! penalty = angle(v, direction) / PI + |v| * distance_weight      where v = candidate - focused
//! ```
//!
//! Ties keep the earliest candidate in diagram order. With nothing ahead, focus stays put.

use std::f64::consts::PI;

use indexmap::IndexSet;

use crate::error::ModelError;
use crate::geometry::{angle, dot, Point};
use crate::model::{Diagram, EntityId, EntityRef};

pub const DEFAULT_DISTANCE_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Navigator {
    distance_weight: f64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            distance_weight: DEFAULT_DISTANCE_WEIGHT,
        }
    }
}

impl Navigator {
    pub fn new(distance_weight: f64) -> Self {
        Self { distance_weight }
    }

    pub fn distance_weight(&self) -> f64 {
        self.distance_weight
    }

    /// Penalty for moving by `displacement` when `direction` was requested, or `None` when the
    /// displacement does not point strictly forward.
    pub fn penalty(&self, displacement: Point, direction: Point) -> Option<f64> {
        if dot(displacement, direction) <= 0.0 {
            return None;
        }
        let angle_penalty = angle(displacement, direction) / PI;
        let dist_penalty = displacement.length() * self.distance_weight;
        Some(angle_penalty + dist_penalty)
    }

    pub fn next_single(
        &self,
        diagram: &Diagram,
        focused: &EntityId,
        direction: Point,
    ) -> Result<EntityId, ModelError> {
        let center = diagram.position(focused)?;

        let mut best: Option<(EntityRef<'_>, f64)> = None;
        for candidate in diagram.pieces() {
            if &candidate.id() == focused {
                continue;
            }
            let displacement = diagram.position_of(candidate)? - center;
            let Some(penalty) = self.penalty(displacement, direction) else {
                continue;
            };
            if best.map_or(true, |(_, best_penalty)| penalty < best_penalty) {
                best = Some((candidate, penalty));
            }
        }

        Ok(best.map_or_else(|| focused.clone(), |(entity, _)| entity.id()))
    }

    /// Moves every selected entity independently; selections converging on one target collapse.
    pub fn next(
        &self,
        diagram: &Diagram,
        selected: &[EntityId],
        direction: Point,
    ) -> Result<Vec<EntityId>, ModelError> {
        let mut next = IndexSet::with_capacity(selected.len());
        for focused in selected {
            next.insert(self.next_single(diagram, focused, direction)?);
        }
        Ok(next.into_iter().collect())
    }
}

pub fn next_selection_single(
    diagram: &Diagram,
    focused: &EntityId,
    direction: Point,
) -> Result<EntityId, ModelError> {
    Navigator::default().next_single(diagram, focused, direction)
}

pub fn next_selection(
    diagram: &Diagram,
    selected: &[EntityId],
    direction: Point,
) -> Result<Vec<EntityId>, ModelError> {
    Navigator::default().next(diagram, selected, direction)
}

/// Cycles through the arrows of a singly selected edge or arrow.
///
/// Edge: its first arrow. Arrow: the next arrow on the same edge, wrapping around. `None` for
/// objects, arrow-less edges and anything but a single selection.
pub fn arrow_select_next(
    diagram: &Diagram,
    selected: &[EntityId],
) -> Result<Option<EntityId>, ModelError> {
    let [only] = selected else {
        return Ok(None);
    };
    match diagram.get(only)? {
        EntityRef::Obj(_) => Ok(None),
        EntityRef::Edge(edge) => Ok(edge
            .arrows()
            .first()
            .map(|arrow| EntityId::Arrow(arrow.id().clone()))),
        EntityRef::Arrow(arrow) => {
            let Some(edge) = diagram.edge(arrow.edge()) else {
                return Err(ModelError::UnknownEntity(EntityId::Edge(arrow.edge().clone())));
            };
            let Some(idx) = edge.arrow_index(arrow.id()) else {
                return Ok(None);
            };
            let next = &edge.arrows()[(idx + 1) % edge.arrows().len()];
            Ok(Some(EntityId::Arrow(next.id().clone())))
        }
    }
}
