// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::ModelError;
use crate::geometry::{Bounds, Point};

use super::edge::{Arrow, ArrowStyle, Edge};
use super::ids::{ArrowId, EdgeId, EntityId, EntityKind, ObjId};
use super::obj::Obj;

pub const DEFAULT_PRECISION: u32 = 3;
pub const DEFAULT_BBOX_MARGIN: f64 = 0.3;

/// Quantized position: both coordinates scaled by `10^precision` and rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocKey(i64, i64);

impl LocKey {
    pub fn new(point: Point, precision: u32) -> Self {
        let scale = 10f64.powi(precision as i32);
        Self((point.x() * scale).round() as i64, (point.y() * scale).round() as i64)
    }
}

/// Borrowed view of any entity.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Obj(&'a Obj),
    Edge(&'a Edge),
    Arrow(&'a Arrow),
}

impl EntityRef<'_> {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Obj(obj) => EntityId::Obj(obj.id().clone()),
            Self::Edge(edge) => EntityId::Edge(edge.id().clone()),
            Self::Arrow(arrow) => EntityId::Arrow(arrow.id().clone()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Obj(_) => EntityKind::Obj,
            Self::Edge(_) => EntityKind::Edge,
            Self::Arrow(_) => EntityKind::Arrow,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Obj(obj) => obj.name(),
            Self::Edge(edge) => edge.name(),
            Self::Arrow(arrow) => arrow.name(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagramStats {
    pub objects: usize,
    pub edges: usize,
    pub arrows: usize,
}

/// Aggregate root: owns every object and edge (arrows live inside their edge).
///
/// Object and edge order is insertion order and is observable: navigation breaks ties by it.
/// The location index maps quantized positions of objects and edges to their ids and is
/// rebuilt after every structural or positional change.
#[derive(Debug, Clone)]
pub struct Diagram {
    objects: IndexMap<ObjId, Obj>,
    edges: IndexMap<EdgeId, Edge>,
    locations: HashMap<LocKey, EntityId>,
    precision: u32,
    bbox_margin: f64,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    pub fn new() -> Self {
        Self {
            objects: IndexMap::new(),
            edges: IndexMap::new(),
            locations: HashMap::new(),
            precision: DEFAULT_PRECISION,
            bbox_margin: DEFAULT_BBOX_MARGIN,
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self.rebuild_locations();
        self
    }

    pub fn with_bbox_margin(mut self, margin: f64) -> Self {
        self.bbox_margin = margin;
        self
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn bbox_margin(&self) -> f64 {
        self.bbox_margin
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = &Obj> + '_ {
        self.objects.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> + '_ {
        self.edges.values().flat_map(|edge| edge.arrows().iter())
    }

    /// Objects then edges: the navigable entities.
    pub fn pieces(&self) -> impl Iterator<Item = EntityRef<'_>> + '_ {
        self.objects
            .values()
            .map(EntityRef::Obj)
            .chain(self.edges.values().map(EntityRef::Edge))
    }

    /// Objects, arrows, then edges.
    pub fn things(&self) -> impl Iterator<Item = EntityRef<'_>> + '_ {
        self.objects
            .values()
            .map(EntityRef::Obj)
            .chain(self.arrows().map(EntityRef::Arrow))
            .chain(self.edges.values().map(EntityRef::Edge))
    }

    pub fn stats(&self) -> DiagramStats {
        DiagramStats {
            objects: self.objects.len(),
            edges: self.edges.len(),
            arrows: self.arrows().count(),
        }
    }

    pub fn object(&self, id: &ObjId) -> Option<&Obj> {
        self.objects.get(id)
    }

    pub fn first_object(&self) -> Option<&Obj> {
        self.objects.values().next()
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn arrow(&self, id: &ArrowId) -> Option<&Arrow> {
        self.arrows().find(|arrow| arrow.id() == id)
    }

    /// The edge owning `arrow_id`.
    pub fn arrow_edge(&self, id: &ArrowId) -> Option<&Edge> {
        self.edges.values().find(|edge| edge.arrow(id).is_some())
    }

    /// The edge going from `from` to `to` in exactly that direction.
    pub fn edge_from_to(&self, from: &ObjId, to: &ObjId) -> Option<&Edge> {
        self.edges
            .values()
            .find(|edge| edge.domain() == from && edge.codomain() == to)
    }

    /// The edge joining `a` and `b` in either direction.
    pub fn edge_between(&self, a: &ObjId, b: &ObjId) -> Option<&Edge> {
        self.edges.values().find(|edge| edge.connects(a, b))
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_ok()
    }

    /// Resolves any id. An unknown id is a caller bug, reported as
    /// [`ModelError::UnknownEntity`].
    pub fn get(&self, id: &EntityId) -> Result<EntityRef<'_>, ModelError> {
        let found = match id {
            EntityId::Obj(id) => self.object(id).map(EntityRef::Obj),
            EntityId::Edge(id) => self.edge(id).map(EntityRef::Edge),
            EntityId::Arrow(id) => self.arrow(id).map(EntityRef::Arrow),
        };
        found.ok_or_else(|| ModelError::UnknownEntity(id.clone()))
    }

    fn object_position(&self, id: &ObjId) -> Result<Point, ModelError> {
        self.object(id)
            .map(Obj::position)
            .ok_or_else(|| ModelError::UnknownEntity(EntityId::Obj(id.clone())))
    }

    /// Domain and codomain positions of an edge.
    pub fn endpoints(&self, edge: &Edge) -> Result<(Point, Point), ModelError> {
        Ok((
            self.object_position(edge.domain())?,
            self.object_position(edge.codomain())?,
        ))
    }

    /// Objects sit at their own position; edges and arrows at the midpoint of their endpoints.
    pub fn position_of(&self, entity: EntityRef<'_>) -> Result<Point, ModelError> {
        match entity {
            EntityRef::Obj(obj) => Ok(obj.position()),
            EntityRef::Edge(edge) => {
                let (from, to) = self.endpoints(edge)?;
                Ok(from.midpoint(to))
            }
            EntityRef::Arrow(arrow) => {
                let edge = self
                    .edge(arrow.edge())
                    .ok_or_else(|| ModelError::UnknownEntity(EntityId::Edge(arrow.edge().clone())))?;
                let (from, to) = self.endpoints(edge)?;
                Ok(from.midpoint(to))
            }
        }
    }

    pub fn position(&self, id: &EntityId) -> Result<Point, ModelError> {
        self.position_of(self.get(id)?)
    }

    pub fn bounds_of_entity(&self, id: &EntityId) -> Result<Bounds, ModelError> {
        let margin = self.bbox_margin;
        match self.get(id)? {
            EntityRef::Obj(obj) => Ok(obj.bounds(margin)),
            EntityRef::Edge(edge) => {
                let (from, to) = self.endpoints(edge)?;
                Ok(Bounds::spanning(from, to, margin))
            }
            EntityRef::Arrow(arrow) => self.bounds_of_entity(&EntityId::Edge(arrow.edge().clone())),
        }
    }

    /// Union of the boxes of `ids`; the zero box when `ids` is empty.
    pub fn bounds_of<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a EntityId>,
    ) -> Result<Bounds, ModelError> {
        let mut acc: Option<Bounds> = None;
        for id in ids {
            let bounds = self.bounds_of_entity(id)?;
            acc = Some(acc.map_or(bounds, |acc| acc.merge(bounds)));
        }
        Ok(acc.unwrap_or_default())
    }

    /// Union of the boxes of every thing in the diagram.
    pub fn bounds(&self) -> Bounds {
        let ids = self.things().map(|thing| thing.id()).collect::<Vec<_>>();
        self.bounds_of(&ids).unwrap_or_default()
    }

    pub fn loc_key(&self, point: Point) -> LocKey {
        LocKey::new(point, self.precision)
    }

    /// The object or edge indexed at `point`'s quantized position.
    pub fn occupant(&self, point: Point) -> Option<&EntityId> {
        self.locations.get(&self.loc_key(point))
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.occupant(point).is_some()
    }

    /// True when two objects or edges share a quantized position.
    pub fn has_overlaps(&self) -> bool {
        self.locations.len() < self.objects.len() + self.edges.len()
    }

    /// Creates an object unless something already occupies `point`.
    pub fn add_object(&mut self, name: impl Into<String>, point: Point) -> Option<ObjId> {
        if self.is_occupied(point) {
            debug!(position:% = point; "add_object rejected: position occupied");
            return None;
        }
        let id = ObjId::generate();
        self.objects.insert(id.clone(), Obj::new(id.clone(), name, point));
        self.rebuild_locations();
        Some(id)
    }

    /// Appends an arrow on the edge joining `from` and `to` (either direction), creating a
    /// `from -> to` edge when none exists.
    ///
    /// `Ok(None)` when an endpoint is unknown or a new edge would collide with an occupied
    /// position.
    pub fn add_arrow(
        &mut self,
        name: impl Into<String>,
        from: &ObjId,
        to: &ObjId,
        style: ArrowStyle,
    ) -> Result<Option<ArrowId>, ModelError> {
        if !self.objects.contains_key(from) || !self.objects.contains_key(to) {
            debug!(from:% = from, to:% = to; "add_arrow rejected: unknown endpoint");
            return Ok(None);
        }

        let edge_id = match self.edge_between(from, to) {
            Some(edge) => edge.id().clone(),
            None => match self.create_edge(from, to)? {
                Some(edge_id) => edge_id,
                None => return Ok(None),
            },
        };

        let Some(edge) = self.edges.get_mut(&edge_id) else {
            return Err(ModelError::UnknownEntity(EntityId::Edge(edge_id)));
        };
        let arrow_id = edge.add(name, style);
        self.rebuild_locations();
        Ok(Some(arrow_id))
    }

    /// Appends an arrow to an existing edge.
    pub fn add_arrow_on(
        &mut self,
        edge_id: &EdgeId,
        name: impl Into<String>,
        style: ArrowStyle,
    ) -> Option<ArrowId> {
        let arrow_id = self.edges.get_mut(edge_id)?.add(name, style);
        self.rebuild_locations();
        Some(arrow_id)
    }

    /// Returns the existing `from -> to` edge, or creates an arrow-less one at the midpoint of
    /// the endpoints if that position is free.
    ///
    /// The existing-edge lookup runs before the midpoint check, since an existing edge always
    /// occupies its own midpoint and would otherwise never be returned.
    pub fn add_edge(&mut self, from: &ObjId, to: &ObjId) -> Result<Option<EdgeId>, ModelError> {
        if !self.objects.contains_key(from) || !self.objects.contains_key(to) {
            debug!(from:% = from, to:% = to; "add_edge rejected: unknown endpoint");
            return Ok(None);
        }
        if let Some(existing) = self.edge_from_to(from, to) {
            return Ok(Some(existing.id().clone()));
        }
        let created = self.create_edge(from, to)?;
        self.rebuild_locations();
        Ok(created)
    }

    fn create_edge(&mut self, from: &ObjId, to: &ObjId) -> Result<Option<EdgeId>, ModelError> {
        let midpoint = self.object_position(from)?.midpoint(self.object_position(to)?);
        if self.is_occupied(midpoint) {
            debug!(position:% = midpoint; "edge creation rejected: midpoint occupied");
            return Ok(None);
        }

        let edge = Edge::new(EdgeId::generate(), "", from.clone(), to.clone());
        self.objects
            .get_mut(from)
            .ok_or_else(|| ModelError::UnknownEntity(EntityId::Obj(from.clone())))?
            .add_outgoing(&edge)?;
        self.objects
            .get_mut(to)
            .ok_or_else(|| ModelError::UnknownEntity(EntityId::Obj(to.clone())))?
            .add_incoming(&edge)?;

        let id = edge.id().clone();
        self.edges.insert(id.clone(), edge);
        Ok(Some(id))
    }

    /// Removes an edge from the arena and unlinks it from both endpoints.
    fn detach_edge(&mut self, id: &EdgeId) -> Option<Edge> {
        let edge = self.edges.shift_remove(id)?;
        if let Some(domain) = self.objects.get_mut(edge.domain()) {
            domain.remove_outgoing(id);
        }
        if let Some(codomain) = self.objects.get_mut(edge.codomain()) {
            codomain.remove_incoming(id);
        }
        Some(edge)
    }

    /// Removes an object together with every edge touching it (and their arrows).
    pub fn remove_object(&mut self, id: &ObjId) -> bool {
        let Some(removed) = self.objects.shift_remove(id) else {
            return false;
        };
        let involved = removed
            .incoming()
            .iter()
            .chain(removed.outgoing())
            .cloned()
            .collect::<Vec<_>>();
        for edge_id in &involved {
            self.detach_edge(edge_id);
        }

        if self.edges.values().any(|edge| edge.touches(id)) {
            warn!(obj:% = id; "edge back-references were out of sync; sweeping dangling edges");
            let dangling = self
                .edges
                .values()
                .filter(|edge| edge.touches(id))
                .map(|edge| edge.id().clone())
                .collect::<Vec<_>>();
            for edge_id in &dangling {
                self.detach_edge(edge_id);
            }
        }

        debug!(obj:% = id, edges = involved.len(); "object removed");
        self.rebuild_locations();
        true
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> bool {
        if self.detach_edge(id).is_none() {
            return false;
        }
        self.rebuild_locations();
        true
    }

    /// Removes an arrow; its edge goes too when it was the last arrow.
    pub fn remove_arrow(&mut self, id: &ArrowId) -> bool {
        let Some(edge) = self.edges.values_mut().find(|edge| edge.arrow(id).is_some()) else {
            return false;
        };
        edge.remove_arrow(id);
        if edge.arrows().is_empty() {
            let edge_id = edge.id().clone();
            self.detach_edge(&edge_id);
        }
        self.rebuild_locations();
        true
    }

    /// Removes any entity, cascading as for the kind-specific removals.
    pub fn remove(&mut self, id: &EntityId) -> bool {
        match id {
            EntityId::Obj(id) => self.remove_object(id),
            EntityId::Edge(id) => self.remove_edge(id),
            EntityId::Arrow(id) => self.remove_arrow(id),
        }
    }

    pub fn rename_object(&mut self, id: &ObjId, name: impl Into<String>) -> bool {
        match self.objects.get_mut(id) {
            Some(obj) => {
                obj.set_name(name);
                true
            }
            None => false,
        }
    }

    pub fn rename_edge(&mut self, id: &EdgeId, name: impl Into<String>) -> bool {
        match self.edges.get_mut(id) {
            Some(edge) => {
                edge.set_name(name);
                true
            }
            None => false,
        }
    }

    pub(crate) fn shift_object(&mut self, id: &ObjId, delta: Point) -> bool {
        let Some(obj) = self.objects.get_mut(id) else {
            return false;
        };
        obj.shift(delta);
        self.rebuild_locations();
        true
    }

    pub(crate) fn set_object_position(&mut self, id: &ObjId, pos: Point) -> bool {
        let Some(obj) = self.objects.get_mut(id) else {
            return false;
        };
        obj.set_position(pos);
        self.rebuild_locations();
        true
    }

    fn rebuild_locations(&mut self) {
        let mut locations = HashMap::with_capacity(self.objects.len() + self.edges.len());
        for obj in self.objects.values() {
            locations.insert(self.loc_key(obj.position()), EntityId::Obj(obj.id().clone()));
        }
        for edge in self.edges.values() {
            if let Ok((from, to)) = self.endpoints(edge) {
                locations.insert(self.loc_key(from.midpoint(to)), EntityId::Edge(edge.id().clone()));
            }
        }
        self.locations = locations;
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Diagram {{")?;
        writeln!(f, "  Objects [")?;
        for obj in self.objects.values() {
            writeln!(f, "    {} {:?} at {}", obj.id(), obj.name(), obj.position())?;
        }
        writeln!(f, "  ]")?;
        writeln!(f, "  Edges [")?;
        for edge in self.edges.values() {
            writeln!(f, "    {} {} -> {}", edge.id(), edge.domain(), edge.codomain())?;
            for arrow in edge.arrows() {
                writeln!(f, "      {} {:?} {}", arrow.id(), arrow.name(), arrow.style())?;
            }
        }
        writeln!(f, "  ]")?;
        write!(f, "}}")
    }
}
