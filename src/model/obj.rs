// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::error::{EndpointRole, ModelError};
use crate::geometry::{Bounds, Point};

use super::edge::Edge;
use super::ids::{EdgeId, ObjId};

/// A diagram node.
///
/// `incoming`/`outgoing` are back-references into the owning [`super::Diagram`]'s edge arena.
/// Every edge listed in `incoming` has this object as its codomain, every edge in `outgoing` as
/// its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Obj {
    id: ObjId,
    name: String,
    pos: Point,
    incoming: Vec<EdgeId>,
    outgoing: Vec<EdgeId>,
}

impl Obj {
    pub(crate) fn new(id: ObjId, name: impl Into<String>, pos: Point) -> Self {
        Self {
            id,
            name: name.into(),
            pos,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn id(&self) -> &ObjId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub fn bounds(&self, margin: f64) -> Bounds {
        Bounds::around(self.pos, margin)
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_position(&mut self, pos: Point) {
        self.pos = pos;
    }

    pub(crate) fn shift(&mut self, delta: Point) {
        self.pos = self.pos + delta;
    }

    pub fn add_incoming(&mut self, edge: &Edge) -> Result<(), ModelError> {
        if edge.codomain() != &self.id {
            return Err(ModelError::EndpointMismatch {
                edge: edge.id().clone(),
                obj: self.id.clone(),
                role: EndpointRole::Codomain,
            });
        }
        self.incoming.push(edge.id().clone());
        Ok(())
    }

    pub fn add_outgoing(&mut self, edge: &Edge) -> Result<(), ModelError> {
        if edge.domain() != &self.id {
            return Err(ModelError::EndpointMismatch {
                edge: edge.id().clone(),
                obj: self.id.clone(),
                role: EndpointRole::Domain,
            });
        }
        self.outgoing.push(edge.id().clone());
        Ok(())
    }

    pub(crate) fn remove_incoming(&mut self, edge_id: &EdgeId) {
        self.incoming.retain(|id| id != edge_id);
    }

    pub(crate) fn remove_outgoing(&mut self, edge_id: &EdgeId) {
        self.outgoing.retain(|id| id != edge_id);
    }
}

#[cfg(test)]
mod tests {
    use super::Obj;
    use crate::error::{EndpointRole, ModelError};
    use crate::geometry::Point;
    use crate::model::edge::Edge;
    use crate::model::{EdgeId, ObjId};

    fn oid(value: &str) -> ObjId {
        ObjId::new(value).expect("obj id")
    }

    #[test]
    fn back_references_reject_foreign_edges() {
        let mut a = Obj::new(oid("obj-a"), "A", Point::ORIGIN);
        let edge = Edge::new(
            EdgeId::new("edge-ab").expect("edge id"),
            "",
            oid("obj-a"),
            oid("obj-b"),
        );

        a.add_outgoing(&edge).expect("a is the domain");
        assert_eq!(a.outgoing(), &[edge.id().clone()]);

        let err = a.add_incoming(&edge).unwrap_err();
        assert_eq!(
            err,
            ModelError::EndpointMismatch {
                edge: edge.id().clone(),
                obj: oid("obj-a"),
                role: EndpointRole::Codomain,
            }
        );
        assert!(a.incoming().is_empty());

        a.remove_outgoing(edge.id());
        assert!(a.outgoing().is_empty());
    }

    #[test]
    fn shift_moves_relative_to_current_position() {
        let mut a = Obj::new(oid("obj-a"), "A", Point::new(1.0, 1.0));
        a.shift(Point::new(-1.0, 2.0));
        assert_eq!(a.position(), Point::new(0.0, 3.0));
        a.set_name("A'");
        assert_eq!(a.name(), "A'");
    }
}
