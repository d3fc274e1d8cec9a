// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smallvec::SmallVec;

use super::ids::{ArrowId, EdgeId, ObjId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArrowStyle {
    #[default]
    Solid,
    Dashed,
}

impl fmt::Display for ArrowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => f.write_str("solid"),
            Self::Dashed => f.write_str("dashed"),
        }
    }
}

/// One morphism on an [`Edge`]. Its domain and codomain are the edge's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrow {
    id: ArrowId,
    name: String,
    edge: EdgeId,
    style: ArrowStyle,
}

impl Arrow {
    pub fn id(&self) -> &ArrowId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning edge.
    pub fn edge(&self) -> &EdgeId {
        &self.edge
    }

    pub fn style(&self) -> ArrowStyle {
        self.style
    }
}

/// A directed connection between two objects, grouping parallel arrows.
///
/// An edge left without arrows by arrow removal is pruned by the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    id: EdgeId,
    name: String,
    domain: ObjId,
    codomain: ObjId,
    arrows: SmallVec<[Arrow; 2]>,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, name: impl Into<String>, domain: ObjId, codomain: ObjId) -> Self {
        Self {
            id,
            name: name.into(),
            domain,
            codomain,
            arrows: SmallVec::new(),
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &ObjId {
        &self.domain
    }

    pub fn codomain(&self) -> &ObjId {
        &self.codomain
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn arrow(&self, arrow_id: &ArrowId) -> Option<&Arrow> {
        self.arrows.iter().find(|a| &a.id == arrow_id)
    }

    pub fn arrow_index(&self, arrow_id: &ArrowId) -> Option<usize> {
        self.arrows.iter().position(|a| &a.id == arrow_id)
    }

    /// True if this edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: &ObjId, b: &ObjId) -> bool {
        (&self.domain == a && &self.codomain == b) || (&self.domain == b && &self.codomain == a)
    }

    pub fn touches(&self, obj: &ObjId) -> bool {
        &self.domain == obj || &self.codomain == obj
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn add(&mut self, name: impl Into<String>, style: ArrowStyle) -> ArrowId {
        let id = ArrowId::generate();
        self.arrows.push(Arrow {
            id: id.clone(),
            name: name.into(),
            edge: self.id.clone(),
            style,
        });
        id
    }

    pub(crate) fn remove_arrow(&mut self, arrow_id: &ArrowId) -> bool {
        let before = self.arrows.len();
        self.arrows.retain(|a| &a.id != arrow_id);
        self.arrows.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::{ArrowStyle, Edge};
    use crate::model::{EdgeId, ObjId};

    fn edge_ab() -> Edge {
        Edge::new(
            EdgeId::new("edge-ab").expect("edge id"),
            "",
            ObjId::new("obj-a").expect("obj id"),
            ObjId::new("obj-b").expect("obj id"),
        )
    }

    #[test]
    fn arrows_keep_insertion_order_and_owner() {
        let mut edge = edge_ab();
        let f = edge.add("f", ArrowStyle::Solid);
        let g = edge.add("g", ArrowStyle::Dashed);

        assert_eq!(edge.arrows().len(), 2);
        assert_eq!(edge.arrow_index(&g), Some(1));
        let arrow = edge.arrow(&f).expect("f");
        assert_eq!(arrow.edge(), edge.id());
        assert_eq!(arrow.style(), ArrowStyle::Solid);
        assert_eq!(edge.arrow(&g).expect("g").style().to_string(), "dashed");

        assert!(edge.remove_arrow(&f));
        assert!(!edge.remove_arrow(&f));
        assert_eq!(edge.arrow_index(&g), Some(0));
    }

    #[test]
    fn connects_ignores_direction() {
        let edge = edge_ab();
        let a = ObjId::new("obj-a").expect("obj id");
        let b = ObjId::new("obj-b").expect("obj id");
        let c = ObjId::new("obj-c").expect("obj id");
        assert!(edge.connects(&a, &b));
        assert!(edge.connects(&b, &a));
        assert!(!edge.connects(&a, &c));
        assert!(edge.touches(&b));
        assert!(!edge.touches(&c));
    }
}
