// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::Point;

use super::diagram::Diagram;
use super::edge::ArrowStyle;
use super::ids::{ArrowId, ObjId};

pub(crate) struct Chain {
    pub(crate) diagram: Diagram,
    pub(crate) a: ObjId,
    pub(crate) b: ObjId,
    pub(crate) c: ObjId,
    pub(crate) f: ArrowId,
    pub(crate) g: ArrowId,
}

/// `A(0,0) -f-> B(2,0) -g-> C(4,0)`.
pub(crate) fn chain() -> Chain {
    let mut diagram = Diagram::new();
    let a = diagram.add_object("A", Point::new(0.0, 0.0)).expect("A");
    let b = diagram.add_object("B", Point::new(2.0, 0.0)).expect("B");
    let c = diagram.add_object("C", Point::new(4.0, 0.0)).expect("C");
    let f = diagram
        .add_arrow("f", &a, &b, ArrowStyle::Solid)
        .expect("add f")
        .expect("f");
    let g = diagram
        .add_arrow("g", &b, &c, ArrowStyle::Solid)
        .expect("add g")
        .expect("g");
    Chain {
        diagram,
        a,
        b,
        c,
        f,
        g,
    }
}

/// Objects on a `size x size` grid with spacing 2, each joined to its right and lower
/// neighbour.
pub(crate) fn grid(size: usize) -> Diagram {
    let mut diagram = Diagram::new();
    let mut ids = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let pos = Point::new(col as f64 * 2.0, row as f64 * 2.0);
            ids.push(diagram.add_object(format!("{row}{col}"), pos).expect("grid cell"));
        }
    }
    for row in 0..size {
        for col in 0..size {
            let here = &ids[row * size + col];
            if col + 1 < size {
                let right = &ids[row * size + col + 1];
                diagram
                    .add_arrow("", here, right, ArrowStyle::Solid)
                    .expect("add")
                    .expect("right");
            }
            if row + 1 < size {
                let below = &ids[(row + 1) * size + col];
                diagram
                    .add_arrow("", here, below, ArrowStyle::Solid)
                    .expect("add")
                    .expect("below");
            }
        }
    }
    diagram
}
