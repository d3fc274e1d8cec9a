// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Shifts every selected object by `delta`; other selected kinds are skipped.
///
/// The move is refused as a whole when it would leave two objects or edges on one position.
pub fn move_selected(
    diagram: &mut Diagram,
    selection: &[EntityId],
    delta: Point,
) -> Result<Outcome, ModelError> {
    if delta.is_zero() {
        return Ok(Outcome::Unchanged);
    }

    let mut objs = IndexSet::new();
    for id in selection {
        if let EntityRef::Obj(obj) = diagram.get(id)? {
            objs.insert(obj.id().clone());
        }
    }
    if objs.is_empty() {
        return Ok(Outcome::Unchanged);
    }

    let mut moved = diagram.clone();
    for id in &objs {
        moved.shift_object(id, delta);
    }
    if moved.has_overlaps() {
        debug!(delta:% = delta, objects = objs.len(); "move rejected: target position occupied");
        return Ok(Outcome::Unchanged);
    }

    *diagram = moved;
    Ok(Outcome::Changed)
}

/// Grows the diagram outward from the first selected entity.
///
/// An object gains a neighbour at `position + direction` (reusing an object already there),
/// joined by an arrow; the neighbour becomes the selection. An edge extends both of its endpoints
/// the same way, joins the two results with an arrow and selects that arrow, unless `direction`
/// runs within `parallel_threshold` radians of the edge. Either all of it applies or nothing.
pub fn extend_out(
    diagram: &mut Diagram,
    selection: &mut Vec<EntityId>,
    direction: Point,
    parallel_threshold: f64,
) -> Result<Outcome, ModelError> {
    let Some(first) = selection.first() else {
        return Ok(Outcome::Unchanged);
    };

    let mut draft = diagram.clone();
    let selected = match diagram.get(first)? {
        EntityRef::Obj(obj) => extend_object(&mut draft, obj.id(), direction)?.map(EntityId::Obj),
        EntityRef::Edge(edge) => {
            extend_edge(&mut draft, edge, direction, parallel_threshold)?.map(EntityId::Arrow)
        }
        EntityRef::Arrow(_) => None,
    };
    let Some(selected) = selected else {
        return Ok(Outcome::Unchanged);
    };

    *diagram = draft;
    *selection = vec![selected];
    Ok(Outcome::Changed)
}

fn extend_object(
    diagram: &mut Diagram,
    source: &ObjId,
    direction: Point,
) -> Result<Option<ObjId>, ModelError> {
    let Some(obj) = diagram.object(source) else {
        return Err(ModelError::UnknownEntity(EntityId::Obj(source.clone())));
    };
    let target = obj.position() + direction;

    let target_id = match diagram.occupant(target).cloned() {
        Some(EntityId::Obj(existing)) => existing,
        Some(other) => {
            debug!(
                position:% = target, occupant:% = other;
                "extend rejected: target is not an object"
            );
            return Ok(None);
        }
        None => match diagram.add_object(NEW_OBJECT_NAME, target) {
            Some(created) => created,
            None => return Ok(None),
        },
    };

    Ok(diagram
        .add_arrow("", source, &target_id, ArrowStyle::default())?
        .map(|_| target_id))
}

fn extend_edge(
    diagram: &mut Diagram,
    edge: &Edge,
    direction: Point,
    parallel_threshold: f64,
) -> Result<Option<ArrowId>, ModelError> {
    let (from, to) = diagram.endpoints(edge)?;
    let skew = angle(direction, to - from);
    if skew.is_nan() || skew < parallel_threshold {
        debug!(edge:% = edge.id(), skew = skew; "extend rejected: direction parallel to edge");
        return Ok(None);
    }

    let Some(domain) = extend_object(diagram, edge.domain(), direction)? else {
        return Ok(None);
    };
    let Some(codomain) = extend_object(diagram, edge.codomain(), direction)? else {
        return Ok(None);
    };
    diagram.add_arrow("", &domain, &codomain, ArrowStyle::default())
}

/// Removes every selected entity (cascading) and clears the selection.
pub fn delete_selected(diagram: &mut Diagram, selection: &mut Vec<EntityId>) -> Outcome {
    if selection.is_empty() {
        return Outcome::Unchanged;
    }
    // ids already swept away by an earlier cascade report false here
    let removed = selection.iter().filter(|id| diagram.remove(id)).count();
    debug!(selected = selection.len(), removed = removed; "selection deleted");
    selection.clear();
    Outcome::Changed
}

pub fn rename(diagram: &mut Diagram, selection: &[EntityId], name: &str) -> Outcome {
    let [EntityId::Obj(id)] = selection else {
        return Outcome::Unchanged;
    };
    Outcome::from_changed(diagram.rename_object(id, name))
}

pub fn select_next(
    diagram: &Diagram,
    selection: &mut Vec<EntityId>,
    direction: Point,
    navigator: &Navigator,
) -> Result<Outcome, ModelError> {
    if selection.is_empty() {
        return Ok(Outcome::Unchanged);
    }
    let next = navigator.next(diagram, selection, direction)?;
    if next == *selection {
        return Ok(Outcome::Unchanged);
    }
    *selection = next;
    Ok(Outcome::Changed)
}

pub fn arrow_select_next(
    diagram: &Diagram,
    selection: &mut Vec<EntityId>,
) -> Result<Outcome, ModelError> {
    let Some(next) = nav::arrow_select_next(diagram, selection)? else {
        return Ok(Outcome::Unchanged);
    };
    let changed = selection.first() != Some(&next);
    *selection = vec![next];
    Ok(Outcome::from_changed(changed))
}
