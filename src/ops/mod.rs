// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing commands.
//!
//! Every command takes the diagram and the current selection, mutates them in place and reports
//! whether anything changed. Rejected intent (parallel extrusion, renaming a multi-selection,
//! nothing ahead to navigate to) is [`Outcome::Unchanged`], never an error. `Err` is reserved for
//! ids that do not resolve and other broken model invariants.

use std::fmt;

use indexmap::IndexSet;
use log::debug;

use crate::error::ModelError;
use crate::geometry::{angle, Point};
use crate::model::{ArrowId, ArrowStyle, Diagram, Edge, EntityId, EntityRef, ObjId};
use crate::nav::{self, Navigator};

pub const DEFAULT_PARALLEL_THRESHOLD: f64 = 0.1;

/// Name given to objects created by extension.
pub const NEW_OBJECT_NAME: &str = "new";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Shift every selected object by the delta.
    Move(Point),
    /// Grow the diagram from the first selected object or edge.
    ExtendOut(Point),
    DeleteSelected,
    /// Rename a singly selected object.
    Rename(String),
    SelectNext(Point),
    ArrowSelectNext,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(delta) => write!(f, "MOVE {delta}"),
            Self::ExtendOut(direction) => write!(f, "EXTEND_OUT {direction}"),
            Self::DeleteSelected => f.write_str("DELETE_SELECTED"),
            Self::Rename(name) => write!(f, "RENAME {name:?}"),
            Self::SelectNext(direction) => write!(f, "SELECT_NEXT {direction}"),
            Self::ArrowSelectNext => f.write_str("ARROW_SELECT_NEXT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

impl Outcome {
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }

    pub fn is_changed(self) -> bool {
        self == Self::Changed
    }
}

/// Tunables shared by the commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandSettings {
    pub navigator: Navigator,
    /// Edge extension is refused when the requested direction is within this many radians of
    /// the edge's own direction.
    pub parallel_threshold: f64,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            navigator: Navigator::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Applies one command, then calls `notify` once if it changed the diagram or the selection.
///
/// A command that fails leaves both untouched and does not notify.
pub fn apply_command(
    diagram: &mut Diagram,
    selection: &mut Vec<EntityId>,
    command: &Command,
    settings: &CommandSettings,
    notify: &mut dyn FnMut(),
) -> Result<Outcome, ModelError> {
    let outcome = match command {
        Command::Move(delta) => move_selected(diagram, selection, *delta)?,
        Command::ExtendOut(direction) => {
            extend_out(diagram, selection, *direction, settings.parallel_threshold)?
        }
        Command::DeleteSelected => delete_selected(diagram, selection),
        Command::Rename(name) => rename(diagram, selection, name),
        Command::SelectNext(direction) => {
            select_next(diagram, selection, *direction, &settings.navigator)?
        }
        Command::ArrowSelectNext => arrow_select_next(diagram, selection)?,
    };

    debug!(command:% = command, outcome:? = outcome; "command applied");
    if outcome.is_changed() {
        notify();
    }
    Ok(outcome)
}

// Per-command implementations used by `apply_command`.
include!("ops_impl.rs");
