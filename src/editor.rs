// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive editing state.
//!
//! [`Editor`] owns the diagram, the selection, the current mode and the rename draft, and turns
//! [`Action`]s into commands according to the mode. Every change bumps `rev` and fires the
//! notification hook once.

use log::debug;

use crate::error::ModelError;
use crate::geometry::Point;
use crate::keymap::{Action, Direction, KeyPress, Mode};
use crate::model::diagram::{DEFAULT_BBOX_MARGIN, DEFAULT_PRECISION};
use crate::model::{Diagram, EntityId};
use crate::ops::{apply_command, Command, CommandSettings, Outcome};

pub const DEFAULT_STEP: f64 = 1.0;

/// Name of the object a fresh session starts with.
pub const STARTING_OBJECT_NAME: &str = "C";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    /// Length of one directional step, for moving and extending.
    pub step: f64,
    pub precision: u32,
    pub bbox_margin: f64,
    pub commands: CommandSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            precision: DEFAULT_PRECISION,
            bbox_margin: DEFAULT_BBOX_MARGIN,
            commands: CommandSettings::default(),
        }
    }
}

impl EditorSettings {
    pub fn empty_diagram(&self) -> Diagram {
        Diagram::new()
            .with_precision(self.precision)
            .with_bbox_margin(self.bbox_margin)
    }
}

type Hook = Box<dyn FnMut()>;

pub struct Editor {
    diagram: Diagram,
    selection: Vec<EntityId>,
    mode: Mode,
    draft: String,
    settings: EditorSettings,
    rev: u64,
    hook: Option<Hook>,
}

impl Editor {
    pub fn new(diagram: Diagram, settings: EditorSettings) -> Self {
        Self {
            diagram,
            selection: Vec::new(),
            mode: Mode::Selecting,
            draft: String::new(),
            settings,
            rev: 0,
            hook: None,
        }
    }

    /// A fresh session: one object named `C` at the origin, selected, ready to be renamed.
    pub fn starting(settings: EditorSettings) -> Self {
        let mut diagram = settings.empty_diagram();
        let selection = diagram
            .add_object(STARTING_OBJECT_NAME, Point::ORIGIN)
            .map(EntityId::Obj)
            .into_iter()
            .collect();
        Self {
            selection,
            mode: Mode::Renaming,
            draft: STARTING_OBJECT_NAME.to_owned(),
            ..Self::new(diagram, settings)
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn selection(&self) -> &[EntityId] {
        &self.selection
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The name being typed in `renaming` mode.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Bumped once per change to the diagram, selection, mode or draft.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Installs the "state changed" callback, replacing any previous one.
    pub fn set_hook(&mut self, hook: impl FnMut() + 'static) {
        self.hook = Some(Box::new(hook));
    }

    fn changed(&mut self) {
        self.rev = self.rev.wrapping_add(1);
        if let Some(hook) = self.hook.as_mut() {
            hook();
        }
    }

    /// Runs one command against the owned diagram and selection.
    pub fn apply(&mut self, command: &Command) -> Result<Outcome, ModelError> {
        let mut changed = false;
        let outcome = apply_command(
            &mut self.diagram,
            &mut self.selection,
            command,
            &self.settings.commands,
            &mut || changed = true,
        )?;
        if changed {
            self.changed();
        }
        Ok(outcome)
    }

    pub fn perform(&mut self, action: Action) -> Result<Outcome, ModelError> {
        match action {
            Action::ExtendOut(direction) => {
                let direction = self.step_vector(direction);
                self.apply(&Command::ExtendOut(direction))
            }
            Action::Step(direction) => self.step(direction),
            Action::SelectNext(direction) => self.select_next(direction.vector()),
            Action::ArrowSelectNext => self.apply(&Command::ArrowSelectNext),
            Action::DeleteSelected => self.apply(&Command::DeleteSelected),
            Action::EnterMode(mode) => Ok(self.set_mode(mode)),
            Action::ConfirmRename => self.confirm_rename(),
        }
    }

    fn step_vector(&self, direction: Direction) -> Point {
        direction.vector().scale(self.settings.step)
    }

    /// Moves the selected objects in `moving` mode, navigates in `selecting` mode, and does
    /// nothing while renaming.
    pub fn step(&mut self, direction: Direction) -> Result<Outcome, ModelError> {
        match self.mode {
            Mode::Moving => {
                let delta = self.step_vector(direction);
                self.apply(&Command::Move(delta))
            }
            Mode::Selecting => self.select_next(direction.vector()),
            Mode::Renaming => Ok(Outcome::Unchanged),
        }
    }

    /// Navigates the selection; with nothing selected, selects the first object instead.
    pub fn select_next(&mut self, direction: Point) -> Result<Outcome, ModelError> {
        if !self.selection.is_empty() {
            return self.apply(&Command::SelectNext(direction));
        }
        let Some(first) = self.diagram.first_object() else {
            return Ok(Outcome::Unchanged);
        };
        self.selection = vec![EntityId::Obj(first.id().clone())];
        self.changed();
        Ok(Outcome::Changed)
    }

    /// Switches mode. Entering `renaming` seeds the draft with the selected object's name;
    /// leaving it discards the draft.
    pub fn set_mode(&mut self, mode: Mode) -> Outcome {
        if self.mode == mode {
            return Outcome::Unchanged;
        }
        self.draft = match (mode, self.selection.as_slice()) {
            (Mode::Renaming, [EntityId::Obj(id)]) => self
                .diagram
                .object(id)
                .map(|obj| obj.name().to_owned())
                .unwrap_or_default(),
            _ => String::new(),
        };
        debug!(from:% = self.mode, to:% = mode; "mode changed");
        self.mode = mode;
        self.changed();
        Outcome::Changed
    }

    /// Renames the selected object to the draft and returns to `selecting`.
    pub fn confirm_rename(&mut self) -> Result<Outcome, ModelError> {
        if self.mode != Mode::Renaming {
            return Ok(Outcome::Unchanged);
        }
        let name = std::mem::take(&mut self.draft);
        self.apply(&Command::Rename(name))?;
        Ok(self.set_mode(Mode::Selecting))
    }

    /// Types into the rename draft: `Backspace` deletes, any single-character key is appended.
    /// Returns whether the press was used.
    pub fn edit_draft(&mut self, press: &KeyPress) -> bool {
        if self.mode != Mode::Renaming || press.ctrl {
            return false;
        }
        if press.key == "Backspace" {
            if self.draft.pop().is_none() {
                return false;
            }
        } else {
            let mut chars = press.key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => self.draft.push(ch),
                _ => return false,
            }
        }
        self.changed();
        true
    }

    pub fn select(&mut self, selection: Vec<EntityId>) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        self.changed();
    }

    pub fn clear_selection(&mut self) {
        self.select(Vec::new());
    }

    /// Drops every entity and returns to `selecting`; settings and the hook are kept.
    pub fn reset(&mut self) {
        self.diagram = self.settings.empty_diagram();
        self.selection.clear();
        self.mode = Mode::Selecting;
        self.draft.clear();
        self.changed();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{Editor, EditorSettings, STARTING_OBJECT_NAME};
    use crate::geometry::Point;
    use crate::keymap::{Action, Direction, KeyPress, Mode};
    use crate::model::EntityId;
    use crate::ops::Outcome;

    fn counting(editor: &mut Editor) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        editor.set_hook(move || seen.set(seen.get() + 1));
        count
    }

    #[test]
    fn starting_session_renames_the_origin_object() {
        let editor = Editor::starting(EditorSettings::default());
        assert_eq!(editor.mode(), Mode::Renaming);
        assert_eq!(editor.draft(), STARTING_OBJECT_NAME);
        let [EntityId::Obj(id)] = editor.selection() else {
            panic!("expected the starting object to be selected");
        };
        let obj = editor.diagram().object(id).expect("object");
        assert_eq!(obj.position(), Point::ORIGIN);
        assert_eq!(obj.name(), "C");
    }

    #[test]
    fn typing_and_confirming_renames_and_returns_to_selecting() {
        let mut editor = Editor::starting(EditorSettings::default());
        let count = counting(&mut editor);

        assert!(editor.edit_draft(&KeyPress::new("Backspace")));
        for key in ["X", "y"] {
            assert!(editor.edit_draft(&KeyPress::new(key)));
        }
        assert!(!editor.edit_draft(&KeyPress::new("ArrowLeft")));
        assert!(!editor.edit_draft(&KeyPress::new("a").with_ctrl()));
        assert_eq!(editor.draft(), "Xy");

        assert_eq!(editor.perform(Action::ConfirmRename), Ok(Outcome::Changed));
        assert_eq!(editor.mode(), Mode::Selecting);
        assert_eq!(editor.draft(), "");
        let Some(EntityId::Obj(id)) = editor.selection().first() else {
            panic!("selection kept");
        };
        assert_eq!(editor.diagram().object(id).expect("object").name(), "Xy");
        // three draft edits, the rename, the mode switch
        assert_eq!(count.get(), 5);
    }

    #[test]
    fn escape_discards_the_draft() {
        let mut editor = Editor::starting(EditorSettings::default());
        editor.edit_draft(&KeyPress::new("!"));
        assert_eq!(editor.perform(Action::EnterMode(Mode::Selecting)), Ok(Outcome::Changed));
        assert_eq!(editor.draft(), "");

        let id = editor.selection()[0].clone();
        let EntityId::Obj(id) = id else {
            panic!("object selected");
        };
        assert_eq!(editor.diagram().object(&id).expect("object").name(), "C");
        assert!(!editor.edit_draft(&KeyPress::new("z")));
    }

    #[test]
    fn steps_depend_on_mode() {
        let mut editor = Editor::starting(EditorSettings {
            step: 2.0,
            ..EditorSettings::default()
        });
        editor.set_mode(Mode::Moving);
        let EntityId::Obj(id) = editor.selection()[0].clone() else {
            panic!("object selected");
        };

        assert_eq!(editor.step(Direction::Right), Ok(Outcome::Changed));
        assert_eq!(editor.diagram().object(&id).expect("C").position(), Point::new(2.0, 0.0));

        editor.set_mode(Mode::Renaming);
        assert_eq!(editor.step(Direction::Right), Ok(Outcome::Unchanged));

        editor.set_mode(Mode::Selecting);
        let rev = editor.rev();
        // nothing else to navigate to
        assert_eq!(editor.step(Direction::Left), Ok(Outcome::Unchanged));
        assert_eq!(editor.rev(), rev);
    }

    #[test]
    fn select_next_with_empty_selection_picks_first_object() {
        let mut editor = Editor::starting(EditorSettings::default());
        editor.set_mode(Mode::Selecting);
        editor.clear_selection();
        assert!(editor.selection().is_empty());

        assert_eq!(editor.perform(Action::SelectNext(Direction::Right)), Ok(Outcome::Changed));
        assert_eq!(editor.selection().len(), 1);

        editor.reset();
        assert_eq!(editor.diagram().stats().objects, 0);
        assert_eq!(editor.perform(Action::Step(Direction::Up)), Ok(Outcome::Unchanged));
    }

    #[test]
    fn extend_uses_the_configured_step() {
        let mut editor = Editor::starting(EditorSettings {
            step: 3.0,
            ..EditorSettings::default()
        });
        editor.set_mode(Mode::Selecting);
        assert_eq!(editor.perform(Action::ExtendOut(Direction::Down)), Ok(Outcome::Changed));

        let [EntityId::Obj(id)] = editor.selection() else {
            panic!("new object selected");
        };
        let obj = editor.diagram().object(id).expect("object");
        assert_eq!(obj.position(), Point::new(0.0, 3.0));
    }

    #[test]
    fn entering_renaming_seeds_draft_only_for_single_object() {
        let mut editor = Editor::starting(EditorSettings::default());
        editor.set_mode(Mode::Selecting);
        editor.perform(Action::ExtendOut(Direction::Right)).expect("extend");
        editor.perform(Action::Step(Direction::Left)).expect("onto the edge");
        assert!(matches!(editor.selection(), [EntityId::Edge(_)]));

        editor.set_mode(Mode::Renaming);
        assert_eq!(editor.draft(), "");
        // renaming an edge is refused but still leaves renaming
        assert_eq!(editor.confirm_rename(), Ok(Outcome::Changed));
        assert_eq!(editor.mode(), Mode::Selecting);
    }
}
