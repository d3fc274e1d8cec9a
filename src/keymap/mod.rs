// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Modes, key bindings and dispatch.
//!
//! A binding is written `"[mask:]combo"`. The mask is a bit set over the modes (`selecting=1`,
//! `renaming=2`, `moving=4`); without one the binding applies in every mode. A combo is the key
//! name prefixed by `ctrl+` and then `shift+` when those modifiers are held, lower-cased. Arrow
//! keys are rebound to their vi letters before the combo is formed.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::editor::Editor;
use crate::error::{KeymapError, ModelError};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Selecting,
    Renaming,
    Moving,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Selecting, Mode::Renaming, Mode::Moving];

    pub fn bit(self) -> u8 {
        match self {
            Self::Selecting => 1,
            Self::Renaming => 2,
            Self::Moving => 4,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Selecting => 0,
            Self::Renaming => 1,
            Self::Moving => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selecting => "selecting",
            Self::Renaming => "renaming",
            Self::Moving => "moving",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| KeymapError::UnknownAction(format!("mode:{s}")))
    }
}

/// Set of modes a binding applies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeMask(u8);

impl ModeMask {
    pub const ALL: ModeMask = ModeMask(0b111);

    /// Keeps only the bits of defined modes; `None` if none remain.
    pub fn new(bits: u8) -> Option<Self> {
        let bits = bits & Self::ALL.0;
        (bits != 0).then_some(Self(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, mode: Mode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn modes(self) -> impl Iterator<Item = Mode> {
        Mode::ALL.into_iter().filter(move |mode| self.contains(*mode))
    }
}

/// A key as delivered by the input layer, with web-style key names (`"ArrowRight"`, `"Enter"`,
/// `"Escape"`, `"L"`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift: false,
            ctrl: false,
        }
    }

    pub fn shifted(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// The normalized combo this press looks up.
    pub fn combo(&self) -> String {
        let mut combo = String::new();
        if self.ctrl {
            combo.push_str("ctrl+");
        }
        if self.shift {
            combo.push_str("shift+");
        }
        combo.push_str(&rebind(&self.key).to_lowercase());
        combo
    }
}

/// Directional keys and their vi-style equivalents.
pub const REBIND: &[(&str, &str)] = &[
    ("ArrowRight", "l"),
    ("ArrowLeft", "h"),
    ("ArrowUp", "k"),
    ("ArrowDown", "j"),
];

pub fn rebind(key: &str) -> &str {
    REBIND
        .iter()
        .find(|(from, _)| *from == key)
        .map_or(key, |(_, to)| to)
}

/// Screen directions; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownRight,
    DownLeft,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    pub fn vector(self) -> Point {
        let (x, y) = match self {
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::UpLeft => (-1.0, -1.0),
            Self::UpRight => (1.0, -1.0),
            Self::DownRight => (1.0, 1.0),
            Self::DownLeft => (-1.0, 1.0),
        };
        Point::new(x, y)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::UpLeft => "up-left",
            Self::UpRight => "up-right",
            Self::DownRight => "down-right",
            Self::DownLeft => "down-left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s)
            .ok_or_else(|| KeymapError::UnknownAction(s.to_owned()))
    }
}

/// What a binding does. See [`Editor::perform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ExtendOut(Direction),
    /// Moves the selected objects in `moving` mode, navigates in `selecting` mode.
    Step(Direction),
    SelectNext(Direction),
    ArrowSelectNext,
    DeleteSelected,
    EnterMode(Mode),
    ConfirmRename,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtendOut(direction) => write!(f, "extend-out:{direction}"),
            Self::Step(direction) => write!(f, "step:{direction}"),
            Self::SelectNext(direction) => write!(f, "select-next:{direction}"),
            Self::ArrowSelectNext => f.write_str("arrow-select-next"),
            Self::DeleteSelected => f.write_str("delete-selected"),
            Self::EnterMode(mode) => write!(f, "mode:{mode}"),
            Self::ConfirmRename => f.write_str("confirm-rename"),
        }
    }
}

impl FromStr for Action {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || KeymapError::UnknownAction(s.to_owned());
        match s.split_once(':') {
            Some(("extend-out", direction)) => {
                direction.parse().map(Self::ExtendOut).map_err(|_| unknown())
            }
            Some(("step", direction)) => direction.parse().map(Self::Step).map_err(|_| unknown()),
            Some(("select-next", direction)) => {
                direction.parse().map(Self::SelectNext).map_err(|_| unknown())
            }
            Some(("mode", mode)) => mode.parse().map(Self::EnterMode).map_err(|_| unknown()),
            Some(_) => Err(unknown()),
            None => match s {
                "arrow-select-next" => Ok(Self::ArrowSelectNext),
                "delete-selected" => Ok(Self::DeleteSelected),
                "confirm-rename" => Ok(Self::ConfirmRename),
                _ => Err(unknown()),
            },
        }
    }
}

pub const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    ("1:shift+l", "extend-out:right"),
    ("1:shift+h", "extend-out:left"),
    ("1:shift+k", "extend-out:up"),
    ("1:shift+j", "extend-out:down"),
    ("1:shift+u", "extend-out:up-left"),
    ("1:shift+i", "extend-out:up-right"),
    ("1:shift+m", "extend-out:down-right"),
    ("1:shift+n", "extend-out:down-left"),
    ("5:h", "step:left"),
    ("5:l", "step:right"),
    ("5:k", "step:up"),
    ("5:j", "step:down"),
    ("1:Tab", "select-next:right"),
    ("2:Enter", "confirm-rename"),
    ("Delete", "delete-selected"),
    ("Escape", "mode:selecting"),
    ("5:r", "mode:renaming"),
    ("1:m", "mode:moving"),
    ("1:]", "arrow-select-next"),
];

/// A parsed `"[mask:]combo"` binding string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub mask: ModeMask,
    pub combo: String,
}

impl FromStr for Binding {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mask, combo) = match s.split_once(':') {
            Some((prefix, combo))
                if !combo.is_empty() && prefix.chars().all(|ch| ch.is_ascii_digit()) =>
            {
                (parse_mask(s, prefix)?, combo)
            }
            _ => (ModeMask::ALL, s),
        };
        if combo.is_empty() {
            return Err(KeymapError::EmptyCombo);
        }
        Ok(Self {
            mask,
            combo: combo.to_lowercase(),
        })
    }
}

fn parse_mask(binding: &str, prefix: &str) -> Result<ModeMask, KeymapError> {
    let bad = || KeymapError::BadMask {
        binding: binding.to_owned(),
        mask: prefix.to_owned(),
    };
    let bits = prefix.parse::<u32>().map_err(|_| bad())?;
    if bits > u32::from(ModeMask::ALL.bits()) {
        warn!(
            binding = binding, mask = bits;
            "mode mask covers undefined modes; extra bits ignored"
        );
    }
    ModeMask::new((bits & u32::from(ModeMask::ALL.bits())) as u8).ok_or_else(bad)
}

/// Per-mode `combo -> action` tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keymap {
    tables: [HashMap<String, Action>; 3],
}

impl Keymap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in bindings.
    pub fn defaults() -> Self {
        let mut keymap = Self::empty();
        for (binding, action) in DEFAULT_BINDINGS {
            if let Err(err) = keymap.bind_named(binding, action) {
                warn!(binding = *binding, err:% = err; "skipping built-in binding");
            }
        }
        keymap
    }

    /// Registers `action` for every mode in the binding's mask, replacing earlier bindings of the
    /// same combo.
    pub fn bind(&mut self, binding: &str, action: Action) -> Result<(), KeymapError> {
        let Binding { mask, combo } = binding.parse()?;
        for mode in mask.modes() {
            self.tables[mode.index()].insert(combo.clone(), action);
        }
        Ok(())
    }

    pub fn bind_named(&mut self, binding: &str, action: &str) -> Result<(), KeymapError> {
        self.bind(binding, action.parse()?)
    }

    pub fn lookup(&self, mode: Mode, combo: &str) -> Option<Action> {
        self.tables[mode.index()].get(combo).copied()
    }

    pub fn resolve(&self, mode: Mode, press: &KeyPress) -> Option<Action> {
        self.lookup(mode, &press.combo())
    }

    /// Bindings active in `mode`, sorted by combo.
    pub fn bindings(&self, mode: Mode) -> Vec<(&str, Action)> {
        let mut bindings = self.tables[mode.index()]
            .iter()
            .map(|(combo, action)| (combo.as_str(), *action))
            .collect::<Vec<_>>();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }
}

/// Routes one key press to the editor.
///
/// Returns whether the press was consumed. A press with no binding in the current mode is
/// ignored, except in `renaming` mode where it edits the name draft.
pub fn dispatch(
    keymap: &Keymap,
    editor: &mut Editor,
    press: &KeyPress,
) -> Result<bool, ModelError> {
    let mode = editor.mode();
    if let Some(action) = keymap.resolve(mode, press) {
        debug!(combo:% = press.combo(), action:% = action, mode:% = mode; "key dispatched");
        editor.perform(action)?;
        return Ok(true);
    }
    if mode == Mode::Renaming {
        return Ok(editor.edit_draft(press));
    }
    Ok(false)
}
