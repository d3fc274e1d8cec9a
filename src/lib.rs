// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Commute: a keyboard-driven editor for commutative diagrams.
//!
//! The editing core ([`model`], [`nav`], [`ops`], [`keymap`], [`editor`]) has no terminal
//! dependency; [`tui`] is a thin ratatui shell on top of it.

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod keymap;
pub mod model;
pub mod nav;
pub mod ops;
pub mod tui;
