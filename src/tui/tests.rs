// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use rstest::rstest;

use super::{draw, footer_brand_line, footer_line, key_press, view_bounds, App};
use crate::editor::{Editor, EditorSettings};
use crate::geometry::Point;
use crate::keymap::{Keymap, Mode};
use crate::model::{EntityId, ObjId};

fn line_to_string(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
}

fn app() -> App {
    App::new(Editor::starting(EditorSettings::default()), Keymap::defaults())
}

fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_key(KeyEvent::new(code, modifiers));
}

fn render(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}

#[rstest]
#[case::plain_char(KeyCode::Char('l'), KeyModifiers::NONE, "l", false, false)]
#[case::upper_char_is_shifted(KeyCode::Char('L'), KeyModifiers::NONE, "L", true, false)]
#[case::shift_arrow(KeyCode::Right, KeyModifiers::SHIFT, "ArrowRight", true, false)]
#[case::ctrl_char(KeyCode::Char('z'), KeyModifiers::CONTROL, "z", false, true)]
#[case::escape(KeyCode::Esc, KeyModifiers::NONE, "Escape", false, false)]
#[case::back_tab(KeyCode::BackTab, KeyModifiers::NONE, "Tab", true, false)]
#[case::function_key(KeyCode::F(5), KeyModifiers::NONE, "F5", false, false)]
fn key_events_translate_to_presses(
    #[case] code: KeyCode,
    #[case] modifiers: KeyModifiers,
    #[case] key: &str,
    #[case] shift: bool,
    #[case] ctrl: bool,
) {
    let press = key_press(&KeyEvent::new(code, modifiers)).expect("named key");
    assert_eq!(press.key, key);
    assert_eq!(press.shift, shift);
    assert_eq!(press.ctrl, ctrl);
}

#[test]
fn unnamed_keys_are_dropped() {
    assert!(key_press(&KeyEvent::new(KeyCode::Insert, KeyModifiers::NONE)).is_none());
    assert!(key_press(&KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE)).is_none());
}

#[test]
fn ctrl_q_quits_without_dispatching() {
    let mut app = app();
    let rev = app.editor.rev();
    press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert!(app.should_quit);
    assert_eq!(app.editor.rev(), rev);
}

#[test]
fn editor_changes_mark_the_view_dirty() {
    let mut app = app();
    app.dirty.set(false);

    // typed into the starting object's name
    press(&mut app, KeyCode::Char('D'), KeyModifiers::SHIFT);
    assert!(app.dirty.replace(false));
    assert_eq!(app.editor.draft(), "CD");

    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    assert!(app.dirty.replace(false));
    assert_eq!(app.editor.mode(), Mode::Selecting);

    // unbound in selecting mode
    press(&mut app, KeyCode::Char('z'), KeyModifiers::NONE);
    assert!(!app.dirty.get());

    press(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
    assert!(app.dirty.get());
    assert_eq!(app.editor.diagram().stats().objects, 2);
}

#[test]
fn model_errors_land_in_the_status_line() {
    let mut app = app();
    press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
    press(&mut app, KeyCode::Char('m'), KeyModifiers::NONE);
    assert_eq!(app.editor.mode(), Mode::Moving);

    let ghost = ObjId::new("obj-ghost").expect("id");
    app.editor.select(vec![EntityId::Obj(ghost)]);
    press(&mut app, KeyCode::Char('l'), KeyModifiers::NONE);
    let status = app.status.clone().expect("status");
    assert!(status.contains("ghost"), "{status}");

    let footer = line_to_string(&footer_line(&app.editor, app.status.as_deref()));
    assert!(footer.contains("ghost"));

    // the next key clears it
    press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
    assert!(app.status.is_none());
}

#[test]
fn footer_shows_mode_selection_and_counts() {
    let mut editor = Editor::starting(EditorSettings::default());
    let footer = line_to_string(&footer_line(&editor, None));
    assert!(footer.contains("renaming"), "{footer}");
    assert!(footer.contains("name: C_"), "{footer}");
    assert!(footer.contains("1 objects, 0 edges, 0 arrows"), "{footer}");

    editor.set_mode(Mode::Selecting);
    let footer = line_to_string(&footer_line(&editor, None));
    assert!(footer.contains("selecting"), "{footer}");
    assert!(footer.contains("| C |"), "{footer}");

    editor.clear_selection();
    let footer = line_to_string(&footer_line(&editor, None));
    assert!(footer.contains("nothing selected"), "{footer}");

    assert_eq!(line_to_string(&footer_brand_line()), "commute");
}

#[test]
fn view_bounds_flip_the_y_axis() {
    let mut editor = Editor::starting(EditorSettings::default());
    editor.set_mode(Mode::Selecting);
    editor
        .apply(&crate::ops::Command::ExtendOut(Point::new(0.0, 2.0)))
        .expect("extend");

    let (x, y) = view_bounds(editor.diagram());
    let margin = editor.diagram().bbox_margin();
    assert!((x[0] - (-margin - 1.0)).abs() < 1e-9);
    assert!((x[1] - (margin + 1.0)).abs() < 1e-9);
    // diagram y runs 0..2 downward, so the canvas shows -2..0
    assert!((y[0] - (-2.0 - margin - 1.0)).abs() < 1e-9);
    assert!((y[1] - (margin + 1.0)).abs() < 1e-9);
}

#[test]
fn draw_renders_names_mode_and_brand() {
    let mut app = app();
    press(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
    press(&mut app, KeyCode::Char('A'), KeyModifiers::SHIFT);
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

    let screen = render(&app, 60, 16);
    assert!(screen.contains('A'), "{screen}");
    assert!(screen.contains("selecting"), "{screen}");
    assert!(screen.contains("commute"), "{screen}");
}
