// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! A thin ratatui + crossterm shell around an [`Editor`]: key events are translated into
//! [`KeyPress`]es and dispatched through the keymap, and the diagram is redrawn on a canvas
//! whenever the editor reports a change.

use std::{cell::Cell, error::Error, io, rc::Rc, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Rectangle},
        Block, Borders, Paragraph,
    },
};

use crate::editor::Editor;
use crate::keymap::{dispatch, KeyPress, Keymap, Mode};
use crate::model::{ArrowStyle, Diagram, EntityId, EntityRef};

const FOCUS_COLOR: Color = Color::LightGreen;
const OBJECT_COLOR: Color = Color::White;
const EDGE_COLOR: Color = Color::Gray;
const DASHED_EDGE_COLOR: Color = Color::DarkGray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "commute";
// Extra room around the diagram, in diagram units.
const VIEW_PADDING: f64 = 1.0;

/// Runs the interactive terminal UI until `ctrl+q`.
pub fn run(editor: Editor, keymap: Keymap) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(editor, keymap);

    while !app.should_quit {
        if app.dirty.replace(false) {
            terminal.draw(|frame| draw(frame, &app))?;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(..) => app.dirty.set(true),
                _ => {}
            }
        }
    }

    Ok(())
}

struct App {
    editor: Editor,
    keymap: Keymap,
    dirty: Rc<Cell<bool>>,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(mut editor: Editor, keymap: Keymap) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let hook_dirty = Rc::clone(&dirty);
        editor.set_hook(move || hook_dirty.set(true));
        Self {
            editor,
            keymap,
            dirty,
            status: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        let Some(press) = key_press(&key) else {
            return;
        };

        if self.status.take().is_some() {
            self.dirty.set(true);
        }
        if let Err(err) = dispatch(&self.keymap, &mut self.editor, &press) {
            warn!(combo:% = press.combo(), err:% = err; "key handler failed");
            self.status = Some(err.to_string());
            self.dirty.set(true);
        }
    }
}

/// Translates a crossterm key event into a web-style key press. Keys without a name here are
/// dropped.
fn key_press(event: &KeyEvent) -> Option<KeyPress> {
    let key = match event.code {
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Left => "ArrowLeft".to_owned(),
        KeyCode::Right => "ArrowRight".to_owned(),
        KeyCode::Up => "ArrowUp".to_owned(),
        KeyCode::Down => "ArrowDown".to_owned(),
        KeyCode::Enter => "Enter".to_owned(),
        KeyCode::Esc => "Escape".to_owned(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_owned(),
        KeyCode::Delete => "Delete".to_owned(),
        KeyCode::Backspace => "Backspace".to_owned(),
        KeyCode::Home => "Home".to_owned(),
        KeyCode::End => "End".to_owned(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };
    let shift = event.modifiers.contains(KeyModifiers::SHIFT)
        || event.code == KeyCode::BackTab
        || matches!(event.code, KeyCode::Char(ch) if ch.is_uppercase());
    Some(KeyPress {
        key,
        shift,
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
    })
}

fn draw(frame: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());

    frame.render_widget(diagram_canvas(&app.editor), layout[0]);
    frame.render_widget(Paragraph::new(footer_line(&app.editor, app.status.as_deref())), layout[1]);
    frame.render_widget(
        Paragraph::new(footer_brand_line()).alignment(Alignment::Right),
        layout[1],
    );
}

/// Canvas x/y bounds for the diagram. The canvas y axis points up, so diagram y is negated.
fn view_bounds(diagram: &Diagram) -> ([f64; 2], [f64; 2]) {
    let bounds = diagram.bounds();
    (
        [bounds.min_x() - VIEW_PADDING, bounds.max_x() + VIEW_PADDING],
        [-bounds.max_y() - VIEW_PADDING, -bounds.min_y() + VIEW_PADDING],
    )
}

fn diagram_canvas(editor: &Editor) -> impl Widget + '_ {
    let diagram = editor.diagram();
    let selection = editor.selection();
    let (x_bounds, y_bounds) = view_bounds(diagram);
    let title = format!(" {} ", editor.mode());

    Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            for edge in diagram.edges() {
                let Ok((from, to)) = diagram.endpoints(edge) else {
                    continue;
                };
                let focused = selection.contains(&EntityId::Edge(edge.id().clone()))
                    || edge
                        .arrows()
                        .iter()
                        .any(|arrow| selection.contains(&EntityId::Arrow(arrow.id().clone())));
                let dashed = edge
                    .arrows()
                    .iter()
                    .all(|arrow| arrow.style() == ArrowStyle::Dashed);
                let color = match (focused, dashed) {
                    (true, _) => FOCUS_COLOR,
                    (false, true) => DASHED_EDGE_COLOR,
                    (false, false) => EDGE_COLOR,
                };
                ctx.draw(&CanvasLine {
                    x1: from.x(),
                    y1: -from.y(),
                    x2: to.x(),
                    y2: -to.y(),
                    color,
                });

                let label = edge
                    .arrows()
                    .iter()
                    .map(|arrow| arrow.name())
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<_>>()
                    .join(",");
                if !label.is_empty() {
                    let mid = from.midpoint(to);
                    ctx.print(mid.x(), -mid.y(), Span::styled(label, Style::default().fg(color)));
                }
            }

            ctx.layer();
            let margin = diagram.bbox_margin();
            for obj in diagram.objects() {
                let pos = obj.position();
                let focused = selection.contains(&EntityId::Obj(obj.id().clone()));
                let color = if focused { FOCUS_COLOR } else { OBJECT_COLOR };
                if focused {
                    ctx.draw(&Rectangle {
                        x: pos.x() - margin,
                        y: -pos.y() - margin,
                        width: margin * 2.0,
                        height: margin * 2.0,
                        color,
                    });
                }
                let name = if obj.name().is_empty() { "·" } else { obj.name() };
                ctx.print(
                    pos.x(),
                    -pos.y(),
                    Span::styled(name.to_owned(), Style::default().fg(color)),
                );
            }
        })
}

fn footer_line(editor: &Editor, status: Option<&str>) -> Line<'static> {
    let label = Style::default().fg(FOOTER_LABEL_COLOR);
    let key = Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD);
    let stats = editor.diagram().stats();
    let diagram = editor.diagram();

    let mut spans = vec![
        Span::styled(format!(" {} ", editor.mode()), key),
        Span::styled(" | ", label),
    ];
    if editor.mode() == Mode::Renaming {
        spans.push(Span::styled("name: ", label));
        spans.push(Span::styled(format!("{}_", editor.draft()), key));
    } else {
        let selected = editor
            .selection()
            .iter()
            .map(|id| match diagram.get(id) {
                Ok(EntityRef::Obj(obj)) if !obj.name().is_empty() => obj.name().to_owned(),
                _ => id.to_string(),
            })
            .collect::<Vec<_>>();
        let selected = if selected.is_empty() {
            "nothing selected".to_owned()
        } else {
            selected.join(", ")
        };
        spans.push(Span::styled(selected, label));
    }
    spans.push(Span::styled(
        format!(
            " | {} objects, {} edges, {} arrows",
            stats.objects, stats.edges, stats.arrows
        ),
        label,
    ));
    if let Some(status) = status {
        spans.push(Span::styled(format!(" | {status}"), label));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
