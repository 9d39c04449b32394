//! Search view: type a word, pick a suggestion, look it up.
//!
//! Keystrokes feed the [`SearchController`]; validation and lookups run in
//! the background and are drained on every tick. Enter only starts a lookup
//! once the typed word has been confirmed by the suggestion service.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use crate::core::models::WordEntry;
use crate::core::search::{Admission, PipelineConfig, SearchController, SearchValidationPipeline};
use crate::tui::services::Services;
use crate::tui::widgets::input_buffer::InputBuffer;

/// Suggestions listed below the input at most.
const MAX_VISIBLE_SUGGESTIONS: usize = 8;

pub struct SearchViewState {
    controller: SearchController,
    input: InputBuffer,
    /// Highlighted suggestion, if the user has moved into the list.
    highlighted: Option<usize>,
}

impl SearchViewState {
    pub fn new(services: &Services) -> Self {
        Self {
            controller: SearchController::new(
                PipelineConfig::from(&services.config.search),
                services.suggester.clone(),
                services.definitions.clone(),
                services.history.clone(),
            ),
            input: InputBuffer::new(),
            highlighted: None,
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    /// Drain finished requests and settle typed input. Call from on_tick.
    pub fn poll(&mut self) {
        self.controller.tick();
        let count = self.visible_suggestions().len();
        self.highlighted = match self.highlighted {
            Some(_) if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.input.insert_char(c);
                self.on_edit();
                true
            }
            (_, KeyCode::Backspace) => {
                self.input.backspace();
                self.on_edit();
                true
            }
            (_, KeyCode::Delete) => {
                self.input.delete();
                self.on_edit();
                true
            }
            (_, KeyCode::Left) => {
                self.input.move_left();
                true
            }
            (_, KeyCode::Right) => {
                self.input.move_right();
                true
            }
            (_, KeyCode::Home) => {
                self.input.move_home();
                true
            }
            (_, KeyCode::End) => {
                self.input.move_end();
                true
            }
            (_, KeyCode::Down) => self.move_highlight(1),
            (_, KeyCode::Up) => self.move_highlight(-1),
            (KeyModifiers::NONE, KeyCode::Tab) => {
                // Complete with the highlighted (or first) suggestion.
                let index = self.highlighted.unwrap_or(0);
                self.accept_suggestion(index)
            }
            (_, KeyCode::Enter) => {
                if let Some(index) = self.highlighted {
                    self.accept_suggestion(index);
                } else if !self.controller.search() {
                    log::debug!("Search not admitted for '{}'", self.input.text());
                }
                true
            }
            (_, KeyCode::Esc) => {
                if self.highlighted.take().is_none() && !self.input.text().is_empty() {
                    self.input.clear();
                    self.on_edit();
                }
                true
            }
            _ => false,
        }
    }

    fn on_edit(&mut self) {
        self.highlighted = None;
        self.controller.on_input(self.input.text());
    }

    fn move_highlight(&mut self, delta: isize) -> bool {
        let count = self.visible_suggestions().len();
        if count == 0 {
            return false;
        }
        self.highlighted = match (self.highlighted, delta) {
            (None, d) if d > 0 => Some(0),
            (None, _) => None,
            (Some(0), d) if d < 0 => None,
            (Some(i), d) if d < 0 => Some(i - 1),
            (Some(i), _) => Some((i + 1).min(count - 1)),
        };
        true
    }

    fn accept_suggestion(&mut self, index: usize) -> bool {
        let Some(word) = self.visible_suggestions().get(index).cloned() else {
            return false;
        };
        self.input.set_text(&word);
        self.controller.select_suggestion(&word);
        self.highlighted = None;
        true
    }

    fn visible_suggestions(&self) -> &[String] {
        let all = self.controller.pipeline().suggestions();
        &all[..all.len().min(MAX_VISIBLE_SUGGESTIONS)]
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let suggestions = self.visible_suggestions();
        let list_height = if suggestions.is_empty() {
            0
        } else {
            suggestions.len() as u16 + 2
        };

        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(list_height),
            Constraint::Min(1),
        ])
        .split(area);

        self.render_input(frame, chunks[0]);
        if list_height > 0 {
            self.render_suggestions(frame, chunks[1], suggestions);
        }
        self.render_result(frame, chunks[2]);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let (status, border) = input_status(self.controller.pipeline());

        let block = Block::default()
            .title(Line::from(vec![Span::styled(" Word ", theme::title())]))
            .title_bottom(Line::from(status))
            .borders(Borders::ALL)
            .border_style(border);

        let text = if self.input.text().is_empty() {
            Line::from(Span::styled("Type a word (English or मराठी)", theme::muted()))
        } else {
            Line::raw(self.input.text())
        };
        frame.render_widget(Paragraph::new(text).block(block), area);

        let x = area.x + 1 + self.input.cursor_column() as u16;
        if x < area.right().saturating_sub(1) {
            frame.set_cursor_position((x, area.y + 1));
        }
    }

    fn render_suggestions(&self, frame: &mut Frame, area: Rect, suggestions: &[String]) {
        let lines: Vec<Line> = suggestions
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if self.highlighted == Some(i) {
                    Line::from(Span::styled(format!("> {word}"), theme::highlight()))
                } else {
                    Line::from(Span::styled(format!("  {word}"), Style::default().fg(theme::TEXT)))
                }
            })
            .collect();

        let block = theme::block_default("Suggestions").title_bottom(Line::from(vec![
            Span::styled(" Up/Down", theme::key_hint()),
            Span::raw(":choose "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":complete "),
        ]));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_result(&self, frame: &mut Frame, area: Rect) {
        let pipeline = self.controller.pipeline();
        let block = theme::block_default("Definition");

        let lines = if pipeline.is_loading() {
            vec![
                Line::raw(""),
                Line::from(Span::styled("  Looking up...", theme::muted())),
            ]
        } else if let Some(error) = pipeline.error() {
            vec![
                Line::raw(""),
                Line::from(Span::styled(
                    format!("  {error}"),
                    Style::default().fg(theme::ERROR),
                )),
            ]
        } else if let Some(entry) = pipeline.result() {
            definition_lines(entry)
        } else {
            vec![
                Line::raw(""),
                Line::from(vec![
                    Span::raw("  Press "),
                    Span::styled("Enter", theme::key_hint()),
                    Span::raw(" to look up a confirmed word."),
                ]),
            ]
        };

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

/// Status caption and border style for the word input.
fn input_status(pipeline: &SearchValidationPipeline) -> (Span<'static>, Style) {
    let has_term = !pipeline.term().trim().is_empty();
    match pipeline.admission() {
        Admission::Valid => (
            Span::styled(" known word ", Style::default().fg(theme::SUCCESS)),
            theme::admission(Some(true)),
        ),
        Admission::Validating => (
            Span::styled(" checking... ", theme::muted()),
            theme::admission(None),
        ),
        _ if has_term && pipeline.is_settling() => (
            Span::styled(" checking... ", theme::muted()),
            theme::admission(None),
        ),
        Admission::Invalid if has_term => (
            Span::styled(" not a known word ", Style::default().fg(theme::ERROR)),
            theme::admission(Some(false)),
        ),
        _ => (Span::raw(""), theme::admission(None)),
    }
}

fn definition_lines(entry: &WordEntry) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(entry.word.clone(), theme::title()),
            Span::raw("  "),
            Span::styled(entry.language.clone(), theme::muted()),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Meaning: ", theme::heading()),
            Span::raw(entry.meaning.clone()),
        ]),
    ];

    if !entry.explanation.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::raw(format!("  {}", entry.explanation))));
    }

    if !entry.examples.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("  Examples", theme::heading())));
        for example in &entry.examples {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(
                    example.source.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", example.target),
                theme::muted(),
            )));
        }
    }

    lines
}
