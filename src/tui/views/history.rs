//! History view: saved words, split into "In review" and "Mastered".
//!
//! Store calls run as tokio tasks and report back over a channel drained in
//! `poll`, the same way the other views load their data. Failures surface as
//! notifications; the cached listing only changes on success.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc;

use super::super::theme;
use crate::core::history::{HistoryBook, StoreResult};
use crate::core::models::{Category, PersistedWordEntry};
use crate::tui::events::{AppEvent, Notification};
use crate::tui::services::Services;

/// Completion of a spawned store call.
enum HistoryUpdate {
    Loaded {
        category: Category,
        result: StoreResult<Vec<PersistedWordEntry>>,
    },
    Deleted {
        category: Category,
        id: String,
        word: String,
        result: StoreResult<()>,
    },
    Moved {
        from: Category,
        id: String,
        result: StoreResult<PersistedWordEntry>,
    },
}

pub struct HistoryViewState {
    in_review: HistoryBook,
    mastered: HistoryBook,
    active: Category,
    /// Categories with a list request outstanding.
    loading: Vec<Category>,
    loaded_once: bool,
    data_tx: mpsc::UnboundedSender<HistoryUpdate>,
    data_rx: mpsc::UnboundedReceiver<HistoryUpdate>,
}

impl HistoryViewState {
    pub fn new() -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            in_review: HistoryBook::new(Category::InReview),
            mastered: HistoryBook::new(Category::Mastered),
            active: Category::InReview,
            loading: Vec::new(),
            loaded_once: false,
            data_tx,
            data_rx,
        }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    /// True while a list request is outstanding.
    pub fn is_loading(&self) -> bool {
        !self.loading.is_empty()
    }

    pub fn book(&self, category: Category) -> &HistoryBook {
        match category {
            Category::InReview => &self.in_review,
            Category::Mastered => &self.mastered,
        }
    }

    fn book_mut(&mut self, category: Category) -> &mut HistoryBook {
        match category {
            Category::InReview => &mut self.in_review,
            Category::Mastered => &mut self.mastered,
        }
    }

    // ── Store calls ─────────────────────────────────────────────────────

    /// Reload both categories.
    pub fn load(&mut self, services: &Services) {
        for category in Category::ALL {
            if self.loading.contains(&category) {
                continue;
            }
            self.loading.push(category);

            let history = services.history.clone();
            let tx = self.data_tx.clone();
            tokio::spawn(async move {
                let result = history.list(category).await;
                let _ = tx.send(HistoryUpdate::Loaded { category, result });
            });
        }
    }

    fn delete_selected(&mut self, services: &Services) {
        let category = self.active;
        let Some(entry) = self.book(category).selected() else {
            return;
        };
        let id = entry.id.clone();
        let word = entry.word().to_string();

        let history = services.history.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let result = history.delete_by_id(&id, category).await;
            let _ = tx.send(HistoryUpdate::Deleted {
                category,
                id,
                word,
                result,
            });
        });
    }

    fn toggle_selected(&mut self, services: &Services) {
        let from = self.active;
        let Some(entry) = self.book(from).selected() else {
            return;
        };
        let id = entry.id.clone();

        let history = services.history.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let result = history.set_category(&id, from.other()).await;
            let _ = tx.send(HistoryUpdate::Moved { from, id, result });
        });
    }

    /// Apply finished store calls. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        while let Ok(update) = self.data_rx.try_recv() {
            self.apply(update, services);
        }
    }

    fn apply(&mut self, update: HistoryUpdate, services: &Services) {
        match update {
            HistoryUpdate::Loaded { category, result } => {
                self.loading.retain(|c| *c != category);
                self.loaded_once = true;
                match result {
                    Ok(entries) => self.book_mut(category).replace(entries),
                    Err(e) => {
                        log::warn!("Failed to load {category} history: {e}");
                        notify(services, format!("Could not load history: {e}"));
                    }
                }
            }
            HistoryUpdate::Deleted {
                category,
                id,
                word,
                result,
            } => match result {
                Ok(()) => {
                    self.book_mut(category).remove(&id);
                    log::info!("Deleted '{word}' from {category}");
                    let _ = services
                        .event_tx
                        .send(AppEvent::Notification(Notification::success(format!(
                            "Deleted '{word}'"
                        ))));
                }
                Err(e) => {
                    if e.is_not_found() {
                        // Already gone from the store; drop the stale row.
                        self.book_mut(category).remove(&id);
                    }
                    log::warn!("Failed to delete '{word}': {e}");
                    notify(services, format!("Could not delete '{word}': {e}"));
                }
            },
            HistoryUpdate::Moved { from, id, result } => match result {
                Ok(entry) => {
                    self.book_mut(from).remove(&id);
                    let to = entry.category;
                    log::info!("Moved '{}' to {to}", entry.word());
                    self.book_mut(to).upsert(entry);
                }
                Err(e) => {
                    log::warn!("Failed to move word {id}: {e}");
                    notify(services, format!("Could not update word: {e}"));
                }
            },
        }
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
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
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.book_mut(self.active).select_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.book_mut(self.active).select_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left)
            | (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                self.active = self.active.other();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('m')) => {
                self.toggle_selected(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Delete) => {
                self.delete_selected(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                self.load(services);
                true
            }
            _ => false,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let cols =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);

        self.render_list(frame, cols[0]);
        self.render_detail(frame, cols[1]);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let book = self.book(self.active);

        let tabs: Vec<Span> = Category::ALL
            .iter()
            .flat_map(|c| {
                let label = format!(" {} ({}) ", c.label(), self.book(*c).len());
                let style = if *c == self.active {
                    theme::highlight()
                } else {
                    theme::muted()
                };
                [Span::styled(label, style), Span::raw(" ")]
            })
            .collect();

        let mut lines = vec![Line::from(tabs), Line::raw("")];

        if !self.loaded_once && !self.loading.is_empty() {
            lines.push(Line::from(Span::styled("  Loading history...", theme::muted())));
        } else if book.is_empty() {
            lines.push(Line::from(Span::styled(
                "  Nothing here yet. Look a word up in Search.",
                theme::muted(),
            )));
        } else {
            for (i, entry) in book.entries().iter().enumerate() {
                let selected = i == book.selected_index();
                let marker = if selected { "> " } else { "  " };
                let style = if selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{marker}{}", entry.word()), style),
                    Span::styled(format!("  x{}", entry.lookup_count), theme::muted()),
                ]));
            }
        }

        let block = theme::block_focused("History").title_bottom(Line::from(vec![
            Span::styled(" h/l", theme::key_hint()),
            Span::raw(":list "),
            Span::styled("m", theme::key_hint()),
            Span::raw(":move "),
            Span::styled("d", theme::key_hint()),
            Span::raw(":delete "),
            Span::styled("r", theme::key_hint()),
            Span::raw(":refresh "),
        ]));

        let scroll = book.selected_index().saturating_sub(area.height.saturating_sub(5) as usize);
        frame.render_widget(
            Paragraph::new(lines).block(block).scroll((scroll as u16, 0)),
            area,
        );
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Details");
        let Some(entry) = self.book(self.active).selected() else {
            frame.render_widget(block, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(entry.word().to_string(), theme::title())),
            Line::from(Span::styled(
                format!(
                    "{} · looked up {} time(s) · {}",
                    entry.entry.language,
                    entry.lookup_count,
                    entry.updated_at.format("%Y-%m-%d")
                ),
                theme::muted(),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Meaning: ", theme::heading()),
                Span::raw(entry.entry.meaning.clone()),
            ]),
        ];
        if !entry.entry.explanation.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::raw(entry.entry.explanation.clone()));
        }
        for example in &entry.entry.examples {
            lines.push(Line::raw(""));
            lines.push(Line::raw(example.source.clone()));
            lines.push(Line::from(Span::styled(example.target.clone(), theme::muted())));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(ratatui::widgets::Wrap { trim: false }),
            area,
        );
    }
}

impl Default for HistoryViewState {
    fn default() -> Self {
        Self::new()
    }
}

fn notify(services: &Services, message: String) {
    let _ = services
        .event_tx
        .send(AppEvent::Notification(Notification::error(message)));
}
