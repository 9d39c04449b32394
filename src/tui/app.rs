use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{AppEvent, Focus, Notification, NotificationLevel};
use super::layout::{centered_rect, AppLayout};
use super::services::Services;
use super::theme;
use super::views::history::HistoryViewState;
use super::views::quiz::QuizViewState;
use super::views::search::SearchViewState;

/// Notifications visible at once.
const MAX_NOTIFICATIONS: usize = 3;
/// Lifetime of a notification, in ticks.
const NOTIFICATION_TTL: u32 = 100;
/// Widest a notification toast may get.
const TOAST_WIDTH: u16 = 56;

/// Help modal contents: section title, then key / action rows.
const HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Anywhere",
        &[
            ("Tab / Shift+Tab", "Next / previous view"),
            ("F1 F2 F3", "Search / History / Quiz"),
            ("?", "Toggle this help"),
            ("q", "Quit (outside the search box)"),
            ("Ctrl+C", "Quit"),
        ],
    ),
    (
        "Search",
        &[
            ("type", "Edit the word; it is checked as you pause"),
            ("Up/Down", "Move through suggestions"),
            ("Tab", "Complete with a suggestion"),
            ("Enter", "Look up a confirmed word"),
            ("Esc", "Leave suggestions / clear"),
        ],
    ),
    (
        "History",
        &[
            ("j/k", "Move selection"),
            ("h/l", "In review / Mastered"),
            ("m", "Move to the other list"),
            ("d", "Delete selected word"),
            ("r", "Refresh"),
        ],
    ),
    (
        "Quiz",
        &[
            ("1-4", "Answer"),
            ("n / Enter", "Next question"),
            ("r", "Restart with current words"),
        ],
    ),
];

/// Top-level TUI state. Input and backend events go through
/// [`handle_event`](Self::handle_event); everything else happens on tick.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub search: SearchViewState,
    pub history: HistoryViewState,
    pub quiz: QuizViewState,
    /// Oldest first.
    pub notifications: Vec<Notification>,
    next_notification_id: u64,
    pub show_help: bool,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        Self {
            running: true,
            focus: Focus::Search,
            search: SearchViewState::new(&services),
            history: HistoryViewState::new(),
            quiz: QuizViewState::new(),
            notifications: Vec::new(),
            next_notification_id: 1,
            show_help: false,
            event_rx,
            services,
        }
    }

    /// Draw, wait for the next tick, backend event or key, apply it; repeat
    /// until a quit.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut ticks = tokio::time::interval(tick_rate);
        let mut input = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = ticks.tick() => self.on_tick(),
                Some(event) = self.event_rx.recv() => self.handle_event(event),
                Some(Ok(event)) = input.next() => self.handle_event(AppEvent::Input(event)),
            }
        }

        log::debug!("Event loop finished");
        Ok(())
    }

    // ── Events ──────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(input) => self.handle_input(&input),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(n) => self.push_notification(n.message, n.level),
            AppEvent::Quit => self.running = false,
        }
    }

    /// Help modal first, then the focused view, then global keys.
    fn handle_input(&mut self, input: &Event) {
        if self.show_help {
            if is_help_close(input) {
                self.show_help = false;
            }
            return;
        }

        let consumed = match self.focus {
            Focus::Search => self.search.handle_input(input),
            Focus::History => self.history.handle_input(input, &self.services),
            Focus::Quiz => self.quiz.handle_input(input, &self.services),
        };
        if !consumed {
            self.handle_global_key(input);
        }
    }

    fn handle_global_key(&mut self, input: &Event) {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = input
        else {
            return;
        };

        if *modifiers == KeyModifiers::CONTROL {
            if *code == KeyCode::Char('c') {
                self.running = false;
            }
            return;
        }
        if !matches!(*modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) {
            return;
        }

        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.set_focus(self.focus.next()),
            KeyCode::BackTab => self.set_focus(self.focus.prev()),
            KeyCode::F(n) => {
                if let Some(focus) = Focus::from_hotkey(*n) {
                    self.set_focus(focus);
                }
            }
            _ => {}
        }
    }

    /// Switch views. History and Quiz refresh from the store on entry.
    fn set_focus(&mut self, focus: Focus) {
        if self.focus == focus {
            return;
        }
        log::debug!("View {} -> {}", self.focus.label(), focus.label());
        self.focus = focus;

        match focus {
            Focus::Search => {}
            Focus::History => self.history.load(&self.services),
            Focus::Quiz => self.quiz.load(&self.services),
        }
    }

    /// Show a message. Repeats of a visible message are dropped; the oldest
    /// toast goes when the stack is full.
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification {
            id,
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL,
        });

        let overflow = self.notifications.len().saturating_sub(MAX_NOTIFICATIONS);
        self.notifications.drain(..overflow);
    }

    /// Apply queued backend events, expire toasts and let each view pick up
    /// finished background work.
    fn on_tick(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if !matches!(event, AppEvent::Tick) {
                self.handle_event(event);
            }
        }

        self.notifications.retain_mut(|n| {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
            n.ttl_ticks > 0
        });

        self.search.poll();
        self.history.poll(&self.services);
        self.quiz.poll(&self.services);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        self.render_tabs(frame, layout.tabs);
        match self.focus {
            Focus::Search => self.search.render(frame, layout.main),
            Focus::History => self.history.render(frame, layout.main),
            Focus::Quiz => self.quiz.render(frame, layout.main),
        }
        self.render_status_bar(frame, layout.status);

        self.render_toasts(frame, area);
        if self.show_help {
            render_help(frame, area);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        for focus in Focus::ALL {
            let style = if focus == self.focus {
                theme::highlight().bg(theme::BG_SURFACE)
            } else {
                theme::muted()
            };
            spans.push(Span::styled(
                format!(" F{} {} ", focus.hotkey(), focus.label()),
                style,
            ));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" WORDHOARD ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::INK_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ", theme::muted()),
        ];
        for (key, action) in [("Tab/F1-F3", "views"), ("?", "help"), ("Ctrl+C", "quit")] {
            spans.push(Span::styled(key, theme::key_hint()));
            spans.push(Span::raw(format!(":{action} ")));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Toasts stack in the top-right corner, below the tab bar.
    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
        let mut y = area.y + 1;

        for n in &self.notifications {
            if y >= area.bottom() {
                break;
            }
            let (icon, color) = match n.level {
                NotificationLevel::Info => ("i", theme::INFO),
                NotificationLevel::Success => ("✓", theme::SUCCESS),
                NotificationLevel::Warning => ("!", theme::WARNING),
                NotificationLevel::Error => ("✗", theme::ERROR),
            };
            let toast = Rect::new(area.right().saturating_sub(width + 1), y, width, 1);
            let line = Line::from(vec![
                Span::styled(
                    format!(" {icon} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(n.message.as_str(), Style::default().fg(theme::TEXT)),
            ]);

            frame.render_widget(Clear, toast);
            frame.render_widget(
                Paragraph::new(line).style(Style::default().bg(theme::BG_SURFACE)),
                toast,
            );
            y += 1;
        }
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let modal = centered_rect(60, 75, area);

    let mut lines = vec![Line::raw("")];
    for (section, rows) in HELP {
        lines.push(Line::from(Span::styled(format!("  {section}"), theme::title())));
        for (key, action) in *rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("    {key:<16}"),
                    Style::default()
                        .fg(theme::INK_LIGHT)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ]));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(Span::styled(
        "  ? or Esc closes this window",
        theme::key_hint(),
    )));

    let block = Block::default()
        .title(" Keys ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SAFFRON));

    frame.render_widget(Clear, modal);
    frame.render_widget(Paragraph::new(lines).block(block), modal);
}

fn is_help_close(input: &Event) -> bool {
    matches!(
        input,
        Event::Key(KeyEvent {
            code: KeyCode::Esc | KeyCode::Char('?'),
            kind: KeyEventKind::Press,
            ..
        })
    )
}
