//! Quiz view: multiple-choice meanings for saved words.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use super::super::theme;
use crate::core::history::StoreResult;
use crate::core::models::{Category, WordEntry};
use crate::core::quiz::{QuizError, QuizQuestion, QuizSession};
use crate::tui::events::{AppEvent, Notification};
use crate::tui::services::Services;

enum QuizPhase {
    /// Waiting for the word pool.
    Loading,
    /// No saved words to quiz on.
    Empty,
    Running,
}

pub struct QuizViewState {
    session: QuizSession,
    phase: QuizPhase,
    pool_tx: mpsc::UnboundedSender<StoreResult<Vec<WordEntry>>>,
    pool_rx: mpsc::UnboundedReceiver<StoreResult<Vec<WordEntry>>>,
    requested: bool,
}

impl QuizViewState {
    pub fn new() -> Self {
        let (pool_tx, pool_rx) = mpsc::unbounded_channel();
        Self {
            session: QuizSession::new(),
            phase: QuizPhase::Loading,
            pool_tx,
            pool_rx,
            requested: false,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Start the quiz on first visit; later visits resume a running one.
    pub fn load(&mut self, services: &Services) {
        if !matches!(self.phase, QuizPhase::Running) {
            self.restart(services);
        }
    }

    /// Fetch a fresh pool and start over.
    pub fn restart(&mut self, services: &Services) {
        if self.requested {
            return;
        }
        self.requested = true;
        self.phase = QuizPhase::Loading;

        let mut categories = vec![Category::InReview];
        if services.config.quiz.include_mastered {
            categories.push(Category::Mastered);
        }

        let history = services.history.clone();
        let tx = self.pool_tx.clone();
        tokio::spawn(async move {
            let mut pool = Vec::new();
            for category in categories {
                match history.list(category).await {
                    Ok(entries) => pool.extend(entries.into_iter().map(|e| e.entry)),
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        return;
                    }
                }
            }
            let _ = tx.send(Ok(pool));
        });
    }

    /// Start the session once the pool arrives. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        let Ok(result) = self.pool_rx.try_recv() else {
            return;
        };
        self.requested = false;

        match result {
            Ok(words) => match self.session.initialize(words) {
                Ok(()) => self.phase = QuizPhase::Running,
                Err(QuizError::EmptyPool) => self.phase = QuizPhase::Empty,
            },
            Err(e) => {
                log::warn!("Failed to load quiz words: {e}");
                self.phase = QuizPhase::Empty;
                let _ = services
                    .event_tx
                    .send(AppEvent::Notification(Notification::error(format!(
                        "Could not load quiz words: {e}"
                    ))));
            }
        }
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = (*c as usize) - ('1' as usize);
                self.answer_option(index);
                true
            }
            KeyCode::Char('n') | KeyCode::Enter => {
                if matches!(self.phase, QuizPhase::Running) {
                    self.session.advance();
                }
                true
            }
            KeyCode::Char('r') => {
                self.restart(services);
                true
            }
            _ => false,
        }
    }

    fn answer_option(&mut self, index: usize) {
        let Some(choice) = self
            .session
            .current()
            .and_then(|q| q.options.get(index))
            .cloned()
        else {
            return;
        };
        if let Some(correct) = self.session.answer(&choice) {
            log::debug!("Quiz answer '{choice}' correct={correct}");
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Quiz").title_bottom(Line::from(vec![
            Span::styled(" 1-4", theme::key_hint()),
            Span::raw(":answer "),
            Span::styled("n", theme::key_hint()),
            Span::raw(":next "),
            Span::styled("r", theme::key_hint()),
            Span::raw(":restart "),
        ]));

        let lines = match self.phase {
            QuizPhase::Loading => vec![
                Line::raw(""),
                Line::from(Span::styled("  Loading words...", theme::muted())),
            ],
            QuizPhase::Empty => vec![
                Line::raw(""),
                Line::from(Span::styled(
                    "  No words to practise. Look some up in Search first.",
                    theme::muted(),
                )),
            ],
            QuizPhase::Running if self.session.is_complete() => self.summary_lines(),
            QuizPhase::Running => match self.session.current() {
                Some(question) => self.question_lines(question),
                None => Vec::new(),
            },
        };

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn question_lines(&self, question: &QuizQuestion) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!(
                    "  Question {} of {}   Score: {}",
                    self.session.questions_asked(),
                    self.session.pool_size(),
                    self.session.score()
                ),
                theme::muted(),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::raw("  What does "),
                Span::styled(question.word.clone(), theme::title()),
                Span::raw(" mean?"),
            ]),
            Line::raw(""),
        ];

        for (i, option) in question.options.iter().enumerate() {
            let style = if !question.answered {
                Style::default().fg(theme::TEXT)
            } else if *option == question.meaning {
                theme::answer(true)
            } else if question.selected.as_ref() == Some(option) {
                theme::answer(false)
            } else {
                theme::muted()
            };
            lines.push(Line::from(Span::styled(
                format!("  [{}] {option}", i + 1),
                style,
            )));
        }

        if let Some(correct) = question.is_correct() {
            lines.push(Line::raw(""));
            let verdict = if correct {
                Span::styled("  Correct!", theme::answer(true))
            } else {
                Span::styled(
                    format!("  The answer is: {}", question.meaning),
                    theme::answer(false),
                )
            };
            lines.push(Line::from(vec![
                verdict,
                Span::styled("   (n for next)", theme::key_hint()),
            ]));
        }

        lines
    }

    fn summary_lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::raw(""),
            Line::from(Span::styled("Quiz complete", theme::title())).alignment(Alignment::Center),
            Line::raw(""),
            Line::from(Span::raw(format!(
                "You scored {} out of {}",
                self.session.score(),
                self.session.pool_size()
            )))
            .alignment(Alignment::Center),
            Line::raw(""),
            Line::from(Span::styled("Press r to play again", theme::key_hint()))
                .alignment(Alignment::Center),
        ]
    }
}

impl Default for QuizViewState {
    fn default() -> Self {
        Self::new()
    }
}
