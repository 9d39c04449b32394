/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick: drains background results, settles search input, ages notifications.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// Which top-level view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Search,
    History,
    Quiz,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Search, Focus::History, Focus::Quiz];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Search => "Search",
            Focus::History => "History",
            Focus::Quiz => "Quiz",
        }
    }

    /// Function key that jumps straight to this view.
    pub fn hotkey(self) -> u8 {
        match self {
            Focus::Search => 1,
            Focus::History => 2,
            Focus::Quiz => 3,
        }
    }

    pub fn from_hotkey(n: u8) -> Option<Focus> {
        Focus::ALL.into_iter().find(|f| f.hotkey() == n)
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// Build an unnumbered notification; `AppState` assigns the id.
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: 80,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }
}
