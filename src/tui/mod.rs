//! Terminal front end: ratatui views driven by an Elm-style event loop.

pub mod app;
pub mod events;
pub mod layout;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
