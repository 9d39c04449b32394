pub mod history;
pub mod logging;
pub mod models;
pub mod providers;
pub mod quiz;
pub mod search;
