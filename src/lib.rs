pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod platform;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::core::config::{GameConfig, WindowConfig};
pub use crate::gameplay::home_run::{HomeRunRule, HomeRunState};
pub use crate::rendering::scoreboard::{ScoreboardCanvas, ScoreboardMessage};
