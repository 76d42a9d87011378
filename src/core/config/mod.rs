pub mod config;

pub use config::{
    BallConfig, BatConfig, FloorConfig, GameConfig, GrabConfig, GrabMode, HomeRunConfig,
    LocomotionConfig, PanelConfig, SceneConfig, ScoreboardConfig, WallConfig, WindowConfig,
};
