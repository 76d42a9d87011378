pub mod assets;
pub mod components;
pub mod config;
pub mod system;
