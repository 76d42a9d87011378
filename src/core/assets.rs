//! Embedded / disk dual-mode sourcing for the handful of files read outside Bevy's asset server
//! (game config, panel layout, scoreboard font).
//!
//! - `wasm32` target: always embedded (no runtime FS IO).
//! - Native + feature `embedded_assets`: embedded (mirrors wasm behavior).
//! - Native default: disk, relative to the working directory.
//!
//! Embedded lookup matches on the path relative to the repository root, so callers pass the
//! same `assets/...` paths in both modes.

use std::path::Path;

#[cfg(any(target_arch = "wasm32", feature = "embedded_assets"))]
mod embedded_impl {
    pub const GAME_RON: &str = include_str!("../../assets/config/game.ron");
    pub const WELCOME_PANEL_JSON: &str = include_str!("../../assets/ui/welcome.json");
    pub const SCOREBOARD_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

    pub const TEXT: &[(&str, &str)] = &[
        ("assets/config/game.ron", GAME_RON),
        ("assets/ui/welcome.json", WELCOME_PANEL_JSON),
    ];
    pub const BINARY: &[(&str, &[u8])] = &[("assets/fonts/DejaVuSans-Bold.ttf", SCOREBOARD_FONT)];
}

/// Whether this build reads from the embedded table rather than the filesystem.
pub const fn embedded_mode() -> bool {
    cfg!(any(target_arch = "wasm32", feature = "embedded_assets"))
}

#[cfg(any(target_arch = "wasm32", feature = "embedded_assets"))]
fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").trim_start_matches("./").to_string()
}

#[cfg(any(target_arch = "wasm32", feature = "embedded_assets"))]
pub fn read_text(path: &Path) -> Result<String, String> {
    let key = normalized(path);
    embedded_impl::TEXT
        .iter()
        .find(|(p, _)| *p == key)
        .map(|(_, data)| (*data).to_string())
        .ok_or_else(|| format!("no embedded text asset for '{key}'"))
}

#[cfg(any(target_arch = "wasm32", feature = "embedded_assets"))]
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, String> {
    let key = normalized(path);
    embedded_impl::BINARY
        .iter()
        .find(|(p, _)| *p == key)
        .map(|(_, data)| data.to_vec())
        .ok_or_else(|| format!("no embedded binary asset for '{key}'"))
}

#[cfg(not(any(target_arch = "wasm32", feature = "embedded_assets")))]
pub fn read_text(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("read error: {e}"))
}

#[cfg(not(any(target_arch = "wasm32", feature = "embedded_assets")))]
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("read error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path_error() {
        let err = read_text(Path::new("assets/config/definitely_missing.ron")).unwrap_err();
        assert!(!err.is_empty());
    }
}
