// This file is part of Home Run Derby.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::core::assets;

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Home Run Derby".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FloorConfig {
    pub size: [f32; 2],
    pub color: [f32; 3],
    pub restitution: f32,
}
impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            size: [200.0, 200.0],
            color: [0.0, 0.5, 0.0],
            restitution: 0.9,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}
impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 0.25,
            position: [1.0, 1.5, -3.0],
            color: [1.0, 0.0, 0.0],
            density: 0.2,
            friction: 0.5,
            restitution: 0.9,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BatConfig {
    pub radius: f32,
    pub length: f32,
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub density: f32,
    pub restitution: f32,
}
impl Default for BatConfig {
    fn default() -> Self {
        Self {
            radius: 0.05,
            length: 1.0,
            position: [-0.5, 1.3, -2.0],
            color: [0.647, 0.165, 0.165],
            density: 0.5,
            restitution: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WallConfig {
    pub size: [f32; 2],
    pub thickness: f32,
    pub position: [f32; 3],
    pub color: [f32; 3],
}
impl Default for WallConfig {
    fn default() -> Self {
        Self {
            size: [200.0, 20.0],
            thickness: 0.1,
            position: [0.0, 1.0, -50.0],
            color: [0.5, 0.5, 0.5],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub floor: FloorConfig,
    pub ball: BallConfig,
    pub bat: BatConfig,
    pub wall: WallConfig,
    pub eye_height: f32,
    pub light_illuminance: f32,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            floor: Default::default(),
            ball: Default::default(),
            bat: Default::default(),
            wall: Default::default(),
            eye_height: 1.6,
            light_illuminance: 10_000.0,
        }
    }
}

/// Where the ball has to go for the hit to count.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HomeRunConfig {
    /// Depth the ball must pass (more negative = further from the player).
    pub boundary_z: f32,
    /// Optional height the ball must also exceed.
    pub min_height: Option<f32>,
    /// Seconds after startup before the detector starts polling.
    pub start_delay: f32,
    pub message: String,
}
impl Default for HomeRunConfig {
    fn default() -> Self {
        Self {
            boundary_z: -50.0,
            min_height: None,
            start_delay: 0.1,
            message: "HOME RUN!".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoreboardConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub font_path: String,
    pub font_px: f32,
    pub color: [f32; 3],
    /// Baseline offset below the vertical center, in surface pixels.
    pub baseline_offset: f32,
    pub idle_message: String,
    pub plane_size: [f32; 2],
    pub position: [f32; 3],
}
impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            surface_width: 2048,
            surface_height: 256,
            font_path: "assets/fonts/DejaVuSans-Bold.ttf".into(),
            font_px: 120.0,
            color: [1.0, 0.0, 0.0],
            baseline_offset: 16.0,
            idle_message: "no home run".into(),
            plane_size: [12.0, 1.5],
            position: [10.0, 5.0, -20.0],
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "String")]
pub enum GrabMode {
    /// Pick from afar, object travels towards the hand.
    #[default]
    Distance,
    /// Only objects within arm's reach.
    OneHand,
}
impl TryFrom<String> for GrabMode {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "distance" => Ok(GrabMode::Distance),
            "one_hand" => Ok(GrabMode::OneHand),
            other => Err(format!(
                "unknown grab mode '{other}' (expected \"distance\" or \"one_hand\")"
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GrabConfig {
    pub mode: GrabMode,
    pub max_distance: f32,
    pub one_hand_reach: f32,
    /// Extra radius added to every pick sphere.
    pub pick_padding: f32,
    pub pull_strength: f32,
    pub max_speed: f32,
    /// Per-frame velocity retention while a dynamic body is held.
    pub damping: f32,
    /// Top speed (m/s) of a held kinematic body chasing the hold point; 0 follows it exactly.
    /// The bat's swing speed is what Rapier sees on contact.
    pub swing_speed: f32,
    pub hold_distance: f32,
}
impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            mode: GrabMode::Distance,
            max_distance: 30.0,
            one_hand_reach: 2.5,
            pick_padding: 0.15,
            pull_strength: 60.0,
            max_speed: 40.0,
            damping: 0.9,
            swing_speed: 60.0,
            hold_distance: 1.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    pub enabled: bool,
    pub speed: f32,
    pub turn_speed: f32,
}
impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 3.0,
            turn_speed: 1.8,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    pub layout_path: String,
}
impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            layout_path: "assets/ui/welcome.json".into(),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub home_run: HomeRunConfig,
    pub scoreboard: ScoreboardConfig,
    pub grab: GrabConfig,
    pub locomotion: LocomotionConfig,
    pub panel: PanelConfig,
    pub rapier_debug: bool,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = assets::read_text(path.as_ref())?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Merge RON files in order (later files override earlier keys), returning the config,
    /// the paths that were read, and any per-file errors. Falls back to defaults when
    /// nothing usable was read.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut pending = Some(v);
                        if let Some((_, existing)) = bm.iter_mut().find(|(ek, _)| **ek == k) {
                            if let Some(v) = pending.take() {
                                merge_value(existing, v);
                            }
                        }
                        if let Some(v) = pending {
                            bm.insert(k, v);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match assets::read_text(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let scene = &self.scene;
        if scene.ball.radius <= 0.0 {
            w.push("scene.ball.radius must be > 0".into());
        }
        if scene.ball.density <= 0.0 {
            w.push(format!(
                "scene.ball.density {} must be > 0 for a dynamic body",
                scene.ball.density
            ));
        }
        if scene.bat.radius <= 0.0 || scene.bat.length <= 0.0 {
            w.push("scene.bat radius and length must be > 0".into());
        }
        for (label, r) in [
            ("scene.floor.restitution", scene.floor.restitution),
            ("scene.ball.restitution", scene.ball.restitution),
            ("scene.bat.restitution", scene.bat.restitution),
        ] {
            if !(0.0..=1.5).contains(&r) {
                w.push(format!("{label} {r} outside recommended 0..1.5"));
            }
        }
        let floor_half_depth = scene.floor.size[1] * 0.5;
        if self.home_run.boundary_z.abs() > floor_half_depth {
            w.push(format!(
                "home_run.boundary_z {} lies beyond the floor (half depth {floor_half_depth}); the ball may fall before crossing",
                self.home_run.boundary_z
            ));
        }
        if self.home_run.boundary_z >= scene.ball.position[2] {
            w.push(format!(
                "home_run.boundary_z {} is not in front of the ball spawn z {}; home run triggers immediately",
                self.home_run.boundary_z, scene.ball.position[2]
            ));
        }
        if let Some(h) = self.home_run.min_height {
            let wall_top = scene.wall.position[1] + scene.wall.size[1] * 0.5;
            if h < wall_top {
                w.push(format!(
                    "home_run.min_height {h} below wall top {wall_top}; balls hitting the wall can still count"
                ));
            }
        }
        if self.home_run.start_delay < 0.0 {
            w.push("home_run.start_delay negative -> treated as 0".into());
        }
        let sb = &self.scoreboard;
        if sb.surface_width == 0 || sb.surface_height == 0 {
            w.push("scoreboard surface dimensions must be > 0".into());
        }
        if sb.font_px <= 0.0 {
            w.push("scoreboard.font_px must be > 0".into());
        } else if sb.font_px > sb.surface_height as f32 {
            w.push(format!(
                "scoreboard.font_px {} taller than surface height {} (text clipped)",
                sb.font_px, sb.surface_height
            ));
        }
        let g = &self.grab;
        if g.max_distance <= 0.0 {
            w.push("grab.max_distance must be > 0".into());
        }
        if g.one_hand_reach <= 0.0 {
            w.push("grab.one_hand_reach must be > 0".into());
        }
        if g.pull_strength <= 0.0 {
            w.push("grab.pull_strength must be > 0".into());
        }
        if !(0.0..=1.0).contains(&g.damping) {
            w.push(format!("grab.damping {} outside 0..1", g.damping));
        }
        if g.max_speed < 0.0 {
            w.push("grab.max_speed negative -> cap ignored".into());
        }
        // Launch speed for a 45 degree flight from the ball spawn to the boundary.
        let carry = (scene.ball.position[2] - self.home_run.boundary_z).max(0.0);
        let needed = (9.81 * carry).sqrt();
        if g.swing_speed > 0.0 && g.swing_speed < needed {
            w.push(format!(
                "grab.swing_speed {} below {needed:.1} m/s; a batted ball cannot reach the boundary",
                g.swing_speed
            ));
        }
        if self.locomotion.enabled && self.locomotion.speed <= 0.0 {
            w.push("locomotion.speed must be > 0 when enabled".into());
        }
        w
    }

    pub fn home_run_rule(&self) -> crate::gameplay::home_run::HomeRunRule {
        crate::gameplay::home_run::HomeRunRule {
            boundary_z: self.home_run.boundary_z,
            min_height: self.home_run.min_height,
        }
    }
}
