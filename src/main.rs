// This file is part of Home Run Derby.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use bevy::prelude::*;

use home_run_derby::core::assets;
use home_run_derby::{GameConfig, GamePlugin};

const CONFIG_LAYERS: [&str; 2] = ["assets/config/game.ron", "assets/config/game.local.ron"];

/// Config loading notes collected before logging is up; replayed at startup.
#[derive(Resource, Default)]
struct ConfigDiagnostics {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    // The base layer is always attempted; the local override only when present on disk.
    let layers: Vec<&str> = CONFIG_LAYERS
        .iter()
        .enumerate()
        .filter(|(i, p)| *i == 0 || (!assets::embedded_mode() && Path::new(p).exists()))
        .map(|(_, p)| *p)
        .collect();
    let (cfg, used, errors) = GameConfig::load_layered(layers);
    let warnings = cfg.validate();

    App::new()
        .insert_resource(ConfigDiagnostics { used, errors, warnings })
        .insert_resource(cfg.clone())
        .insert_resource(ClearColor(Color::srgb(0.55, 0.75, 0.95)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .add_systems(Startup, report_config)
        .run();
}

fn report_config(diag: Res<ConfigDiagnostics>) {
    if diag.used.is_empty() {
        warn!(target: "config", "No config layers loaded; running with defaults");
    } else {
        info!(target: "config", "Config layers: {}", diag.used.join(", "));
    }
    for e in &diag.errors {
        error!(target: "config", "{e}");
    }
    for w in &diag.warnings {
        warn!(target: "config", "{w}");
    }
}
