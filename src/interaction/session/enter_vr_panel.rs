// This file is part of Home Run Derby.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Screen-space "Enter VR" panel for first-generation Quest browsers, which do not surface
//! their own immersive-session button. Other devices skip the panel entirely.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::assets;
use crate::core::config::GameConfig;
use crate::platform::device;

/// Panel contents, read from the JSON layout resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelLayout {
    pub title: String,
    pub body: String,
    pub button_label: String,
    /// World-space limits (meters) kept for headset rendering; screen-space uses `px_per_meter`.
    pub max_width: f32,
    pub max_height: f32,
    pub px_per_meter: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            title: "Home Run Derby".into(),
            body: "Grab the bat and knock the ball over the wall.".into(),
            button_label: "Enter VR".into(),
            max_width: 1.6,
            max_height: 0.8,
            px_per_meter: 400.0,
        }
    }
}

impl PanelLayout {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("parse panel JSON: {e}"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        Self::from_json(&assets::read_text(path.as_ref())?)
    }
}

/// Result of the device heuristic, decided once at startup.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyQuestDevice(pub bool);

/// Source of the user-agent string inspected by the heuristic.
#[derive(Resource, Clone, Copy)]
pub struct UserAgentProbe(pub fn() -> anyhow::Result<String>);

#[derive(Component)]
pub struct EnterVrPanel;

#[derive(Component)]
pub struct EnterVrButton;

/// The player asked for an immersive session; negotiation is up to the XR runtime.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnterVrRequested;

pub struct EnterVrPanelPlugin {
    pub user_agent: fn() -> anyhow::Result<String>,
}

impl Default for EnterVrPanelPlugin {
    fn default() -> Self {
        Self {
            user_agent: device::user_agent,
        }
    }
}

impl Plugin for EnterVrPanelPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(UserAgentProbe(self.user_agent))
            .add_event::<EnterVrRequested>()
            .add_systems(Startup, spawn_enter_vr_panel)
            .add_systems(Update, (press_enter_vr_button, log_enter_vr_requests).chain());
    }
}

fn spawn_enter_vr_panel(mut commands: Commands, cfg: Res<GameConfig>, probe: Res<UserAgentProbe>) {
    let legacy = device::detect_legacy_quest(probe.0);
    commands.insert_resource(LegacyQuestDevice(legacy));
    if !legacy {
        info!(target: "device", "Panel UI skipped: not running on Meta Quest 1 (heuristic).");
        return;
    }
    let layout = PanelLayout::load(&cfg.panel.layout_path).unwrap_or_else(|e| {
        warn!(target: "device", "Panel layout {}: {e}; using built-in layout", cfg.panel.layout_path);
        PanelLayout::default()
    });
    info!(target: "device", "Legacy Quest detected; spawning Enter VR panel");

    commands
        .spawn((
            Name::new("EnterVrPanel"),
            EnterVrPanel,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                left: Val::Px(20.0),
                height: Val::Percent(40.0),
                max_width: Val::Px(layout.max_width * layout.px_per_meter),
                max_height: Val::Px(layout.max_height * layout.px_per_meter),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.85)),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(layout.title.clone()),
                TextFont { font_size: 30.0, ..default() },
                TextColor(Color::WHITE),
            ));
            panel.spawn((
                Text::new(layout.body.clone()),
                TextFont { font_size: 18.0, ..default() },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
            ));
            panel
                .spawn((
                    EnterVrButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(18.0), Val::Px(10.0)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.15, 0.35, 0.85)),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(layout.button_label.clone()),
                        TextFont { font_size: 22.0, ..default() },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

fn press_enter_vr_button(
    buttons: Query<&Interaction, (Changed<Interaction>, With<EnterVrButton>)>,
    mut requests: EventWriter<EnterVrRequested>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            requests.write(EnterVrRequested);
        }
    }
}

fn log_enter_vr_requests(mut requests: EventReader<EnterVrRequested>) {
    for _ in requests.read() {
        info!(target: "device", "Enter VR requested; handing off to the XR runtime");
    }
}
