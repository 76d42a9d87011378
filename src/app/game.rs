// This file is part of Home Run Derby.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::{HomeRunCheckSet, InteractionSet, ScoreboardSet};
use crate::debug::DebugPlugin;
use crate::gameplay::home_run::HomeRunPlugin;
use crate::gameplay::scene::ScenePlugin;
use crate::interaction::grab::GrabPlugin;
use crate::interaction::locomotion::LocomotionPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::interaction::session::enter_vr_panel::EnterVrPanelPlugin;
use crate::physics::rapier::PhysicsSetupPlugin;
use crate::rendering::scoreboard::ScoreboardPlugin;

/// Everything except windowing/rendering defaults. Expects `GameConfig` to be inserted first.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();
        app.init_resource::<GameConfig>()
            .configure_sets(
                Update,
                (
                    InteractionSet,
                    HomeRunCheckSet.after(InteractionSet),
                    ScoreboardSet.after(HomeRunCheckSet),
                ),
            )
            .add_plugins((
                PhysicsSetupPlugin::from_config(&cfg),
                ScenePlugin,
                HomeRunPlugin,
                ScoreboardPlugin,
                GrabPlugin,
                LocomotionPlugin,
                EnterVrPanelPlugin::default(),
                DebugPlugin,
                ConfigHotReloadPlugin,
                AutoClosePlugin,
            ));
    }
}
