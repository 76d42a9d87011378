use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::config::GameConfig;

/// Our wrapper around Rapier: the physics step plus the optional collider wireframe.
/// Gravity stays at Rapier's default (-9.81 m/s² on Y), matching the scene's meter scale.
pub struct PhysicsSetupPlugin {
    pub debug_render: bool,
}

impl PhysicsSetupPlugin {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            debug_render: cfg.rapier_debug || cfg!(feature = "debug"),
        }
    }
}

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
        if self.debug_render {
            // Starts hidden in debug builds unless requested; F3 toggles it.
            let enabled = app
                .world()
                .get_resource::<GameConfig>()
                .is_some_and(|c| c.rapier_debug);
            app.add_plugins(RapierDebugRenderPlugin {
                enabled,
                ..default()
            });
        }
    }
}
