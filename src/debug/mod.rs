//! Debug module: feature gated runtime stats/logging and the Rapier wireframe toggle.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::core::system::system_order::HomeRunCheckSet;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub frame_counter: u64,
    pub time_accum: f32,
    pub log_interval: f32,
    pub rapier_wireframe: bool,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            frame_counter: 0,
            time_accum: 0.0,
            log_interval: 1.0,
            rapier_wireframe: false,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub ball_position: Vec3,
    pub ball_speed: f32,
}

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier3d::render::DebugRenderContext;
        use keys::debug_key_input_system;
        use logging::debug_logging_system;
        use stats::debug_stats_collect_system;

        fn toggle_rapier_debug(state: Res<DebugState>, ctx: Option<ResMut<DebugRenderContext>>) {
            if let Some(mut c) = ctx {
                if c.enabled != state.rapier_wireframe {
                    c.enabled = state.rapier_wireframe;
                }
            }
        }

        let wireframe = app
            .world()
            .get_resource::<crate::core::config::GameConfig>()
            .is_some_and(|c| c.rapier_debug);
        app.insert_resource(DebugState {
            rapier_wireframe: wireframe,
            ..default()
        });
        app.init_resource::<DebugStats>().add_systems(
            Update,
            (
                debug_key_input_system,
                toggle_rapier_debug,
                debug_stats_collect_system,
                debug_logging_system,
            )
                .chain()
                .after(HomeRunCheckSet),
        );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;

#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
