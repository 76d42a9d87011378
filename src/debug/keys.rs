use super::DebugState;
use bevy::prelude::*;

/// F3 toggles the Rapier collider wireframe.
pub fn debug_key_input_system(keys: Option<Res<ButtonInput<KeyCode>>>, mut state: ResMut<DebugState>) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::F3) {
        state.rapier_wireframe = !state.rapier_wireframe;
        info!(
            "RAPIER_WIREFRAME {} frame={}",
            if state.rapier_wireframe { "on" } else { "off" },
            state.frame_counter
        );
    }
}
