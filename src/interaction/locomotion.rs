//! Keyboard locomotion for the player rig: WASD to walk, Q/E to turn.
//! Movement is constrained to the locomotion environment (the floor).

use bevy::prelude::*;

use crate::core::components::{LocomotionEnvironment, PlayerRig};
use crate::core::config::{GameConfig, LocomotionConfig};
use crate::core::system::system_order::InteractionSet;

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, move_player_rig.in_set(InteractionSet));
    }
}

/// Raw keyboard intent: `forward` / `strafe` / `turn` in -1..=1.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    pub forward: f32,
    pub strafe: f32,
    pub turn: f32,
}

impl MoveIntent {
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        let axis = |pos: KeyCode, neg: KeyCode| {
            (keys.pressed(pos) as i8 - keys.pressed(neg) as i8) as f32
        };
        Self {
            forward: axis(KeyCode::KeyW, KeyCode::KeyS),
            strafe: axis(KeyCode::KeyD, KeyCode::KeyA),
            turn: axis(KeyCode::KeyQ, KeyCode::KeyE),
        }
    }
}

/// Apply one frame of locomotion to `rig`, keeping it inside `bounds` (center, half extents).
pub fn locomotion_step(
    rig: Transform,
    intent: MoveIntent,
    cfg: &LocomotionConfig,
    bounds: Option<(Vec3, Vec2)>,
    dt: f32,
) -> Transform {
    let mut out = rig;
    if intent.turn != 0.0 {
        out.rotate_y(intent.turn * cfg.turn_speed * dt);
    }
    let forward = out.forward().with_y(0.0).normalize_or_zero();
    let right = out.right().with_y(0.0).normalize_or_zero();
    let step = (forward * intent.forward + right * intent.strafe).clamp_length_max(1.0)
        * cfg.speed
        * dt;
    out.translation += step;
    if let Some((center, half)) = bounds {
        out.translation.x = out.translation.x.clamp(center.x - half.x, center.x + half.x);
        out.translation.z = out.translation.z.clamp(center.z - half.y, center.z + half.y);
    }
    out
}

fn move_player_rig(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<GameConfig>,
    environments: Query<(&GlobalTransform, &LocomotionEnvironment)>,
    mut rigs: Query<&mut Transform, With<PlayerRig>>,
) {
    if !cfg.locomotion.enabled {
        return;
    }
    let intent = MoveIntent::from_keys(&keys);
    if intent == MoveIntent::default() {
        return;
    }
    let bounds = environments
        .iter()
        .next()
        .map(|(tf, env)| (tf.translation(), env.half_extents));
    for mut tf in rigs.iter_mut() {
        *tf = locomotion_step(*tf, intent, &cfg.locomotion, bounds, time.delta_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_forward_along_negative_z() {
        let cfg = LocomotionConfig::default();
        let intent = MoveIntent { forward: 1.0, ..default() };
        let out = locomotion_step(Transform::default(), intent, &cfg, None, 1.0);
        assert!((out.translation.z + cfg.speed).abs() < 1e-4);
        assert!(out.translation.x.abs() < 1e-4);
    }

    #[test]
    fn clamped_to_floor_bounds() {
        let cfg = LocomotionConfig::default();
        let intent = MoveIntent { strafe: 1.0, ..default() };
        let bounds = Some((Vec3::ZERO, Vec2::new(2.0, 2.0)));
        let out = locomotion_step(Transform::from_xyz(1.9, 0.0, 0.0), intent, &cfg, bounds, 1.0);
        assert_eq!(out.translation.x, 2.0);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let cfg = LocomotionConfig::default();
        let intent = MoveIntent { forward: 1.0, strafe: 1.0, turn: 0.0 };
        let out = locomotion_step(Transform::default(), intent, &cfg, None, 1.0);
        assert!(out.translation.length() <= cfg.speed + 1e-4);
    }

    #[test]
    fn keys_map_to_intent() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyE);
        let intent = MoveIntent::from_keys(&keys);
        assert_eq!(intent, MoveIntent { forward: 1.0, strafe: 0.0, turn: -1.0 });
    }
}
