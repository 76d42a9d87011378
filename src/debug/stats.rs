use super::{DebugState, DebugStats};
use crate::core::components::Ball;
use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_ball: Query<(&Transform, Option<&Velocity>), With<Ball>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    if let Some((tf, vel)) = q_ball.iter().next() {
        stats.ball_position = tf.translation;
        stats.ball_speed = vel.map_or(0.0, |v| v.linvel.length());
    }
}
