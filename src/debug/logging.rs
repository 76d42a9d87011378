use super::{DebugState, DebugStats};
use crate::gameplay::home_run::HomeRunState;
use bevy::prelude::*;

pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
    home_run: Option<Res<HomeRunState>>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        let p = stats.ball_position;
        info!(
            "SIM frame={} t={:.3}s fps={:.1} ft_ms={:.1} ball=({:.2},{:.2},{:.2}) speed={:.2} home_run={}",
            state.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            p.x,
            p.y,
            p.z,
            stats.ball_speed,
            home_run.is_some_and(|h| h.home_run)
        );
    }
}
