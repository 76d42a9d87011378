// This file is part of Home Run Derby.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Home-run detection: once per frame the ball position is checked against the outfield
//! boundary and a one-shot flag flips the first time the ball gets past it.
//!
//! The decision itself is the pure [`HomeRunState::step`]; the Bevy system only reads the ball
//! transform, applies the non-finite guard and forwards the resulting message to the scoreboard.

use bevy::prelude::*;

use crate::core::components::Ball;
use crate::core::config::GameConfig;
use crate::core::system::system_order::HomeRunCheckSet;
use crate::rendering::scoreboard::ScoreboardMessage;

/// Boundary the ball must pass for a home run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeRunRule {
    /// Ball depth must be strictly beyond (less than) this value.
    pub boundary_z: f32,
    /// When set, ball height must also be strictly above this value.
    pub min_height: Option<f32>,
}

impl HomeRunRule {
    pub fn crossed(&self, position: Vec3) -> bool {
        position.z < self.boundary_z && self.min_height.is_none_or(|h| position.y > h)
    }
}

/// Session-wide home-run flag. Starts unset and is never reset.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HomeRunState {
    pub home_run: bool,
}

impl HomeRunState {
    /// Advance the flag for one observed ball position. Returns the message to show when this
    /// observation is the one that triggers the home run, `None` otherwise.
    pub fn step(
        self,
        position: Vec3,
        rule: &HomeRunRule,
        message: &str,
    ) -> (Self, Option<ScoreboardMessage>) {
        if self.home_run || !rule.crossed(position) {
            return (self, None);
        }
        (
            Self { home_run: true },
            Some(ScoreboardMessage(message.to_string())),
        )
    }
}

/// Replace every non-finite component with zero; finite components pass through.
pub fn sanitize_position(p: Vec3) -> Vec3 {
    let fix = |v: f32| if v.is_finite() { v } else { 0.0 };
    Vec3::new(fix(p.x), fix(p.y), fix(p.z))
}

/// Delay between startup and the first poll.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct DetectorArming(pub Timer);

pub struct HomeRunPlugin;

impl Plugin for HomeRunPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HomeRunState>()
            .add_event::<ScoreboardMessage>()
            .add_systems(Startup, setup_arming)
            .add_systems(
                Update,
                (tick_arming, check_home_run.run_if(detector_armed))
                    .chain()
                    .in_set(HomeRunCheckSet),
            );
    }
}

fn setup_arming(mut commands: Commands, cfg: Res<GameConfig>) {
    let delay = cfg.home_run.start_delay.max(0.0);
    commands.insert_resource(DetectorArming(Timer::from_seconds(delay, TimerMode::Once)));
}

fn tick_arming(time: Res<Time>, arming: Option<ResMut<DetectorArming>>) {
    if let Some(mut t) = arming {
        if !t.finished() {
            t.tick(time.delta());
            if t.finished() {
                info!(target: "home_run", "Home-run detector armed");
            }
        }
    }
}

fn detector_armed(arming: Option<Res<DetectorArming>>) -> bool {
    arming.is_some_and(|t| t.finished())
}

pub fn check_home_run(
    cfg: Res<GameConfig>,
    mut state: ResMut<HomeRunState>,
    mut balls: Query<&mut Transform, With<Ball>>,
    mut messages: EventWriter<ScoreboardMessage>,
) {
    let rule = cfg.home_run_rule();
    for mut tf in balls.iter_mut() {
        let raw = tf.translation;
        let position = sanitize_position(raw);
        if !raw.is_finite() {
            warn!(target: "home_run", "Non-finite ball position {raw:?}; reset components to 0");
            tf.translation = position;
        }
        let (next, message) = state.step(position, &rule, &cfg.home_run.message);
        if next != *state {
            *state = next;
        }
        if let Some(msg) = message {
            info!(target: "home_run", "HOME RUN at z={:.2} y={:.2}", position.z, position.y);
            messages.write(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: HomeRunRule = HomeRunRule { boundary_z: -50.0, min_height: None };

    #[test]
    fn sanitize_zeroes_only_non_finite() {
        let p = sanitize_position(Vec3::new(f32::NAN, 2.5, f32::NEG_INFINITY));
        assert_eq!(p, Vec3::new(0.0, 2.5, 0.0));
        let q = sanitize_position(Vec3::new(f32::INFINITY, -3.0, 7.0));
        assert_eq!(q, Vec3::new(0.0, -3.0, 7.0));
        let finite = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(sanitize_position(finite), finite);
    }

    #[test]
    fn beyond_boundary_sets_flag() {
        let (s, msg) = HomeRunState::default().step(Vec3::new(0.0, 1.0, -51.0), &RULE, "HOME RUN!");
        assert!(s.home_run);
        assert_eq!(msg, Some(ScoreboardMessage("HOME RUN!".into())));
    }

    #[test]
    fn short_of_boundary_keeps_flag_unset() {
        let (s, msg) = HomeRunState::default().step(Vec3::new(0.0, 1.0, -40.0), &RULE, "HOME RUN!");
        assert!(!s.home_run);
        assert!(msg.is_none());
    }

    #[test]
    fn flag_only_triggers_once() {
        let mut state = HomeRunState::default();
        let mut shown = 0;
        for z in [-10.0, -51.0, -60.0, -40.0, -70.0] {
            let (next, msg) = state.step(Vec3::new(0.0, 1.0, z), &RULE, "HOME RUN!");
            state = next;
            shown += msg.into_iter().count();
        }
        assert!(state.home_run);
        assert_eq!(shown, 1);
    }

    #[test]
    fn height_rule_requires_clearing_the_wall() {
        let rule = HomeRunRule { boundary_z: -50.0, min_height: Some(20.0) };
        let (low, _) = HomeRunState::default().step(Vec3::new(0.0, 5.0, -55.0), &rule, "x");
        assert!(!low.home_run);
        let (high, _) = HomeRunState::default().step(Vec3::new(0.0, 21.0, -55.0), &rule, "x");
        assert!(high.home_run);
    }

    #[test]
    fn system_writes_back_sanitized_position() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut cfg = GameConfig::default();
        cfg.home_run.start_delay = 0.0;
        app.insert_resource(cfg);
        app.add_plugins(HomeRunPlugin);
        let ball = app
            .world_mut()
            .spawn((Ball, Transform::from_xyz(f32::NAN, 1.0, -3.0)))
            .id();
        app.update();
        let tf = app.world().get::<Transform>(ball).unwrap();
        assert_eq!(tf.translation, Vec3::new(0.0, 1.0, -3.0));
        assert!(!app.world().resource::<HomeRunState>().home_run);
    }
}
