// This file is part of Home Run Derby.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pointer grabbing for the ball and bat.
//!
//! The mouse stands in for a controller ray: pressing the left button casts a ray from the
//! player camera through the cursor and picks the nearest [`Grabbable`] within reach.
//! Dynamic bodies are pulled towards the hold point through their velocity (so releasing
//! throws them); kinematic bodies move towards it directly and push dynamic bodies on contact.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier3d::prelude::{RigidBody, Velocity};

use crate::core::components::{Grabbable, PlayerCamera};
use crate::core::config::{GameConfig, GrabConfig, GrabMode};
use crate::core::system::system_order::InteractionSet;

pub struct GrabPlugin;

impl Plugin for GrabPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveGrab>().add_systems(
            Update,
            (begin_or_end_grab, move_grabbed).chain().in_set(InteractionSet),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Held {
    pub entity: Entity,
    /// Distance along the pointer ray at which the object is held.
    pub hold_distance: f32,
}

#[derive(Resource, Default, Debug)]
pub struct ActiveGrab {
    pub held: Option<Held>,
}

/// Nearest non-negative ray parameter where `origin + t * dir` meets the sphere.
/// `dir` must be normalized. A ray starting inside the sphere hits at `t = 0`.
pub fn ray_sphere_hit(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let disc = b * b - c;
    if disc < 0.0 || b > 0.0 {
        return None;
    }
    Some(-b - disc.sqrt())
}

/// Maximum pick distance for a grab mode.
pub fn reach(mode: GrabMode, cfg: &GrabConfig) -> f32 {
    match mode {
        GrabMode::Distance => cfg.max_distance,
        GrabMode::OneHand => cfg.one_hand_reach,
    }
}

/// Closest grabbable hit by the ray within its mode's reach.
pub fn pick_nearest(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (Entity, Vec3, Grabbable)>,
    cfg: &GrabConfig,
) -> Option<(Entity, f32)> {
    candidates
        .into_iter()
        .filter_map(|(e, center, g)| {
            let t = ray_sphere_hit(ray.origin, *ray.direction, center, g.pick_radius)?;
            (t <= reach(g.mode, cfg)).then_some((e, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Where a freshly grabbed object is held along the ray.
pub fn hold_distance(mode: GrabMode, hit_distance: f32, cfg: &GrabConfig) -> f32 {
    match mode {
        // Object travels towards the hand.
        GrabMode::Distance => cfg.hold_distance,
        GrabMode::OneHand => hit_distance,
    }
}

/// Velocity for a dynamic body pulled towards `target`.
pub fn pull_velocity(current: Vec3, position: Vec3, target: Vec3, cfg: &GrabConfig, dt: f32) -> Vec3 {
    let mut v = current + (target - position) * cfg.pull_strength * dt;
    if cfg.max_speed > 0.0 {
        v = v.clamp_length_max(cfg.max_speed);
    }
    v * cfg.damping
}

/// Move from `position` towards `target` by at most `speed * dt`; `speed <= 0` jumps to it.
pub fn step_towards(position: Vec3, target: Vec3, speed: f32, dt: f32) -> Vec3 {
    let to_target = target - position;
    let max_step = speed * dt;
    if speed <= 0.0 || to_target.length() <= max_step {
        target
    } else {
        position + to_target.normalize_or_zero() * max_step
    }
}

fn pointer_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<PlayerCamera>>,
) -> Option<Ray3d> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, cam_tf) = cameras.single().ok()?;
    camera.viewport_to_world(cam_tf, cursor).ok()
}

fn begin_or_end_grab(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<PlayerCamera>>,
    grabbables: Query<(Entity, &GlobalTransform, &Grabbable)>,
    mut active: ResMut<ActiveGrab>,
    cfg: Res<GameConfig>,
) {
    if buttons.just_released(MouseButton::Left) {
        if let Some(held) = active.held.take() {
            debug!(target: "grab", "Released {:?}", held.entity);
        }
    }
    if active.held.is_some() || !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(ray) = pointer_ray(&windows, &cameras) else {
        return;
    };
    let candidates = grabbables
        .iter()
        .map(|(e, tf, g)| (e, tf.translation(), *g));
    if let Some((entity, t)) = pick_nearest(ray, candidates, &cfg.grab) {
        let Ok((_, _, g)) = grabbables.get(entity) else {
            return;
        };
        let held = Held {
            entity,
            hold_distance: hold_distance(g.mode, t, &cfg.grab),
        };
        debug!(target: "grab", "Grabbed {entity:?} at {t:.2}m ({:?})", g.mode);
        active.held = Some(held);
    }
}

fn move_grabbed(
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<PlayerCamera>>,
    mut active: ResMut<ActiveGrab>,
    mut bodies: Query<(&mut Transform, &RigidBody, Option<&mut Velocity>), With<Grabbable>>,
    cfg: Res<GameConfig>,
) {
    let Some(held) = active.held else {
        return;
    };
    let Some(ray) = pointer_ray(&windows, &cameras) else {
        return;
    };
    let target = ray.get_point(held.hold_distance);
    let dt = time.delta_secs();
    let Ok((mut tf, body, velocity)) = bodies.get_mut(held.entity) else {
        active.held = None;
        return;
    };
    match (body, velocity) {
        (RigidBody::Dynamic, Some(mut vel)) => {
            vel.linvel = pull_velocity(vel.linvel, tf.translation, target, &cfg.grab, dt);
        }
        _ => {
            tf.translation = step_towards(tf.translation, target, cfg.grab.swing_speed, dt);
        }
    }
}
