use bevy::prelude::*;

use crate::core::config::GrabMode;

/// Marker for the baseball (dynamic body polled by the home-run detector).
#[derive(Component)]
pub struct Ball;

/// Marker for the bat (kinematic body).
#[derive(Component)]
pub struct Bat;

/// Marker for the ground plane.
#[derive(Component)]
pub struct Floor;

/// Collider slab under the floor (carries the floor's physics material).
#[derive(Component)]
pub struct FloorCollider;

/// Marker for the outfield wall.
#[derive(Component)]
pub struct Wall;

/// Marker for the scoreboard plane carrying the canvas texture.
#[derive(Component)]
pub struct ScoreboardBoard;

/// Surface the player may walk on; half extents on the XZ plane around the entity origin.
#[derive(Component, Debug, Copy, Clone)]
pub struct LocomotionEnvironment {
    pub half_extents: Vec2,
}

/// Entity can be picked up by the player.
#[derive(Component, Debug, Copy, Clone)]
pub struct Grabbable {
    pub mode: GrabMode,
    /// Radius of the sphere used for pointer picking.
    pub pick_radius: f32,
}

/// Root of the player (moved by locomotion); the camera is its child.
#[derive(Component)]
pub struct PlayerRig;

/// Camera that doubles as the pointer origin for grabbing.
#[derive(Component)]
pub struct PlayerCamera;
