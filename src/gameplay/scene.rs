use std::f32::consts::PI;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::components::{
    Ball, Bat, Floor, FloorCollider, Grabbable, LocomotionEnvironment, PlayerCamera, PlayerRig,
    Wall,
};
use crate::core::config::GameConfig;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_player_rig, spawn_field, spawn_props));
    }
}

fn srgb(c: [f32; 3]) -> Color {
    Color::srgb(c[0], c[1], c[2])
}

fn spawn_player_rig(mut commands: Commands, cfg: Res<GameConfig>) {
    commands
        .spawn((
            Name::new("PlayerRig"),
            PlayerRig,
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|rig| {
            rig.spawn((
                PlayerCamera,
                Camera3d::default(),
                Transform::from_xyz(0.0, cfg.scene.eye_height, 0.0),
            ));
        });
}

fn spawn_field(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let scene = &cfg.scene;
    commands.insert_resource(AmbientLight {
        brightness: 400.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: scene.light_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let floor = &scene.floor;
    let half = Vec2::new(floor.size[0], floor.size[1]) * 0.5;
    const FLOOR_SLAB: f32 = 0.05;
    commands
        .spawn((
            Name::new("Floor"),
            Floor,
            LocomotionEnvironment { half_extents: half },
            Mesh3d(meshes.add(Plane3d::new(Vec3::Y, half))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: srgb(floor.color),
                cull_mode: None,
                double_sided: true,
                ..default()
            })),
            Transform::default(),
            RigidBody::Fixed,
        ))
        .with_children(|p| {
            // Thin slab whose top face sits at y = 0.
            p.spawn((
                FloorCollider,
                Collider::cuboid(half.x, FLOOR_SLAB, half.y),
                Restitution::coefficient(floor.restitution),
                Transform::from_xyz(0.0, -FLOOR_SLAB, 0.0),
            ));
        });

    let wall = &scene.wall;
    let wall_half = Vec2::new(wall.size[0], wall.size[1]) * 0.5;
    commands.spawn((
        Name::new("Wall"),
        Wall,
        Mesh3d(meshes.add(Plane3d::new(Vec3::Z, wall_half))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: srgb(wall.color),
            cull_mode: None,
            double_sided: true,
            ..default()
        })),
        Transform::from_translation(Vec3::from_array(wall.position))
            .with_rotation(Quat::from_rotation_y(PI)),
        RigidBody::Fixed,
        Collider::cuboid(wall_half.x, wall_half.y, wall.thickness * 0.5),
    ));
}

pub fn ball_grabbable(cfg: &GameConfig) -> Grabbable {
    Grabbable {
        mode: cfg.grab.mode,
        pick_radius: cfg.scene.ball.radius + cfg.grab.pick_padding,
    }
}

/// Pick sphere covers the whole bat length.
pub fn bat_grabbable(cfg: &GameConfig) -> Grabbable {
    Grabbable {
        mode: cfg.grab.mode,
        pick_radius: cfg.scene.bat.length * 0.5 + cfg.grab.pick_padding,
    }
}

fn spawn_props(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ball = &cfg.scene.ball;
    commands.spawn((
        Name::new("Ball"),
        Ball,
        ball_grabbable(&cfg),
        Mesh3d(meshes.add(Sphere::new(ball.radius))),
        MeshMaterial3d(materials.add(srgb(ball.color))),
        Transform::from_translation(Vec3::from_array(ball.position)),
        RigidBody::Dynamic,
        Collider::ball(ball.radius),
        ColliderMassProperties::Density(ball.density),
        Friction::coefficient(ball.friction),
        Restitution::coefficient(ball.restitution),
        Velocity::zero(),
        Ccd::enabled(),
    ));

    let bat = &cfg.scene.bat;
    commands.spawn((
        Name::new("Bat"),
        Bat,
        bat_grabbable(&cfg),
        Mesh3d(meshes.add(Cylinder::new(bat.radius, bat.length))),
        MeshMaterial3d(materials.add(srgb(bat.color))),
        Transform::from_translation(Vec3::from_array(bat.position)),
        RigidBody::KinematicPositionBased,
        Collider::cylinder(bat.length * 0.5, bat.radius),
        ColliderMassProperties::Density(bat.density),
        Restitution::coefficient(bat.restitution),
    ));
    info!(
        target: "scene",
        "Scene spawned: ball at {:?}, bat at {:?}, wall z={}",
        ball.position, bat.position, cfg.scene.wall.position[2]
    );
}
