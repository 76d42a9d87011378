// This file is part of Home Run Derby.
// Runtime config hot-reload (desktop only).
// Watches the layered RON files for modification timestamp changes and, when detected,
// re-loads the layered config. On success the `GameConfig` resource is replaced; a second
// system then pushes the settings that are baked into entities at spawn (window size/title,
// floor/ball/bat physics materials, grab mode and pick radii). Parse errors are logged and
// the prior config retained.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Friction, Restitution};
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::components::{Ball, Bat, FloorCollider, Grabbable};
use crate::core::config::GameConfig;
use crate::gameplay::scene::{ball_grabbable, bat_grabbable};

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    /// Polling interval seconds.
    pub interval_secs: f32,
}

impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}

impl FromWorld for ConfigReloadState {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<ConfigReloadSettings>()
            .map_or(0.5, |s| s.interval_secs.max(0.05));
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
        }
    }
}

pub struct ConfigHotReloadPlugin;

impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        // Only meaningful on native (std::fs) targets.
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(
                    Update,
                    (
                        poll_and_reload_config,
                        apply_config_to_scene.run_if(resource_changed::<GameConfig>),
                    )
                        .chain(),
                );
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
) {
    if !state.timer.tick(time.delta()).finished() {
        return;
    }

    use std::fs;
    use std::time::UNIX_EPOCH;
    let mut dirty = false;
    let mut existing = Vec::new();
    for path in &settings.paths {
        let Ok(mod_time) = fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        existing.push(path.clone());
        let entry = state.last_mod.entry(path.clone()).or_insert(UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    if !dirty {
        return;
    }

    let (new_cfg, _used, errors) = GameConfig::load_layered(existing.iter());
    if !errors.is_empty() {
        for e in errors {
            warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}");
        }
        return;
    }
    if *cfg_res == new_cfg {
        return;
    }
    info!(target: "config", "Config hot-reload applied");
    for w in new_cfg.validate() {
        warn!(target: "config", "{w}");
    }
    *cfg_res = new_cfg;
}

/// Push spawn-time settings from the current `GameConfig` onto existing entities.
#[allow(clippy::type_complexity)]
pub fn apply_config_to_scene(
    cfg: Res<GameConfig>,
    mut windows: Query<&mut Window>,
    mut balls: Query<
        (&mut Restitution, &mut Friction, &mut Grabbable),
        (With<Ball>, Without<Bat>, Without<FloorCollider>),
    >,
    mut bats: Query<
        (&mut Restitution, &mut Grabbable),
        (With<Bat>, Without<Ball>, Without<FloorCollider>),
    >,
    mut floors: Query<&mut Restitution, (With<FloorCollider>, Without<Ball>, Without<Bat>)>,
) {
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != cfg.window.width || window.height() != cfg.window.height {
            window.resolution.set(cfg.window.width, cfg.window.height);
        }
        if window.title != cfg.window.title {
            window.title = cfg.window.title.clone();
        }
    }
    let scene = &cfg.scene;
    for (mut restitution, mut friction, mut grabbable) in balls.iter_mut() {
        restitution.coefficient = scene.ball.restitution;
        friction.coefficient = scene.ball.friction;
        *grabbable = ball_grabbable(&cfg);
    }
    for (mut restitution, mut grabbable) in bats.iter_mut() {
        restitution.coefficient = scene.bat.restitution;
        *grabbable = bat_grabbable(&cfg);
    }
    for mut restitution in floors.iter_mut() {
        restitution.coefficient = scene.floor.restitution;
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::core::config::GrabMode;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn scene_app(settings: ConfigReloadSettings) -> (App, Entity, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.insert_resource(GameConfig::default());
        app.insert_resource(settings);
        app.add_plugins(ConfigHotReloadPlugin);
        let cfg = GameConfig::default();
        let ball = app
            .world_mut()
            .spawn((
                Ball,
                ball_grabbable(&cfg),
                Restitution::coefficient(0.9),
                Friction::coefficient(0.5),
            ))
            .id();
        let bat = app
            .world_mut()
            .spawn((Bat, bat_grabbable(&cfg), Restitution::coefficient(0.1)))
            .id();
        let floor = app
            .world_mut()
            .spawn((FloorCollider, Restitution::coefficient(0.9)))
            .id();
        (app, ball, bat, floor)
    }

    #[test]
    fn changed_config_reaches_spawned_entities() {
        let (mut app, ball, bat, floor) = scene_app(ConfigReloadSettings {
            paths: Vec::new(),
            interval_secs: 0.05,
        });
        app.update();
        {
            let mut cfg = app.world_mut().resource_mut::<GameConfig>();
            cfg.scene.floor.restitution = 0.4;
            cfg.scene.ball.friction = 0.2;
            cfg.scene.bat.restitution = 0.6;
            cfg.grab.mode = GrabMode::OneHand;
            cfg.grab.pick_padding = 0.5;
        }
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Restitution>(floor).unwrap().coefficient, 0.4);
        assert_eq!(world.get::<Friction>(ball).unwrap().coefficient, 0.2);
        assert_eq!(world.get::<Restitution>(bat).unwrap().coefficient, 0.6);
        let g = world.get::<Grabbable>(ball).unwrap();
        assert_eq!(g.mode, GrabMode::OneHand);
        assert!((g.pick_radius - (0.25 + 0.5)).abs() < 1e-6);
        let g = world.get::<Grabbable>(bat).unwrap();
        assert_eq!(g.mode, GrabMode::OneHand);
        assert!((g.pick_radius - (0.5 + 0.5)).abs() < 1e-6);
    }

    #[cfg(not(feature = "embedded_assets"))]
    #[test]
    fn edited_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ron");
        std::fs::write(&path, "(scene: (ball: (restitution: 0.9)))").unwrap();
        let (mut app, ball, _, _) = scene_app(ConfigReloadSettings {
            paths: vec![path.clone()],
            interval_secs: 0.05,
        });
        app.update();
        app.update();
        assert_eq!(app.world().get::<Restitution>(ball).unwrap().coefficient, 0.9);

        std::fs::write(
            &path,
            r#"(scene: (ball: (restitution: 0.3)), grab: (mode: "one_hand"))"#,
        )
        .unwrap();
        // Push the timestamp forward so coarse filesystem clocks still register the edit.
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(std::time::SystemTime::now() + Duration::from_secs(60))
            .unwrap();
        drop(file);
        app.update();
        app.update();

        let world = app.world();
        assert_eq!(world.resource::<GameConfig>().grab.mode, GrabMode::OneHand);
        assert_eq!(world.get::<Restitution>(ball).unwrap().coefficient, 0.3);
        assert_eq!(world.get::<Grabbable>(ball).unwrap().mode, GrabMode::OneHand);
    }
}
