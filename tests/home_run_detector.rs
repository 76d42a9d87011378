use bevy::prelude::*;
use home_run_derby::core::components::Ball;
use home_run_derby::core::system::system_order::HomeRunCheckSet;
use home_run_derby::gameplay::home_run::HomeRunPlugin;
use home_run_derby::{GameConfig, HomeRunState, ScoreboardMessage};

#[derive(Resource, Default)]
struct Shown(Vec<String>);

fn collect(mut reader: EventReader<ScoreboardMessage>, mut shown: ResMut<Shown>) {
    for ScoreboardMessage(text) in reader.read() {
        shown.0.push(text.clone());
    }
}

fn detector_app(start_delay: f32, ball_at: Vec3) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    let mut cfg = GameConfig::default();
    cfg.home_run.start_delay = start_delay;
    app.insert_resource(cfg);
    app.add_plugins(HomeRunPlugin);
    app.init_resource::<Shown>();
    app.add_systems(Update, collect.after(HomeRunCheckSet));
    let ball = app.world_mut().spawn((Ball, Transform::from_translation(ball_at))).id();
    (app, ball)
}

fn move_ball(app: &mut App, ball: Entity, to: Vec3) {
    app.world_mut().get_mut::<Transform>(ball).unwrap().translation = to;
}

#[test]
fn ball_past_the_wall_is_a_home_run() {
    let (mut app, _) = detector_app(0.0, Vec3::new(0.0, 1.0, -51.0));
    app.update();
    assert!(app.world().resource::<HomeRunState>().home_run);
    assert_eq!(app.world().resource::<Shown>().0, vec!["HOME RUN!".to_string()]);
}

#[test]
fn ball_short_of_the_wall_is_not() {
    let (mut app, _) = detector_app(0.0, Vec3::new(0.0, 1.0, -40.0));
    for _ in 0..3 {
        app.update();
    }
    assert!(!app.world().resource::<HomeRunState>().home_run);
    assert!(app.world().resource::<Shown>().0.is_empty());
}

#[test]
fn message_is_sent_once_per_session() {
    let (mut app, ball) = detector_app(0.0, Vec3::new(0.0, 1.0, -3.0));
    app.update();
    for z in [-55.0, -60.0, -20.0, -80.0] {
        move_ball(&mut app, ball, Vec3::new(0.0, 2.0, z));
        app.update();
    }
    assert!(app.world().resource::<HomeRunState>().home_run);
    assert_eq!(app.world().resource::<Shown>().0.len(), 1);
}

#[test]
fn detector_waits_for_arming_delay() {
    // One hour of arming never elapses inside a test run.
    let (mut app, _) = detector_app(3600.0, Vec3::new(0.0, 1.0, -51.0));
    app.update();
    app.update();
    assert!(!app.world().resource::<HomeRunState>().home_run);
    assert!(app.world().resource::<Shown>().0.is_empty());
}
