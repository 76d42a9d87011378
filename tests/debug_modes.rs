#![cfg(feature = "debug")]
use bevy::prelude::*;
use home_run_derby::debug::keys::debug_key_input_system;
use home_run_derby::debug::DebugState;

#[test]
fn f3_toggles_rapier_wireframe() {
    let mut app = App::new();
    app.insert_resource(ButtonInput::<KeyCode>::default());
    app.init_resource::<DebugState>();
    app.add_systems(Update, debug_key_input_system);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::F3);
    app.update();
    assert!(app.world().resource::<DebugState>().rapier_wireframe);

    // Holding the key does not toggle again.
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    app.update();
    assert!(app.world().resource::<DebugState>().rapier_wireframe);

    {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release(KeyCode::F3);
        input.clear();
        input.press(KeyCode::F3);
    }
    app.update();
    assert!(!app.world().resource::<DebugState>().rapier_wireframe);
}

#[test]
fn wireframe_starts_from_config() {
    use home_run_derby::debug::DebugPlugin;
    use home_run_derby::GameConfig;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig {
        rapier_debug: true,
        ..default()
    });
    app.add_plugins(DebugPlugin);
    app.update();
    assert!(app.world().resource::<DebugState>().rapier_wireframe);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig::default());
    app.add_plugins(DebugPlugin);
    app.update();
    assert!(!app.world().resource::<DebugState>().rapier_wireframe);
}
