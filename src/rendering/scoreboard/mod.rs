// This file is part of Home Run Derby.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scoreboard: a message drawn onto an offscreen RGBA surface that textures a plane in the
//! scene. Messages arrive as [`ScoreboardMessage`] events; each one redraws the surface and
//! flags the texture for re-upload.

pub mod canvas;
pub mod surface;

use std::path::Path;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::core::components::ScoreboardBoard;
use crate::core::config::GameConfig;
use crate::core::system::system_order::{HomeRunCheckSet, ScoreboardSet};
use canvas::CanvasSurface;
use surface::{DrawSurface, FillStyle};

/// Text the scoreboard should show.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ScoreboardMessage(pub String);

/// Current scoreboard surface plus the message it shows.
#[derive(Resource)]
pub struct ScoreboardCanvas {
    surface: Box<dyn DrawSurface>,
    style: FillStyle,
    baseline_offset: f32,
    message: String,
    needs_upload: bool,
}

impl ScoreboardCanvas {
    pub fn new(surface: Box<dyn DrawSurface>, style: FillStyle, baseline_offset: f32) -> Self {
        Self {
            surface,
            style,
            baseline_offset,
            message: String::new(),
            needs_upload: false,
        }
    }

    /// Clear the surface, draw `message` centered, and mark the texture dirty.
    pub fn update(&mut self, message: &str) {
        let size = self.surface.size().as_vec2();
        let anchor = Vec2::new(size.x * 0.5, size.y * 0.5 + self.baseline_offset);
        self.surface.clear();
        self.surface.fill_text(message, anchor, &self.style);
        message.clone_into(&mut self.message);
        self.needs_upload = true;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    pub fn surface(&self) -> &dyn DrawSurface {
        self.surface.as_ref()
    }

    /// Pixels to upload if the surface changed since the last call.
    pub fn take_upload(&mut self) -> Option<&[u8]> {
        if !self.needs_upload {
            return None;
        }
        self.needs_upload = false;
        Some(self.surface.pixels())
    }
}

/// Texture the canvas is uploaded into.
#[derive(Resource, Debug, Clone)]
pub struct ScoreboardTexture(pub Handle<Image>);

pub struct ScoreboardPlugin;

impl Plugin for ScoreboardPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ScoreboardMessage>()
            .configure_sets(Update, ScoreboardSet.after(HomeRunCheckSet))
            .add_systems(Startup, setup_scoreboard)
            .add_systems(
                Update,
                (apply_scoreboard_messages, upload_scoreboard_texture)
                    .chain()
                    .in_set(ScoreboardSet),
            );
    }
}

/// Build the production canvas from config, drawing the idle message.
pub fn canvas_from_config(cfg: &GameConfig) -> ScoreboardCanvas {
    let sb = &cfg.scoreboard;
    let font = match CanvasSurface::load_font(Path::new(&sb.font_path)) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!(target: "scoreboard", "Scoreboard font unavailable ({e}); text will not be rasterized");
            None
        }
    };
    let surface = CanvasSurface::new(sb.surface_width, sb.surface_height, font);
    let mut canvas = ScoreboardCanvas::new(
        Box::new(surface),
        FillStyle::from_rgb(sb.font_px, sb.color),
        sb.baseline_offset,
    );
    canvas.update(&sb.idle_message);
    canvas
}

fn setup_scoreboard(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut canvas = canvas_from_config(&cfg);
    let size = canvas.surface().size();
    let pixels = canvas.take_upload().map(<[u8]>::to_vec).unwrap_or_default();
    let image = Image::new(
        Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        pixels,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    let texture = images.add(image);

    let sb = &cfg.scoreboard;
    let half = Vec2::new(sb.plane_size[0], sb.plane_size[1]) * 0.5;
    let position = Vec3::from_array(sb.position);
    let eye = Vec3::new(0.0, cfg.scene.eye_height, 0.0);
    commands.spawn((
        Name::new("Scoreboard"),
        ScoreboardBoard,
        Mesh3d(meshes.add(Plane3d::new(Vec3::Z, half))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(texture.clone()),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            cull_mode: None,
            double_sided: true,
            ..default()
        })),
        // Local +Z (the textured face) points back at the player.
        Transform::from_translation(position).looking_to(position - eye, Vec3::Y),
    ));

    info!(target: "scoreboard", "Scoreboard ready ({}x{}) showing '{}'", size.x, size.y, canvas.message());
    commands.insert_resource(canvas);
    commands.insert_resource(ScoreboardTexture(texture));
}

pub fn apply_scoreboard_messages(
    mut events: EventReader<ScoreboardMessage>,
    canvas: Option<ResMut<ScoreboardCanvas>>,
) {
    let Some(mut canvas) = canvas else {
        events.clear();
        return;
    };
    for ScoreboardMessage(text) in events.read() {
        info!(target: "scoreboard", "Scoreboard -> '{text}'");
        canvas.update(text);
    }
}

fn upload_scoreboard_texture(
    canvas: Option<ResMut<ScoreboardCanvas>>,
    texture: Option<Res<ScoreboardTexture>>,
    mut images: ResMut<Assets<Image>>,
) {
    let (Some(mut canvas), Some(texture)) = (canvas, texture) else {
        return;
    };
    if !canvas.needs_upload() {
        return;
    }
    let Some(image) = images.get_mut(&texture.0) else {
        return;
    };
    if let Some(pixels) = canvas.take_upload() {
        image.data = Some(pixels.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Fill(String, Vec2, FillStyle),
    }

    struct RecordingSurface {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl DrawSurface for RecordingSurface {
        fn size(&self) -> UVec2 {
            UVec2::new(2048, 256)
        }
        fn clear(&mut self) {
            self.calls.lock().unwrap().push(Call::Clear);
        }
        fn fill_text(&mut self, text: &str, anchor: Vec2, style: &FillStyle) {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Fill(text.to_string(), anchor, style.clone()));
        }
        fn pixels(&self) -> &[u8] {
            &[]
        }
    }

    fn recording_canvas() -> (ScoreboardCanvas, Arc<Mutex<Vec<Call>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let canvas = ScoreboardCanvas::new(
            Box::new(RecordingSurface { calls: calls.clone() }),
            FillStyle::from_rgb(120.0, [1.0, 0.0, 0.0]),
            16.0,
        );
        (canvas, calls)
    }

    #[test]
    fn update_clears_then_draws_centered_and_marks_dirty() {
        let (mut canvas, calls) = recording_canvas();
        assert!(!canvas.needs_upload());
        canvas.update("HOME RUN!");
        let calls = calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                Call::Clear,
                Call::Fill(
                    "HOME RUN!".into(),
                    Vec2::new(1024.0, 144.0),
                    FillStyle { font_px: 120.0, color: [255, 0, 0, 255] },
                ),
            ]
        );
        assert!(canvas.needs_upload());
        assert_eq!(canvas.message(), "HOME RUN!");
        assert!(canvas.take_upload().is_some());
        assert!(canvas.take_upload().is_none());
    }

    #[test]
    fn message_event_redraws_canvas() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<ScoreboardMessage>();
        let (canvas, calls) = recording_canvas();
        app.insert_resource(canvas);
        app.add_systems(Update, apply_scoreboard_messages);

        app.world_mut().send_event(ScoreboardMessage("HOME RUN!".into()));
        app.update();

        let canvas = app.world().resource::<ScoreboardCanvas>();
        assert_eq!(canvas.message(), "HOME RUN!");
        assert!(canvas.needs_upload());
        let fills: Vec<_> = calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::Fill(t, ..) => Some(t.clone()),
                Call::Clear => None,
            })
            .collect();
        assert_eq!(fills, vec!["HOME RUN!".to_string()]);
    }
}
