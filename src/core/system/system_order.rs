//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. Interaction (locomotion, grab pointer + hold forces before Rapier)
//! 2. Rapier (handled by plugin)
//! 3. HomeRunCheck (position poll, flag transition)
//! 4. Scoreboard (redraw + texture upload)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InteractionSet; // player input applied before physics simulation step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct HomeRunCheckSet; // per-frame threshold poll

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ScoreboardSet; // consumes messages produced by the check
