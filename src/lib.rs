//! A classic falling-block puzzle game.
//!
//! The simulation lives in a `bevy_ecs` [`World`](bevy_ecs::world::World):
//! [`systems`] drives it with player [`Command`](components::Command)s and
//! gravity ticks paced by a [`Cadence`](cadence::Cadence). Everything else in
//! the crate (config, high scores, the terminal front end) only talks to the
//! world through those entry points and reads it back for rendering.

pub mod app;
pub mod cadence;
pub mod catalog;
pub mod components;
pub mod config;
pub mod game;
pub mod input;
pub mod menu_types;
pub mod provider;
pub mod scores;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;
