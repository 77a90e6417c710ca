//! Nianshou's Blessing Delivery: the gameplay simulation core of a Lunar New Year endless runner.

pub mod app;
pub mod audio;
pub mod autopilot;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod game;
pub mod level;
pub mod pool;
pub mod save;
pub mod score;
pub mod systems;
pub mod timer;
