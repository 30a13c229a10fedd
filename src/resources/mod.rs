//! ECS resources made available to systems.
//!
//! Overview
//! - `animationconfig` – INI-backed defaults for new sprites and the time scale
//! - `animationstore` – JSON sprite sheet templates used to build sprites
//! - `worldtime` – simulation time and delta
pub mod animationconfig;
pub mod animationstore;
pub mod worldtime;
