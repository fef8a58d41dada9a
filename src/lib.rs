//! Ballpark viewer application
//!
//! Configuration, input mapping and the systems the event loop in
//! `main.rs` drives. The interactive state lives in the workspace crates:
//! `ballpark_core` (pool, tools, locators), `ballpark_input` (desktop
//! pointer) and `ballpark_render` (clip registers and the park pipeline).

pub mod config;
pub mod input;
pub mod systems;
