//! Keyboard and mouse handling for the viewer shell
//!
//! Special keys become [`InputAction`]s; pointer movement keys are left to
//! the pointer controller.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
