//! Desktop pointer input
//!
//! This crate turns mouse and keyboard input into the pose and button of an
//! emulated 6-DOF pointer tool, for running the viewer without tracked
//! devices.

mod pointer_controller;

pub use pointer_controller::{PointerController, PointerControl, ToolDriver};
