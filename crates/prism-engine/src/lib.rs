//! Prism engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the viewer:
//! window loop, device/surface, input, frame timing, procedural geometry and
//! the 3D render layer (camera, meshes, shader programs, renderer service).

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod geometry;
pub mod render;
pub mod paint;
