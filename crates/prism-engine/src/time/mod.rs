//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window (or per render loop)
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - feed `FrameTime::wall_ms` to `animation_time` for shader time uniforms

mod animation;
mod frame_clock;

pub use animation::{animation_time, ANIMATION_PERIOD_SECS};
pub use frame_clock::{wall_clock_millis, FrameClock, FrameTime};
