//! Frame timing.
//!
//! One `FrameClock` per render loop; `tick()` is called once per rendered frame
//! and the resulting `FrameTime` is handed to the frame producer.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
