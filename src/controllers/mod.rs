//! Pointer-driven camera controllers.
//!
//! These are plain state machines fed with element-relative pointer data; the
//! browser layer owns the event listeners and forwards results to callbacks.

pub mod spherical;
pub mod trackball;

pub use spherical::SphericalRotator;
pub use trackball::{TrackballOptions, TrackballRotator, TrackballState};
