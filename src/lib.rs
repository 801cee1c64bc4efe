//! Fog-of-war overlay engine for an explorable campaign map.
//!
//! Strokes are recorded in the fixed pixel space of the map image and
//! replayed over a veil every time the viewport pans, zooms or resizes.

pub mod fog;
pub mod logging;
