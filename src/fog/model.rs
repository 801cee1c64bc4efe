use crate::fog::transform::Point;
use serde::{Deserialize, Serialize};

/// One circular brush application, in image-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "r")]
    pub radius: f64,
    pub erase: bool,
}

impl Stroke {
    pub const fn reveal(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            radius,
            erase: false,
        }
    }

    pub const fn erase(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            radius,
            erase: true,
        }
    }

    pub fn at(center: Point, radius: f64, erase: bool) -> Self {
        Self {
            x: center.x,
            y: center.y,
            radius,
            erase,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Finite centre and a finite, positive radius. Anything else cannot be
    /// drawn or stored.
    pub fn is_drawable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }
}

/// Append-only history of strokes. Later strokes paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
    revision: u64,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        let mut store = Self::default();
        store.replace(strokes);
        store
    }

    pub fn append(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.revision += 1;
    }

    pub fn all(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn replace(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
        self.revision += 1;
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
