use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Floor for the IoU denominator so degenerate boxes never divide by zero.
pub const IOU_EPSILON: f32 = 1e-6;

/// Axis-aligned box in image-relative coordinates.
///
/// All corners lie in `[0, 1]` with `x0 <= x1` and `y0 <= y1`. A zero-area
/// box means "no location known".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl NormalizedBox {
    pub const EMPTY: NormalizedBox = NormalizedBox {
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    };

    /// Build a box from two corners, clamping into `[0, 1]` and ordering
    /// the corners. Non-finite coordinates are treated as 0.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let (x0, x1) = ordered(clamp_unit(x0), clamp_unit(x1));
        let (y0, y1) = ordered(clamp_unit(y0), clamp_unit(y1));
        Self { x0, y0, x1, y1 }
    }

    /// Bounding box of a polygon given as `(x, y)` pairs.
    ///
    /// Missing coordinates default to 0; an empty polygon yields the empty
    /// box rather than an error.
    pub fn from_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = (Option<f32>, Option<f32>)>,
    {
        let mut bounds: Option<(f32, f32, f32, f32)> = None;

        for (x, y) in vertices {
            let x = finite_or_zero(x.unwrap_or(0.0));
            let y = finite_or_zero(y.unwrap_or(0.0));
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }

        match bounds {
            Some((x0, y0, x1, y1)) => Self::new(x0, y0, x1, y1),
            None => Self::EMPTY,
        }
    }

    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Whether the box carries a real location (positive area).
    pub fn is_located(&self) -> bool {
        self.area() > 0.0
    }

    pub fn intersection_area(&self, other: &NormalizedBox) -> f32 {
        let w = self.x1.min(other.x1) - self.x0.max(other.x0);
        let h = self.y1.min(other.y1) - self.y0.max(other.y0);
        w.max(0.0) * h.max(0.0)
    }

    pub fn iou(&self, other: &NormalizedBox) -> f32 {
        iou(self, other)
    }
}

/// Intersection-over-union of two boxes, in `[0, 1]`.
pub fn iou(a: &NormalizedBox, b: &NormalizedBox) -> f32 {
    let inter = a.intersection_area(b);
    inter / (a.area() + b.area() - inter).max(IOU_EPSILON)
}

fn clamp_unit(v: f32) -> f32 {
    finite_or_zero(v).clamp(0.0, 1.0)
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
