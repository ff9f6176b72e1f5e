use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate. Equality is exact integer equality, which the
/// grouping stage relies on for duplicate detection.
pub type PixelPoint = Point2<i32>;

/// Axis-aligned box in pixel space, corners as remapped from the normalized
/// detector box.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub top_left: PixelPoint,
    pub bottom_right: PixelPoint,
}

impl PixelBox {
    /// Integer midpoint of the box, with floor division.
    ///
    /// Two boxes whose true centers differ by less than a pixel in either
    /// axis map to the same point.
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            (self.top_left.x + self.bottom_right.x) / 2,
            (self.top_left.y + self.bottom_right.y) / 2,
        )
    }

    /// Strict interior test: points on any edge are outside.
    pub fn contains(&self, point: PixelPoint) -> bool {
        self.top_left.x < point.x
            && point.x < self.bottom_right.x
            && self.top_left.y < point.y
            && point.y < self.bottom_right.y
    }
}

/// `Line::fit` failure: both points share an x coordinate, so `y = m*x + c`
/// cannot represent the line through them.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFitError {
    #[error("cannot fit y = m*x + c through points with equal x (x = {x})")]
    Vertical { x: i32 },
}

/// Line `y = slope * x + intercept`, fit through two pixel points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub slope: f32,
    pub intercept: f32,
}

impl Line {
    /// The unique line through two points with distinct x coordinates.
    ///
    /// Vertical or coincident point pairs are a distinct failure, never a
    /// silently wrong slope.
    pub fn fit(p1: PixelPoint, p2: PixelPoint) -> Result<Line, LineFitError> {
        if p1.x == p2.x {
            return Err(LineFitError::Vertical { x: p1.x });
        }
        let slope = (p2.y - p1.y) as f32 / (p2.x - p1.x) as f32;
        let intercept = p1.y as f32 - slope * p1.x as f32;
        Ok(Line { slope, intercept })
    }

    /// Predicted y at the given x.
    #[inline]
    pub fn y_at(&self, x: i32) -> f32 {
        self.slope * x as f32 + self.intercept
    }

    /// Whether the point lies on the line, within a vertical-distance
    /// tolerance in pixels.
    pub fn contains(&self, point: PixelPoint, tolerance: f32) -> bool {
        (point.y as f32 - self.y_at(point.x)).abs() <= tolerance
    }
}
