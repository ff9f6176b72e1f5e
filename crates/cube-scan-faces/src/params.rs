use serde::{Deserialize, Serialize};

/// Parameters for the face detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceDetectorParams {
    /// Minimal confidence score for a detection to be considered at all.
    pub score_threshold: f32,

    /// Maximal vertical distance, in pixels, for a point to count as lying
    /// on a fitted row line. Compensates for perspective distortion of the
    /// physical cube.
    pub line_tolerance: f32,

    /// Maximal gap between successive `x+y` (or `x-y`) sort keys for points
    /// to stay in the same corner-candidate run.
    pub corner_tolerance: i32,
}

impl Default for FaceDetectorParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.5,
            line_tolerance: 20.0,
            corner_tolerance: 20,
        }
    }
}

impl FaceDetectorParams {
    pub fn with_score_threshold(mut self, score_threshold: f32) -> Self {
        self.score_threshold = score_threshold;
        self
    }

    pub fn with_line_tolerance(mut self, line_tolerance: f32) -> Self {
        self.line_tolerance = line_tolerance;
        self
    }

    pub fn with_corner_tolerance(mut self, corner_tolerance: i32) -> Self {
        self.corner_tolerance = corner_tolerance;
        self
    }
}
