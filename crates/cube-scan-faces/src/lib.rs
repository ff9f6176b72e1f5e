//! Face reconstruction from cube sticker detections, built on
//! `cube-scan-core`.
//!
//! The detection model reports coloured sticker squares (classes 0-5) and
//! "face" markers (class 6) whose boxes span a whole cube face. This crate
//! turns one frame's detections into ordered faces:
//!
//! 1. Collect every sticker center strictly inside each face-marker box.
//! 2. Resolve centers claimed by overlapping face boxes with a co-linearity
//!    membership test, then keep only groups of exactly 9.
//! 3. Order each face's centers row-major (top left to bottom right) by
//!    repeatedly fitting a line through the top corners of the remaining
//!    set and peeling off the row on it.
//!
//! ## Quickstart
//!
//! ```
//! use cube_scan_faces::{FaceDetector, FaceDetectorParams};
//! use cube_scan_core::{Detection, ImageSize};
//!
//! let detector = FaceDetector::new(FaceDetectorParams::default());
//!
//! let detections: Vec<Detection> = Vec::new();
//! let faces = detector.detect(&detections, ImageSize::new(640, 480));
//! assert!(faces.is_empty());
//! ```

mod detector;
mod grouping;
mod ordering;
mod params;

pub use detector::{DetectedFace, FaceDetector};
pub use grouping::{group_faces, FaceGroup, FACE_STICKERS};
pub use ordering::{order_face, OrderFaceError};
pub use params::FaceDetectorParams;
