//! Core types and utilities for Rubik's cube face reconstruction.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete detection model or image type: callers hand it
//! normalized bounding boxes, scores, and class ids, and it provides the
//! pixel-space primitives the face detector is built on.

mod detection;
mod geometry;
mod logger;

pub use detection::{
    Detection, ImageSize, NormalizedBox, ObjectClass, StickerCenter, StickerColour,
    FACE_MARKER_CLASS_ID,
};
pub use geometry::{Line, LineFitError, PixelBox, PixelPoint};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
