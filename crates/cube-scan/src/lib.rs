//! High-level facade crate for the `cube-scan-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - adapters from the parallel arrays a detection runtime produces to
//!   typed detections, and one-shot detection helpers
//!
//! ## Quickstart
//!
//! ```
//! use cube_scan::{detect_faces_default, detections_from_model_output, ImageSize};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // One face marker spanning the frame and a single sticker inside it,
//! // in the (boxes, scores, classes) shape a detection model emits.
//! let boxes = [[0.0, 0.0, 1.0, 1.0], [0.4, 0.4, 0.6, 0.6]];
//! let scores = [0.9, 0.8];
//! let classes = [6, 2];
//!
//! let detections = detections_from_model_output(&boxes, &scores, &classes)?;
//! let faces = detect_faces_default(&detections, ImageSize::new(640, 480));
//!
//! // Eight stickers short of a full face, so nothing is reconstructed.
//! assert!(faces.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `cube_scan::core`: detections, pixel geometry, logging bootstrap.
//! - `cube_scan::faces`: face grouping, duplicate resolution, ordering.

pub use cube_scan_core as core;
pub use cube_scan_faces as faces;

pub use cube_scan_core::{
    Detection, ImageSize, NormalizedBox, ObjectClass, PixelBox, PixelPoint, StickerCenter,
    StickerColour,
};
pub use cube_scan_faces::{DetectedFace, FaceDetector, FaceDetectorParams, FACE_STICKERS};

mod adapt;

pub use adapt::{
    detect_faces, detect_faces_default, detections_from_model_output, ModelOutputError,
};
