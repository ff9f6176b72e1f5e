use log::warn;
use serde::{Deserialize, Serialize};

use cube_scan_core::{Detection, ImageSize, PixelBox, StickerCenter, StickerColour};

use crate::grouping::group_faces;
use crate::ordering::order_face;
use crate::params::FaceDetectorParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Stickers per row of the 3×3 face grid.
const GRID_SIDE: usize = 3;

/// One reconstructed cube face.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    /// Pixel-space box of the face-marker detection.
    pub marker_box: PixelBox,
    /// Exactly [`crate::FACE_STICKERS`] sticker centers in row-major
    /// reading order: index 0 is the visual top left, index 8 the bottom
    /// right.
    pub stickers: Vec<StickerCenter>,
}

impl DetectedFace {
    /// The three rows of the face, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[StickerCenter]> {
        self.stickers.chunks(GRID_SIDE)
    }

    /// Detected colours in row-major order.
    pub fn colour_grid(&self) -> Vec<StickerColour> {
        self.stickers.iter().map(|s| s.colour).collect()
    }
}

/// Reconstructs the 3×3 grid of every cube face visible in one frame's
/// detections.
#[derive(Clone, Debug, Default)]
pub struct FaceDetector {
    params: FaceDetectorParams,
}

impl FaceDetector {
    pub fn new(params: FaceDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &FaceDetectorParams {
        &self.params
    }

    /// Group sticker centers by face marker, resolve contested centers, and
    /// order each surviving face row-major.
    ///
    /// Faces with fewer than nine visible stickers simply do not appear in
    /// the output.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, detections),
            fields(detections = detections.len(), width = size.width, height = size.height)
        )
    )]
    pub fn detect(&self, detections: &[Detection], size: ImageSize) -> Vec<DetectedFace> {
        let groups = group_faces(detections, size, &self.params);
        groups
            .into_iter()
            .filter_map(|group| match order_face(&group.stickers, &self.params) {
                Ok(stickers) => Some(DetectedFace {
                    marker_box: group.marker_box,
                    stickers,
                }),
                // Unreachable through grouping, which only emits groups of
                // nine; skip rather than panic if it ever happens.
                Err(err) => {
                    warn!("skipping face group: {err}");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::FACE_STICKERS;
    use cube_scan_core::{NormalizedBox, ObjectClass, PixelPoint};

    const FRAME: ImageSize = ImageSize {
        width: 1024,
        height: 1024,
    };

    fn sticker_at(x: i32, y: i32, colour: StickerColour) -> Detection {
        let bbox = NormalizedBox::new(
            (y - 10) as f32 / 1024.0,
            (x - 10) as f32 / 1024.0,
            (y + 10) as f32 / 1024.0,
            (x + 10) as f32 / 1024.0,
        );
        Detection::new(bbox, 0.9, ObjectClass::Sticker(colour))
    }

    #[test]
    fn full_frame_marker_yields_one_face_in_reading_order() {
        use cube_scan_core::StickerColour::*;
        let colours = [
            White, Green, Red, //
            Blue, Yellow, Orange, //
            Green, White, Blue,
        ];

        let mut detections = vec![Detection::new(
            NormalizedBox::new(0.0, 0.0, 1.0, 1.0),
            0.9,
            ObjectClass::FaceMarker,
        )];
        // Centers form a 3x3 grid well inside the frame, pushed shuffled.
        let mut cells: Vec<(usize, usize)> =
            (0..3).flat_map(|j| (0..3).map(move |i| (i, j))).collect();
        cells.swap(0, 5);
        cells.swap(2, 7);
        for (i, j) in cells {
            detections.push(sticker_at(
                300 + 150 * i as i32,
                300 + 150 * j as i32,
                colours[j * GRID_SIDE + i],
            ));
        }

        let detector = FaceDetector::new(FaceDetectorParams::default());
        let faces = detector.detect(&detections, FRAME);

        assert_eq!(faces.len(), 1);
        let face = &faces[0];
        assert_eq!(face.stickers.len(), FACE_STICKERS);
        for (index, sticker) in face.stickers.iter().enumerate() {
            let (i, j) = (index % GRID_SIDE, index / GRID_SIDE);
            assert_eq!(
                sticker.point,
                PixelPoint::new(300 + 150 * i as i32, 300 + 150 * j as i32)
            );
        }
        assert_eq!(face.colour_grid(), colours);

        let rows: Vec<&[StickerCenter]> = face.rows().collect();
        assert_eq!(rows.len(), GRID_SIDE);
        assert!(rows.iter().all(|row| row.len() == GRID_SIDE));
    }

    #[test]
    fn partially_visible_face_is_silently_dropped() {
        let mut detections = vec![Detection::new(
            NormalizedBox::new(0.0, 0.0, 1.0, 1.0),
            0.9,
            ObjectClass::FaceMarker,
        )];
        for (i, j) in (0..3).flat_map(|j| (0..2).map(move |i| (i, j))) {
            detections.push(sticker_at(300 + 150 * i, 300 + 150 * j, StickerColour::Red));
        }

        let detector = FaceDetector::new(FaceDetectorParams::default());
        assert!(detector.detect(&detections, FRAME).is_empty());
    }
}
