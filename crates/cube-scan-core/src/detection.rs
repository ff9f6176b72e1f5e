use serde::{Deserialize, Serialize};

use crate::geometry::{PixelBox, PixelPoint};

/// Pixel dimensions of the frame the detections were produced from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Bounding box in normalized `[0, 1]` coordinates, in the `(y0, x0, y1, x1)`
/// order produced by the detection model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub y0: f32,
    pub x0: f32,
    pub y1: f32,
    pub x1: f32,
}

impl NormalizedBox {
    pub fn new(y0: f32, x0: f32, y1: f32, x1: f32) -> Self {
        Self { y0, x0, y1, x1 }
    }

    /// Remap to pixel-space corners, truncating toward zero.
    ///
    /// Corners are taken as given: a well-formed detector box has
    /// `(x0, y0)` componentwise below `(x1, y1)`.
    pub fn to_pixels(&self, size: ImageSize) -> PixelBox {
        let w = size.width as f32;
        let h = size.height as f32;
        PixelBox {
            top_left: PixelPoint::new((self.x0 * w) as i32, (self.y0 * h) as i32),
            bottom_right: PixelPoint::new((self.x1 * w) as i32, (self.y1 * h) as i32),
        }
    }
}

/// Sticker colours for detection class ids 0-5.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StickerColour {
    Orange,
    Green,
    Red,
    Blue,
    White,
    Yellow,
}

impl StickerColour {
    const ALL: [StickerColour; 6] = [
        StickerColour::Orange,
        StickerColour::Green,
        StickerColour::Red,
        StickerColour::Blue,
        StickerColour::White,
        StickerColour::Yellow,
    ];
}

/// Detection class: a coloured sticker square (ids 0-5) or the face marker
/// (id 6) whose box spans a whole cube face.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ObjectClass {
    Sticker(StickerColour),
    FaceMarker,
}

/// Class id of the face marker on the wire.
pub const FACE_MARKER_CLASS_ID: u32 = 6;

impl ObjectClass {
    /// Map a raw model class id to a typed class. Ids above 6 are unknown.
    pub fn from_class_id(id: u32) -> Option<ObjectClass> {
        if id == FACE_MARKER_CLASS_ID {
            return Some(ObjectClass::FaceMarker);
        }
        StickerColour::ALL
            .get(id as usize)
            .map(|&colour| ObjectClass::Sticker(colour))
    }

    pub fn class_id(self) -> u32 {
        match self {
            ObjectClass::Sticker(colour) => colour as u32,
            ObjectClass::FaceMarker => FACE_MARKER_CLASS_ID,
        }
    }

    #[inline]
    pub fn is_face_marker(self) -> bool {
        self == ObjectClass::FaceMarker
    }
}

/// One object-detection result. Read-only input for a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: NormalizedBox,
    pub score: f32,
    pub class: ObjectClass,
}

impl Detection {
    pub fn new(bbox: NormalizedBox, score: f32, class: ObjectClass) -> Self {
        Self { bbox, score, class }
    }
}

/// A sticker's box center in pixel space together with its detected colour.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StickerCenter {
    pub point: PixelPoint,
    pub colour: StickerColour,
}

impl StickerCenter {
    pub fn new(point: PixelPoint, colour: StickerColour) -> Self {
        Self { point, colour }
    }
}
