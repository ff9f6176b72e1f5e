use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use cube_scan_core::{
    Detection, ImageSize, Line, ObjectClass, PixelBox, PixelPoint, StickerCenter,
};

use crate::params::FaceDetectorParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Number of stickers on a complete cube face.
pub const FACE_STICKERS: usize = 9;

/// A genuine 3×3 grid member lies on at least this many lines that hold
/// exactly two of its peers (its row plus the diagonals through it).
const MIN_LINE_SUPPORT: usize = 4;

/// Sticker centers collected for one face-marker detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceGroup {
    /// Pixel-space box of the face-marker detection that seeded the group.
    pub marker_box: PixelBox,
    /// Sticker centers inside the marker box, in detection order.
    pub stickers: Vec<StickerCenter>,
}

/// Group sticker centers by the face markers whose boxes contain them.
///
/// Every face-marker detection above the score threshold seeds a candidate
/// group; every sticker center strictly inside its box joins it. A center
/// claimed by more than one group (overlapping face boxes of adjacent
/// visible cube faces) is kept only where the membership test confirms it,
/// and any group that does not end with exactly [`FACE_STICKERS`] centers is
/// silently discarded: the expected steady state for partially visible
/// cubes, not an error.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(detections, params),
        fields(detections = detections.len(), width = size.width, height = size.height)
    )
)]
pub fn group_faces(
    detections: &[Detection],
    size: ImageSize,
    params: &FaceDetectorParams,
) -> Vec<FaceGroup> {
    let mut groups: Vec<FaceGroup> = Vec::new();
    // First assignment of every center point, as (group index, sticker index).
    let mut assigned: HashMap<(i32, i32), (usize, usize)> = HashMap::new();
    // Centers claimed more than once, as (group index, sticker index) of
    // both the incoming and the first occurrence.
    let mut duplicates: Vec<(usize, usize)> = Vec::new();

    for face in detections {
        if face.score < params.score_threshold || face.class != ObjectClass::FaceMarker {
            continue;
        }
        let marker_box = face.bbox.to_pixels(size);

        let mut stickers: Vec<StickerCenter> = Vec::new();
        for det in detections {
            if det.score < params.score_threshold {
                continue;
            }
            let ObjectClass::Sticker(colour) = det.class else {
                continue;
            };
            let center = det.bbox.to_pixels(size).center();
            if !marker_box.contains(center) {
                continue;
            }

            match assigned.entry((center.x, center.y)) {
                Entry::Occupied(first) => {
                    duplicates.push((groups.len(), stickers.len()));
                    duplicates.push(*first.get());
                }
                Entry::Vacant(slot) => {
                    slot.insert((groups.len(), stickers.len()));
                }
            }
            stickers.push(StickerCenter::new(center, colour));
        }

        groups.push(FaceGroup {
            marker_box,
            stickers,
        });
    }

    // Re-test every duplicate against the group claiming it; collect the
    // rejects as an index set and materialize filtered groups, so no
    // deletion can shift the indices of another.
    let mut rejected: HashSet<(usize, usize)> = HashSet::new();
    for &(group_index, sticker_index) in &duplicates {
        let group = &groups[group_index];
        let point = group.stickers[sticker_index].point;
        if !confirms_membership(point, &group.stickers, params.line_tolerance) {
            debug!(
                "removing duplicate sticker center ({}, {}) from face {}",
                point.x, point.y, group_index
            );
            rejected.insert((group_index, sticker_index));
        }
    }

    groups
        .into_iter()
        .enumerate()
        .filter_map(|(group_index, group)| {
            let stickers: Vec<StickerCenter> = group
                .stickers
                .into_iter()
                .enumerate()
                .filter(|(sticker_index, _)| !rejected.contains(&(group_index, *sticker_index)))
                .map(|(_, sticker)| sticker)
                .collect();
            (stickers.len() == FACE_STICKERS).then_some(FaceGroup {
                marker_box: group.marker_box,
                stickers,
            })
        })
        .collect()
}

/// Membership test for a point claimed by a group it may not belong to.
///
/// Fit a line from the point to every other center of the group and count
/// the lines on which exactly two of the group's centers (the point itself
/// excluded) lie within tolerance. Vertical pairs admit no `y = m*x + c`
/// fit and contribute nothing.
fn confirms_membership(point: PixelPoint, stickers: &[StickerCenter], tolerance: f32) -> bool {
    let mut support = 0;
    for other in stickers {
        if other.point == point {
            continue;
        }
        let Ok(line) = Line::fit(point, other.point) else {
            continue;
        };
        let on_line = stickers
            .iter()
            .filter(|s| s.point != point && line.contains(s.point, tolerance))
            .count();
        if on_line == 2 {
            support += 1;
        }
    }
    support >= MIN_LINE_SUPPORT
}
