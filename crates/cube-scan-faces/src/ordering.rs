use cube_scan_core::{Line, StickerCenter};

use crate::grouping::FACE_STICKERS;
use crate::params::FaceDetectorParams;

/// Errors returned by [`order_face`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFaceError {
    #[error("expected a face group of exactly {FACE_STICKERS} sticker centers, got {got}")]
    WrongGroupSize { got: usize },
}

/// Order a face's sticker centers from top left to bottom right:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
///
/// Each round finds the top-left and top-right centers of the remaining
/// set, fits a line between them, extracts everything on that line as the
/// current row (sorted by x), and repeats on the rest. Corner selection
/// tolerates near-ties in the `x+y` / `x-y` sort keys, which occur when the
/// face renders as a near-perfect diamond.
///
/// Must be called with exactly [`FACE_STICKERS`] centers, as produced by
/// grouping; any other size is a caller error and fails loudly.
pub fn order_face(
    group: &[StickerCenter],
    params: &FaceDetectorParams,
) -> Result<Vec<StickerCenter>, OrderFaceError> {
    if group.len() != FACE_STICKERS {
        return Err(OrderFaceError::WrongGroupSize { got: group.len() });
    }

    let mut remaining: Vec<StickerCenter> = group.to_vec();
    let mut ordered: Vec<StickerCenter> = Vec::with_capacity(FACE_STICKERS);

    while !remaining.is_empty() {
        let left = top_left_anchor(&remaining, params.corner_tolerance);
        let right = top_right_anchor(&remaining, params.corner_tolerance);

        let line = match Line::fit(left.point, right.point) {
            Ok(line) => line,
            Err(_) => {
                // Anchors share an x coordinate (coincident, or stacked
                // vertically): emit the top-left center as a degenerate row
                // and reconsider the rest next round.
                ordered.push(left);
                if let Some(pos) = remaining.iter().position(|s| s.point == left.point) {
                    remaining.remove(pos);
                }
                continue;
            }
        };

        let (mut row, rest): (Vec<StickerCenter>, Vec<StickerCenter>) = remaining
            .into_iter()
            .partition(|s| line.contains(s.point, params.line_tolerance));
        row.sort_by_key(|s| s.point.x);
        ordered.extend(row);
        remaining = rest;
    }

    Ok(ordered)
}

/// Top-left corner of the remaining set: the leading `x+y` run, ties broken
/// by smallest x.
fn top_left_anchor(remaining: &[StickerCenter], tolerance: i32) -> StickerCenter {
    let mut sorted = remaining.to_vec();
    sorted.sort_by_key(|s| s.point.x + s.point.y);
    let mut candidates = leading_run(&sorted, |s| s.point.x + s.point.y, tolerance);
    candidates.sort_by_key(|s| s.point.x);
    candidates[0]
}

/// Top-right corner of the remaining set: the trailing `x-y` run, ties
/// broken by smallest x.
fn top_right_anchor(remaining: &[StickerCenter], tolerance: i32) -> StickerCenter {
    let mut sorted = remaining.to_vec();
    sorted.sort_by_key(|s| s.point.x - s.point.y);
    let mut candidates = trailing_run(&sorted, |s| s.point.x - s.point.y, tolerance);
    candidates.sort_by_key(|s| s.point.x);
    candidates[0]
}

/// Prefix of a sorted list whose successive key values stay within
/// tolerance of each other.
fn leading_run(
    sorted: &[StickerCenter],
    key: impl Fn(&StickerCenter) -> i32,
    tolerance: i32,
) -> Vec<StickerCenter> {
    let mut run = Vec::new();
    let mut iter = sorted.iter();
    let Some(first) = iter.next() else {
        return run;
    };
    run.push(*first);
    let mut last = key(first);
    for s in iter {
        let k = key(s);
        if (k - last).abs() > tolerance {
            break;
        }
        run.push(*s);
        last = k;
    }
    run
}

/// Suffix counterpart of [`leading_run`], collected from the end backward.
fn trailing_run(
    sorted: &[StickerCenter],
    key: impl Fn(&StickerCenter) -> i32,
    tolerance: i32,
) -> Vec<StickerCenter> {
    let mut run = Vec::new();
    let mut iter = sorted.iter().rev();
    let Some(first) = iter.next() else {
        return run;
    };
    run.push(*first);
    let mut last = key(first);
    for s in iter {
        let k = key(s);
        if (k - last).abs() > tolerance {
            break;
        }
        run.push(*s);
        last = k;
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_scan_core::{PixelPoint, StickerColour};

    fn center(x: i32, y: i32) -> StickerCenter {
        StickerCenter::new(PixelPoint::new(x, y), StickerColour::White)
    }

    fn centers(coords: &[(i32, i32)]) -> Vec<StickerCenter> {
        coords.iter().map(|&(x, y)| center(x, y)).collect()
    }

    fn coords(ordered: &[StickerCenter]) -> Vec<(i32, i32)> {
        ordered.iter().map(|s| (s.point.x, s.point.y)).collect()
    }

    const PARAMS: FaceDetectorParams = FaceDetectorParams {
        score_threshold: 0.5,
        line_tolerance: 20.0,
        corner_tolerance: 20,
    };

    #[test]
    fn orders_axis_aligned_grid_row_major() {
        // Shuffled input, exact row-major output.
        let group = centers(&[
            (50, 50),
            (100, 0),
            (0, 100),
            (100, 100),
            (0, 0),
            (50, 100),
            (100, 50),
            (0, 50),
            (50, 0),
        ]);
        let ordered = order_face(&group, &PARAMS).unwrap();
        assert_eq!(
            coords(&ordered),
            vec![
                (0, 0),
                (50, 0),
                (100, 0),
                (0, 50),
                (50, 50),
                (100, 50),
                (0, 100),
                (50, 100),
                (100, 100),
            ]
        );
    }

    #[test]
    fn small_perturbations_do_not_change_the_order() {
        // The axis-aligned grid with every coordinate nudged by up to 5px,
        // well under the 20px tolerance.
        let group = centers(&[
            (50, 54),
            (105, -5),
            (-4, 100),
            (97, 95),
            (3, -4),
            (52, 103),
            (104, 55),
            (-2, 47),
            (45, 2),
        ]);
        let ordered = order_face(&group, &PARAMS).unwrap();
        assert_eq!(
            coords(&ordered),
            vec![
                (3, -4),
                (45, 2),
                (105, -5),
                (-2, 47),
                (50, 54),
                (104, 55),
                (-4, 100),
                (52, 103),
                (97, 95),
            ]
        );
    }

    /// Perspective-skewed face from a real capture; rows tilt a few pixels
    /// but stay well inside the line tolerance.
    #[test]
    fn orders_perspective_skewed_face() {
        use cube_scan_core::StickerColour::*;
        let group: Vec<StickerCenter> = [
            ((173, 248), Blue),
            ((248, 244), Blue),
            ((89, 179), Orange),
            ((175, 327), Orange),
            ((241, 170), White),
            ((93, 253), Red),
            ((252, 318), Blue),
            ((96, 331), Yellow),
            ((166, 177), Orange),
        ]
        .iter()
        .map(|&((x, y), colour)| StickerCenter::new(PixelPoint::new(x, y), colour))
        .collect();

        let ordered = order_face(&group, &PARAMS).unwrap();
        let expected = [
            ((89, 179), Orange),
            ((166, 177), Orange),
            ((241, 170), White),
            ((93, 253), Red),
            ((173, 248), Blue),
            ((248, 244), Blue),
            ((96, 331), Yellow),
            ((175, 327), Orange),
            ((252, 318), Blue),
        ];
        for (got, (point, colour)) in ordered.iter().zip(expected) {
            assert_eq!((got.point.x, got.point.y), point);
            assert_eq!(got.colour, colour);
        }
    }

    /// A face rendered as a perfect diamond has three centers tied for "top
    /// left"; rows then read along the anti-diagonals.
    #[test]
    fn diamond_layout_reads_along_antidiagonals() {
        let group = centers(&[
            (200, 0),
            (100, 100),
            (300, 100),
            (0, 200),
            (200, 200),
            (400, 200),
            (100, 300),
            (300, 300),
            (200, 400),
        ]);
        let ordered = order_face(&group, &PARAMS).unwrap();
        assert_eq!(
            coords(&ordered),
            vec![
                (0, 200),
                (100, 100),
                (200, 0),
                (100, 300),
                (200, 200),
                (300, 100),
                (200, 400),
                (300, 300),
                (400, 200),
            ]
        );
    }

    /// Vertically stacked anchors admit no line fit; each round then emits
    /// the top-left center alone.
    #[test]
    fn vertically_stacked_centers_come_out_top_to_bottom() {
        let group = centers(&[
            (50, 400),
            (50, 0),
            (50, 600),
            (50, 200),
            (50, 800),
            (50, 100),
            (50, 700),
            (50, 300),
            (50, 500),
        ]);
        let ordered = order_face(&group, &PARAMS).unwrap();
        let ys: Vec<i32> = ordered.iter().map(|s| s.point.y).collect();
        assert_eq!(ys, vec![0, 100, 200, 300, 400, 500, 600, 700, 800]);
    }

    #[test]
    fn rejects_wrong_group_size() {
        let eight = centers(&[
            (0, 0),
            (50, 0),
            (100, 0),
            (0, 50),
            (100, 50),
            (0, 100),
            (50, 100),
            (100, 100),
        ]);
        assert_eq!(
            order_face(&eight, &PARAMS),
            Err(OrderFaceError::WrongGroupSize { got: 8 })
        );

        let none: Vec<StickerCenter> = Vec::new();
        assert_eq!(
            order_face(&none, &PARAMS),
            Err(OrderFaceError::WrongGroupSize { got: 0 })
        );
    }
}
