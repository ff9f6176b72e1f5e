use crate::{core, faces};

/// Errors produced when adapting raw model output to typed detections.
#[derive(thiserror::Error, Debug)]
pub enum ModelOutputError {
    #[error(
        "model output arrays disagree in length (boxes={boxes}, scores={scores}, classes={classes})"
    )]
    LengthMismatch {
        boxes: usize,
        scores: usize,
        classes: usize,
    },

    #[error("unknown class id {class_id} at detection {index}")]
    UnknownClass { index: usize, class_id: u32 },
}

/// Build typed detections from the parallel arrays a detection runtime
/// produces: boxes in normalized `(y0, x0, y1, x1)` order, confidence
/// scores, and raw class ids.
pub fn detections_from_model_output(
    boxes: &[[f32; 4]],
    scores: &[f32],
    classes: &[u32],
) -> Result<Vec<core::Detection>, ModelOutputError> {
    if boxes.len() != scores.len() || boxes.len() != classes.len() {
        return Err(ModelOutputError::LengthMismatch {
            boxes: boxes.len(),
            scores: scores.len(),
            classes: classes.len(),
        });
    }

    boxes
        .iter()
        .zip(scores)
        .zip(classes)
        .enumerate()
        .map(|(index, ((&[y0, x0, y1, x1], &score), &class_id))| {
            let class = core::ObjectClass::from_class_id(class_id)
                .ok_or(ModelOutputError::UnknownClass { index, class_id })?;
            Ok(core::Detection::new(
                core::NormalizedBox::new(y0, x0, y1, x1),
                score,
                class,
            ))
        })
        .collect()
}

/// Run the face detector over one frame's detections.
pub fn detect_faces(
    detections: &[core::Detection],
    size: core::ImageSize,
    params: faces::FaceDetectorParams,
) -> Vec<faces::DetectedFace> {
    faces::FaceDetector::new(params).detect(detections, size)
}

/// Convenience overload using `FaceDetectorParams::default()`.
pub fn detect_faces_default(
    detections: &[core::Detection],
    size: core::ImageSize,
) -> Vec<faces::DetectedFace> {
    detect_faces(detections, size, faces::FaceDetectorParams::default())
}
