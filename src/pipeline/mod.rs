pub mod photo_store;
pub mod renderer;
pub mod skeleton;

// Re-exports for convenience
pub use photo_store::start_photo_store;
pub use renderer::{RenderStyle, SkeletonRenderer};

use crate::gesture::{self, RawJointRecord};
use crate::types::{Frame, Pose};

/// Run one frame through the pipeline: classify first, then render. A
/// matched reference gesture swaps the skeleton wireframe for the
/// celebration overlay (which the renderer also persists).
///
/// The only failure here is the classifier rejecting an unknown joint name;
/// rendering itself never fails.
pub fn process_frame(
    renderer: &SkeletonRenderer,
    frame: &Frame,
    poses: &[Pose],
    records: &[RawJointRecord],
) -> anyhow::Result<Frame> {
    let matched = gesture::classify(records)?;
    gesture_trigger(matched);
    Ok(renderer.render(poses, frame, !matched))
}

fn gesture_trigger(matched: bool) {
    if matched {
        log::info!("reference gesture matched, firing celebration overlay");
    } else {
        log::debug!("reference gesture not matched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureError;

    fn record(name: &str, x: &str, y: &str) -> RawJointRecord {
        [name.to_string(), x.to_string(), y.to_string()]
    }

    #[test]
    fn test_process_frame_propagates_classifier_error() {
        let frame = Frame::new(vec![0u8; 8 * 8 * 4], 8, 8);
        let err = process_frame(
            &SkeletonRenderer::new(),
            &frame,
            &[],
            &[record("hoof", "1", "2")],
        )
        .unwrap_err();
        assert_eq!(
            err.downcast::<GestureError>().unwrap(),
            GestureError::UnknownJointName("hoof".to_string())
        );
    }

    #[test]
    fn test_process_frame_renders_on_no_match() {
        let frame = Frame::new(vec![0u8; 8 * 8 * 4], 8, 8);
        let out = process_frame(&SkeletonRenderer::new(), &frame, &[], &[]).unwrap();
        assert_eq!((out.width, out.height), (8, 8));
    }
}
