use std::path::Path;

use crossbeam_channel::Sender;
use image::{Rgba, RgbaImage, imageops, imageops::FilterType};

use super::skeleton::{SKELETON_SEGMENTS, draw_circle, draw_line};
use crate::types::{Frame, Pose};

const TEAL: [u8; 4] = [20, 184, 166, 255];
const PINK: [u8; 4] = [244, 114, 182, 255];

/// Stroke and marker styling for the skeleton wireframe.
#[derive(Clone, Copy, Debug)]
pub struct RenderStyle {
    pub stroke_width: i32,
    pub stroke_color: [u8; 4],
    pub joint_radius: i32,
    pub joint_color: [u8; 4],
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            stroke_width: 2,
            stroke_color: TEAL,
            joint_radius: 4,
            joint_color: PINK,
        }
    }
}

/// Composites skeleton wireframes (or the celebration overlay) onto a frame.
///
/// The source frame is never touched; every call produces a fresh buffer of
/// the same dimensions.
pub struct SkeletonRenderer {
    style: RenderStyle,
    celebration: Option<RgbaImage>,
    photo_tx: Option<Sender<Frame>>,
}

impl SkeletonRenderer {
    pub fn new() -> Self {
        SkeletonRenderer {
            style: RenderStyle::default(),
            celebration: None,
            photo_tx: None,
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Load the image composited in celebration mode. A missing or unreadable
    /// asset is not an error; celebration frames just show the background.
    pub fn with_celebration_image(mut self, path: &Path) -> Self {
        match image::open(path) {
            Ok(img) => self.celebration = Some(img.to_rgba8()),
            Err(err) => {
                log::warn!(
                    "celebration image {} unavailable, overlay disabled: {err:?}",
                    path.display()
                );
            }
        }
        self
    }

    pub fn with_photo_store(mut self, tx: Sender<Frame>) -> Self {
        self.photo_tx = Some(tx);
        self
    }

    /// Render one frame. `draw_skeleton` selects the wireframe; otherwise the
    /// celebration overlay is composited and the result is handed to the
    /// photo store, fire-and-forget.
    pub fn render(&self, poses: &[Pose], frame: &Frame, draw_skeleton: bool) -> Frame {
        let mut canvas = background_canvas(frame);

        if draw_skeleton {
            for pose in poses {
                for (a, b) in SKELETON_SEGMENTS {
                    if let (Some(ja), Some(jb)) = (pose.valid_joint(a), pose.valid_joint(b)) {
                        draw_line(
                            &mut canvas,
                            ja.position,
                            jb.position,
                            self.style.stroke_color,
                            self.style.stroke_width,
                        );
                    }
                }

                // Joint markers sit on top of the segment lines.
                for joint in pose.valid_joints() {
                    draw_circle(
                        &mut canvas,
                        (joint.position.0 as i32, joint.position.1 as i32),
                        self.style.joint_radius,
                        self.style.joint_color,
                    );
                }
            }
        } else {
            if let Some(overlay) = &self.celebration {
                composite_celebration(&mut canvas, overlay);
            }

            let rendered = canvas_to_frame(&canvas, frame);
            if let Some(tx) = &self.photo_tx {
                // No completion handling; a failed save only logs in the
                // store worker.
                let _ = tx.send(rendered.clone());
            }
            return rendered;
        }

        canvas_to_frame(&canvas, frame)
    }
}

impl Default for SkeletonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The raw frame buffer arrives bottom-up relative to the output canvas, so
/// the background is composited through a vertical flip.
fn background_canvas(frame: &Frame) -> RgbaImage {
    match RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()) {
        Some(img) => imageops::flip_vertical(&img),
        None => {
            log::warn!(
                "frame buffer does not match {}x{} RGBA, rendering on black",
                frame.width,
                frame.height
            );
            RgbaImage::from_pixel(frame.width, frame.height, Rgba([0, 0, 0, 255]))
        }
    }
}

/// Scale the overlay to two thirds of the frame, centered horizontally and
/// centered vertically on the one-third line.
fn composite_celebration(canvas: &mut RgbaImage, overlay: &RgbaImage) {
    let scaled_w = (canvas.width() * 2 / 3).max(1);
    let scaled_h = (canvas.height() * 2 / 3).max(1);
    let scaled = imageops::resize(overlay, scaled_w, scaled_h, FilterType::CatmullRom);

    let x = (canvas.width() as i64 - scaled_w as i64) / 2;
    let y = canvas.height() as i64 / 3 - scaled_h as i64 / 2;
    imageops::overlay(canvas, &scaled, x, y);
}

fn canvas_to_frame(canvas: &RgbaImage, source: &Frame) -> Frame {
    Frame {
        rgba: canvas.as_raw().clone(),
        width: source.width,
        height: source.height,
        timestamp: source.timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Joint, JointName};

    const BACKGROUND: [u8; 4] = [9, 9, 9, 255];

    fn solid_frame(width: u32, height: u32) -> Frame {
        let rgba = BACKGROUND.repeat((width * height) as usize);
        Frame::new(rgba, width, height)
    }

    fn joint(name: JointName, x: f32, y: f32) -> Joint {
        Joint {
            name,
            position: (x, y),
            is_valid: true,
        }
    }

    fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * frame.width + x) as usize) * 4;
        frame.rgba[idx..idx + 4].try_into().unwrap()
    }

    #[test]
    fn test_segment_drawn_between_valid_joints() {
        let frame = solid_frame(64, 64);
        let pose = Pose::from_joints([
            joint(JointName::LeftHip, 10.0, 32.0),
            joint(JointName::LeftKnee, 54.0, 32.0),
        ]);

        let out = SkeletonRenderer::new().render(&[pose], &frame, true);
        let style = RenderStyle::default();
        // Midpoint of the hip-knee segment, well clear of the joint markers.
        assert_eq!(pixel(&out, 32, 32), style.stroke_color);
    }

    #[test]
    fn test_invalid_endpoint_skips_segment() {
        let frame = solid_frame(64, 64);
        let mut knee = joint(JointName::LeftKnee, 54.0, 32.0);
        knee.is_valid = false;
        let pose = Pose::from_joints([joint(JointName::LeftHip, 10.0, 32.0), knee]);

        let out = SkeletonRenderer::new().render(&[pose], &frame, true);
        assert_eq!(pixel(&out, 32, 32), BACKGROUND);
        // The invalid joint gets no marker either.
        assert_eq!(pixel(&out, 54, 32), BACKGROUND);
    }

    #[test]
    fn test_joint_marker_paints_over_segment_line() {
        let frame = solid_frame(64, 64);
        let pose = Pose::from_joints([
            joint(JointName::LeftHip, 10.0, 32.0),
            joint(JointName::LeftKnee, 54.0, 32.0),
        ]);

        let out = SkeletonRenderer::new().render(&[pose], &frame, true);
        let style = RenderStyle::default();
        // The line passes through both joints, but the marker color wins.
        assert_eq!(pixel(&out, 10, 32), style.joint_color);
        assert_eq!(pixel(&out, 54, 32), style.joint_color);
    }

    #[test]
    fn test_render_never_mutates_source_frame() {
        let frame = solid_frame(32, 32);
        let before = frame.rgba.clone();
        let pose = Pose::from_joints([
            joint(JointName::LeftShoulder, 4.0, 4.0),
            joint(JointName::RightShoulder, 28.0, 4.0),
        ]);

        let _ = SkeletonRenderer::new().render(std::slice::from_ref(&pose), &frame, true);
        let _ = SkeletonRenderer::new().render(&[pose], &frame, false);
        assert_eq!(frame.rgba, before);
    }

    #[test]
    fn test_background_is_flipped_vertically() {
        let mut frame = solid_frame(8, 8);
        // Paint the first buffer row red; it must come out on the bottom.
        for x in 0..8usize {
            frame.rgba[x * 4..x * 4 + 4].copy_from_slice(&[255, 0, 0, 255]);
        }

        let out = SkeletonRenderer::new().render(&[], &frame, true);
        assert_eq!(pixel(&out, 0, 7), [255, 0, 0, 255]);
        assert_eq!(pixel(&out, 0, 0), BACKGROUND);
    }

    #[test]
    fn test_output_dimensions_match_input() {
        let frame = solid_frame(31, 17);
        let out = SkeletonRenderer::new().render(&[], &frame, true);
        assert_eq!((out.width, out.height), (frame.width, frame.height));
        assert_eq!(out.rgba.len(), frame.rgba.len());
    }

    #[test]
    fn test_celebration_mode_without_asset_draws_background_only() {
        let frame = solid_frame(16, 16);
        let out = SkeletonRenderer::new().render(&[], &frame, false);
        assert_eq!(pixel(&out, 8, 8), BACKGROUND);
    }

    #[test]
    fn test_celebration_mode_sends_frame_to_photo_store() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let frame = solid_frame(16, 16);
        let renderer = SkeletonRenderer::new().with_photo_store(tx);

        let out = renderer.render(&[], &frame, false);
        let stored = rx.try_recv().expect("celebration frame should be stored");
        assert_eq!(stored.rgba, out.rgba);

        // Skeleton mode never persists.
        let _ = renderer.render(&[], &frame, true);
        assert!(rx.try_recv().is_err());
    }
}
