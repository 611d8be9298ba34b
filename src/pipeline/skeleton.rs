use image::{Rgba, RgbaImage};

use crate::types::JointName;

/// The wireframe edges drawn for every detected pose. Fixed topology; the
/// renderer skips any edge whose endpoints the estimator failed to place.
pub const SKELETON_SEGMENTS: [(JointName, JointName); 12] = [
    // Left-side limb chain
    (JointName::LeftHip, JointName::LeftShoulder),
    (JointName::LeftShoulder, JointName::LeftElbow),
    (JointName::LeftElbow, JointName::LeftWrist),
    (JointName::LeftHip, JointName::LeftKnee),
    (JointName::LeftKnee, JointName::LeftAnkle),
    // Right-side limb chain
    (JointName::RightHip, JointName::RightShoulder),
    (JointName::RightShoulder, JointName::RightElbow),
    (JointName::RightElbow, JointName::RightWrist),
    (JointName::RightHip, JointName::RightKnee),
    (JointName::RightKnee, JointName::RightAnkle),
    // Across the torso
    (JointName::LeftShoulder, JointName::RightShoulder),
    (JointName::LeftHip, JointName::RightHip),
];

pub fn draw_line(
    canvas: &mut RgbaImage,
    p0: (f32, f32),
    p1: (f32, f32),
    color: [u8; 4],
    thickness: i32,
) {
    let (mut x0, mut y0) = (p0.0 as i32, p0.1 as i32);
    let (x1, y1) = (p1.0 as i32, p1.1 as i32);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let radius = (thickness.max(1) - 1) / 2;

    loop {
        put_pixel_safe(canvas, x0, y0, color);
        if radius > 0 {
            // Diamond brush around the current step widens the stroke.
            for ox in -radius..=radius {
                for oy in -radius..=radius {
                    if ox == 0 && oy == 0 {
                        continue;
                    }
                    if ox.abs() + oy.abs() <= radius {
                        put_pixel_safe(canvas, x0 + ox, y0 + oy, color);
                    }
                }
            }
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

pub fn draw_circle(canvas: &mut RgbaImage, center: (i32, i32), radius: i32, color: [u8; 4]) {
    let (cx, cy) = center;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel_safe(canvas, cx + dx, cy + dy, color);
            }
        }
    }
}

fn put_pixel_safe(canvas: &mut RgbaImage, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux < canvas.width() && uy < canvas.height() {
        canvas.put_pixel(ux, uy, Rgba(color));
    }
}
