mod gesture;
mod pipeline;
mod types;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use gesture::RawJointRecord;
use pipeline::{SkeletonRenderer, start_photo_store};
use types::{Frame, Joint, JointName, Pose};

const CELEBRATION_IMAGE_PATH: &str = "assets/celebration.png";
const CAPTURE_DIR: &str = "captures";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(image_path), Some(joints_path)) =
        (args.next().map(PathBuf::from), args.next().map(PathBuf::from))
    else {
        bail!("usage: pose-overlay <frame-image> <joints-file> [output-image]");
    };
    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("overlay.png"));

    let frame = load_frame(&image_path)?;
    let (records, joints) = load_joint_records(&joints_path)?;
    let pose = Pose::from_joints(joints);

    let (photo_tx, photo_handle) = start_photo_store(PathBuf::from(CAPTURE_DIR))?;
    let renderer = SkeletonRenderer::new()
        .with_celebration_image(Path::new(CELEBRATION_IMAGE_PATH))
        .with_photo_store(photo_tx);

    let rendered = pipeline::process_frame(&renderer, &frame, std::slice::from_ref(&pose), &records)?;
    save_frame(&rendered, &output_path)?;
    println!("wrote {}", output_path.display());

    // Dropping the renderer releases the store sender so the worker can
    // drain any pending capture and exit.
    drop(renderer);
    let _ = photo_handle.join();

    Ok(())
}

fn load_frame(path: &Path) -> Result<Frame> {
    let image = image::open(path)
        .with_context(|| format!("failed to open frame image {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();

    Ok(Frame::new(image.into_raw(), width, height))
}

/// Read estimator output from a plain text file: one `name x y [valid]` line
/// per joint, `#` for comments. The strings feed the classifier untouched;
/// the typed joints for rendering are built right here at the boundary.
fn load_joint_records(path: &Path) -> Result<(Vec<RawJointRecord>, Vec<Joint>)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read joints file {}", path.display()))?;

    let mut records = Vec::new();
    let mut joints = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            bail!(
                "{}:{}: expected `name x y [valid]`, got {line:?}",
                path.display(),
                lineno + 1
            );
        }

        let name = JointName::from_name(fields[0]).with_context(|| {
            format!(
                "{}:{}: unknown joint name {:?}",
                path.display(),
                lineno + 1,
                fields[0]
            )
        })?;
        let is_valid = fields.get(3).is_none_or(|v| *v != "0");

        records.push([
            fields[0].to_string(),
            fields[1].to_string(),
            fields[2].to_string(),
        ]);
        joints.push(Joint {
            name,
            position: (
                fields[1].parse().unwrap_or(0.0),
                fields[2].parse().unwrap_or(0.0),
            ),
            is_valid,
        });
    }

    Ok((records, joints))
}

fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    let Some(image) =
        image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone())
    else {
        bail!("rendered frame buffer does not match its dimensions");
    };
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}
