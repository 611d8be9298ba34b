use std::{fs, path::PathBuf, thread};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, unbounded};
use image::RgbaImage;

use crate::types::Frame;

/// Spawn the photo-store worker. Frames sent on the returned channel are
/// written as numbered PNGs under `dir`; the sender never learns whether a
/// save succeeded. The worker drains and exits once every sender is dropped.
pub fn start_photo_store(dir: PathBuf) -> Result<(Sender<Frame>, thread::JoinHandle<()>)> {
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create photo directory {}", dir.display()))?;

    let (tx, rx) = unbounded();
    let handle = thread::spawn(move || run_store_loop(dir, rx));
    Ok((tx, handle))
}

fn run_store_loop(dir: PathBuf, rx: Receiver<Frame>) {
    let mut saved = 0usize;

    while let Ok(frame) = rx.recv() {
        saved += 1;
        let path = dir.join(format!("capture_{saved:04}.png"));
        match RgbaImage::from_raw(frame.width, frame.height, frame.rgba) {
            Some(img) => {
                if let Err(err) = img.save(&path) {
                    log::warn!("failed to save capture to {}: {err:?}", path.display());
                } else {
                    log::info!("saved capture to {}", path.display());
                }
            }
            None => log::warn!("dropping capture with mismatched buffer size"),
        }
    }
}
