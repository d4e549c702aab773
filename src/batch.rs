//! Folder-of-images driver: each still image is one independent frame.

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::bindings::ActuatorBindings;
use crate::orchestrator::{process, FrameReport};
use crate::source::LandmarkSource;
use crate::transport::ActuatorTransport;

pub const DEFAULT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Image files in `dir` whose extension matches (case-insensitively), sorted by file name.
pub fn list_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read folder {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|want| want.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if matches {
            images.push(path);
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOutcome {
    pub path: PathBuf,
    /// False when the image could not be decoded or its landmarks could not be read.
    pub readable: bool,
    pub report: FrameReport,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub images: Vec<ImageOutcome>,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.images.len()
    }

    pub fn skipped(&self) -> usize {
        self.images.iter().filter(|i| !i.readable).count()
    }
}

/// Drives the engine over a folder of still images, one independent frame per image.
pub struct BatchRunner<'a, S: LandmarkSource, T: ActuatorTransport> {
    bindings: &'a ActuatorBindings,
    source: S,
    transport: T,
    extensions: Vec<String>,
    dwell: Duration,
}

impl<'a, S: LandmarkSource, T: ActuatorTransport> BatchRunner<'a, S, T> {
    pub fn new(bindings: &'a ActuatorBindings, source: S, transport: T) -> Self {
        Self {
            bindings,
            source,
            transport,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            dwell: Duration::ZERO,
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Pause after each image so the hands hold the pose before the next one.
    pub fn with_dwell(mut self, dwell: Duration) -> Self {
        self.dwell = dwell;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn run(&mut self, dir: &Path) -> Result<BatchSummary> {
        let images = list_images(dir, &self.extensions)?;
        if images.is_empty() {
            warn!("No images found in {}", dir.display());
            return Ok(BatchSummary::default());
        }

        info!("Processing {} images from {} via {}", images.len(), dir.display(), self.source.name());

        let mut summary = BatchSummary::default();
        for (i, path) in images.iter().enumerate() {
            info!("Processing: {}", path.display());
            let outcome = self.process_image(path)?;
            summary.images.push(outcome);

            if i + 1 < images.len() && !self.dwell.is_zero() {
                thread::sleep(self.dwell);
            }
        }
        Ok(summary)
    }

    /// A broken image or landmark file still sends the all-closed batch.
    pub fn process_image(&mut self, path: &Path) -> Result<ImageOutcome> {
        let observed = match image::image_dimensions(path) {
            Err(e) => {
                warn!("Skipping unreadable image {}: {}", path.display(), e);
                None
            }
            Ok(_) => match self.source.observe(path) {
                Ok(hands) => Some(hands),
                Err(e) => {
                    warn!("No landmarks for {}: {:#}", path.display(), e);
                    None
                }
            },
        };

        let readable = observed.is_some();
        let report = process(&observed.unwrap_or_default(), self.bindings);
        self.transport
            .send(&report.commands)
            .with_context(|| format!("Failed to send commands for {}", path.display()))?;

        Ok(ImageOutcome {
            path: path.to_path_buf(),
            readable,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DetectionFilter, SidecarJsonSource};
    use crate::transport::RecordingTransport;
    use crate::types::{FingerKey, PinId};
    use std::collections::BTreeMap;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gesture_servo_batch_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn bindings() -> ActuatorBindings {
        let table: BTreeMap<FingerKey, PinId> = FingerKey::all()
            .map(|k| (k, PinId::new(k.to_string())))
            .collect();
        ActuatorBindings::new(&table, 115).unwrap()
    }

    #[test]
    fn lists_only_images_sorted_by_name() {
        let dir = scratch_dir("list");
        for name in ["b.JPG", "a.png", "c.jpeg", "notes.txt", "d.gif"] {
            fs::write(dir.join(name), b"x").unwrap();
        }
        let exts: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        let names: Vec<String> = list_images(&dir, &exts)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG", "c.jpeg"]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unreadable_image_sends_closed_batch_and_continues() {
        let dir = scratch_dir("unreadable");
        fs::write(dir.join("1_broken.png"), b"not a png").unwrap();
        image::RgbImage::new(4, 4).save(dir.join("2_blank.png")).unwrap();

        let b = bindings();
        let mut runner = BatchRunner::new(
            &b,
            SidecarJsonSource::new(DetectionFilter::default()),
            RecordingTransport::default(),
        );
        let summary = runner.run(&dir).unwrap();

        assert_eq!(summary.processed(), 2);
        assert_eq!(summary.skipped(), 1);
        assert!(!summary.images[0].readable);
        assert!(summary.images[1].readable);

        let sent = &runner.transport().batches;
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|batch| batch.len() == 10));
        assert_eq!(sent[0], sent[1]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_folder_is_not_an_error() {
        let dir = scratch_dir("empty");
        let b = bindings();
        let mut runner = BatchRunner::new(
            &b,
            SidecarJsonSource::new(DetectionFilter::default()),
            RecordingTransport::default(),
        );
        assert_eq!(runner.run(&dir).unwrap().processed(), 0);
        assert!(runner.into_transport().batches.is_empty());
        fs::remove_dir_all(&dir).ok();
    }
}
