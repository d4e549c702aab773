use std::fs;
use std::path::PathBuf;

use gesture_servo::batch::BatchRunner;
use gesture_servo::config::AppConfig;
use gesture_servo::source::SidecarJsonSource;
use gesture_servo::transport::RecordingTransport;
use gesture_servo::types::PinId;

// Right hand, all fingers up, thumb out to the left of the frame.
const OPEN_RIGHT: &str = r#"{"hands": [{"handedness": "Right", "score": 0.96, "landmarks": [
    {"x": 0.50, "y": 0.90}, {"x": 0.45, "y": 0.85}, {"x": 0.42, "y": 0.80}, {"x": 0.38, "y": 0.75}, {"x": 0.34, "y": 0.70},
    {"x": 0.45, "y": 0.60}, {"x": 0.45, "y": 0.50}, {"x": 0.45, "y": 0.42}, {"x": 0.45, "y": 0.35},
    {"x": 0.50, "y": 0.60}, {"x": 0.50, "y": 0.48}, {"x": 0.50, "y": 0.40}, {"x": 0.50, "y": 0.32},
    {"x": 0.55, "y": 0.62}, {"x": 0.55, "y": 0.52}, {"x": 0.55, "y": 0.45}, {"x": 0.55, "y": 0.38},
    {"x": 0.60, "y": 0.65}, {"x": 0.60, "y": 0.57}, {"x": 0.60, "y": 0.52}, {"x": 0.60, "y": 0.47}
]}]}"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gesture_servo_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn default_rig_drives_right_hand_open_from_image_folder() {
    let dir = scratch_dir("open_right");
    image::RgbImage::new(8, 8).save(dir.join("01_open.png")).unwrap();
    fs::write(dir.join("01_open.png.json"), OPEN_RIGHT).unwrap();
    image::RgbImage::new(8, 8).save(dir.join("02_empty.png")).unwrap();

    let config = AppConfig::default();
    let bindings = config.bindings().unwrap();
    let mut runner = BatchRunner::new(
        &bindings,
        SidecarJsonSource::new(config.detection_filter()),
        RecordingTransport::default(),
    );
    let summary = runner.run(&dir).unwrap();
    assert_eq!(summary.processed(), 2);
    assert_eq!(summary.skipped(), 0);

    let batches = runner.into_transport().batches;
    assert_eq!(batches.len(), 2);

    // d:2..d:6 are the right hand, d:8..d:12 the left hand.
    let right: Vec<&str> = vec!["d:2:s", "d:3:s", "d:4:s", "d:5:s", "d:6:s"];
    let left: Vec<&str> = vec!["d:8:s", "d:9:s", "d:10:s", "d:11:s", "d:12:s"];
    for pin in &right {
        assert_eq!(batches[0].angle_for(&PinId::new(*pin)), Some(115), "pin {}", pin);
        assert_eq!(batches[1].angle_for(&PinId::new(*pin)), Some(0), "pin {}", pin);
    }
    for pin in &left {
        assert_eq!(batches[0].angle_for(&PinId::new(*pin)), Some(180), "pin {}", pin);
        assert_eq!(batches[1].angle_for(&PinId::new(*pin)), Some(180), "pin {}", pin);
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn image_output_does_not_depend_on_previous_image() {
    let dir = scratch_dir("independent");
    image::RgbImage::new(8, 8).save(dir.join("b.png")).unwrap();

    let config = AppConfig::default();
    let bindings = config.bindings().unwrap();

    let mut alone = BatchRunner::new(
        &bindings,
        SidecarJsonSource::new(config.detection_filter()),
        RecordingTransport::default(),
    );
    alone.run(&dir).unwrap();

    image::RgbImage::new(8, 8).save(dir.join("a.png")).unwrap();
    fs::write(dir.join("a.png.json"), OPEN_RIGHT).unwrap();
    let mut after_open = BatchRunner::new(
        &bindings,
        SidecarJsonSource::new(config.detection_filter()),
        RecordingTransport::default(),
    );
    after_open.run(&dir).unwrap();

    let alone = alone.into_transport().batches;
    let after_open = after_open.into_transport().batches;
    assert_eq!(after_open.len(), 2);
    assert_ne!(after_open[0], after_open[1]);
    assert_eq!(alone[0], after_open[1]);

    fs::remove_dir_all(&dir).ok();
}
