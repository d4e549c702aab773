//! # gesture_servo
//!
//! Turns hand landmarks from a pose estimator into servo angles for a pair of
//! robotic hands.
//!
//! landmarks -> [`classifier`] -> finger states -> [`actuation`] -> angles
//! -> [`orchestrator`] batch of ten commands -> external transport.
//!
//! The estimator and the servo link are outside this crate; [`source`] and
//! [`transport`] are the seams they plug into, and [`batch`] / [`stream`]
//! are the two frame loops (still images and live frames).

pub mod actuation;
pub mod args;
pub mod batch;
pub mod bindings;
pub mod classifier;
pub mod config;
pub mod error;
pub mod landmarks;
pub mod orchestrator;
pub mod source;
pub mod stream;
pub mod transport;
pub mod types;


pub use error::{ConfigError, EngineError};
pub use orchestrator::{process, FrameReport};
