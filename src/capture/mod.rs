//! Webcam frame capture
//!
//! A camera backend publishes its latest frame; the [`FrameSampler`] ships
//! one JPEG per second to the transport while the session runs.

mod backend;
mod sampler;
mod synthetic;

pub use backend::{CameraBackend, CameraBackendFactory, CameraConfig, CameraSource, VideoFrame};
pub use sampler::{encode_jpeg_data_url, FrameSampler};
pub use synthetic::SyntheticCamera;
