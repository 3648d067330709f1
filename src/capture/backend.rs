use anyhow::Result;
use tokio::sync::watch;

/// One captured video frame (RGB8, interleaved, native resolution).
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Raw pixel data (RGB8, row-major, interleaved)
    pub pixels: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Configuration for a camera backend
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Capture width in pixels
    pub width: u32,
    /// Capture height in pixels
    pub height: u32,
    /// Frames produced per second by the backend
    pub frame_rate: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_rate: 15,
        }
    }
}

/// Camera capture backend trait
///
/// The backend publishes its most recent frame into a watch channel; the
/// sampler reads whatever is current at each tick. `None` means the source
/// has not produced a frame yet (not ready).
#[async_trait::async_trait]
pub trait CameraBackend: Send + Sync {
    /// Start capturing frames
    ///
    /// Returns a watch receiver holding the latest captured frame
    async fn start(&mut self) -> Result<watch::Receiver<Option<VideoFrame>>>;

    /// Stop capturing frames
    async fn stop(&mut self) -> Result<()>;

    /// Check if backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Camera source type
#[derive(Debug, Clone)]
pub enum CameraSource {
    /// A physical capture device
    Device,
    /// Synthetic frames (for testing and hardware-free runs)
    Synthetic,
}

/// Camera backend factory
pub struct CameraBackendFactory;

impl CameraBackendFactory {
    /// Create a camera backend for the requested source
    pub fn create(source: CameraSource, config: CameraConfig) -> Result<Box<dyn CameraBackend>> {
        match source {
            CameraSource::Device => {
                anyhow::bail!("Device camera capture is not supported on this platform")
            }
            CameraSource::Synthetic => {
                let backend = super::synthetic::SyntheticCamera::new(config);
                Ok(Box::new(backend))
            }
        }
    }
}
