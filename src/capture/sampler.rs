use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backend::VideoFrame;
use crate::transport::{OutboundFrame, Transport};

/// Fixed-interval frame sampler.
///
/// Each tick takes the camera's most recent frame (skipping the tick when
/// the source has not produced one yet), encodes it as a JPEG data URL and
/// submits it to the transport, which drops it unless the connection is
/// Open. Stopping cancels the timer; no frame is sent after cancellation.
pub struct FrameSampler {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl FrameSampler {
    pub fn new() -> Self {
        Self {
            task: Mutex::new(None),
        }
    }

    /// Start sampling. Replaces any previous sampling task.
    pub fn start(
        &self,
        period: Duration,
        jpeg_quality: u8,
        mut frames: watch::Receiver<Option<VideoFrame>>,
        transport: Arc<Transport>,
        is_running: Arc<AtomicBool>,
        frames_sent: Arc<AtomicUsize>,
    ) {
        let task = tokio::spawn(async move {
            info!("Frame sampler started (period {:?})", period);
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;

                if !is_running.load(Ordering::SeqCst) {
                    break;
                }

                // Skip the tick if the source has no frame yet.
                let frame = match frames.borrow_and_update().clone() {
                    Some(frame) => frame,
                    None => continue,
                };

                match encode_jpeg_data_url(&frame, jpeg_quality) {
                    Ok(image) => {
                        if transport.send(OutboundFrame::Image { image }) {
                            frames_sent.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                    Err(e) => {
                        warn!("Failed to encode frame: {}", e);
                    }
                }
            }

            info!("Frame sampler stopped");
        });

        let mut guard = self.task.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = guard.replace(task) {
            previous.abort();
        }
    }

    /// Cancel the sampling timer. No-op when not running.
    pub fn stop(&self) {
        let mut guard = self.task.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(task) = guard.take() {
            task.abort();
            debug!("Frame sampler cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        let guard = self.task.lock().unwrap_or_else(|p| p.into_inner());
        guard.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a frame as a `data:image/jpeg;base64,…` URL at the given quality
/// (0-100, the wire default is 70).
pub fn encode_jpeg_data_url(frame: &VideoFrame, quality: u8) -> Result<String> {
    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
    encoder
        .encode(
            &frame.pixels,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgb8,
        )
        .context("Failed to encode JPEG")?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(&jpeg);
    Ok(format!("data:image/jpeg;base64,{}", encoded))
}
