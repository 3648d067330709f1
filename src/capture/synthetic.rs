use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use super::backend::{CameraBackend, CameraConfig, VideoFrame};

/// Frame source that renders a moving gradient instead of opening a device.
///
/// Used by tests and hardware-free runs; produces valid RGB8 frames at the
/// configured rate.
pub struct SyntheticCamera {
    config: CameraConfig,
    task: Option<JoinHandle<()>>,
}

impl SyntheticCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self { config, task: None }
    }

    fn render_frame(config: &CameraConfig, tick: u64) -> VideoFrame {
        let (width, height) = (config.width, config.height);
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        let phase = (tick * 8) as u32;

        for y in 0..height {
            for x in 0..width {
                pixels.push(((x + phase) % 256) as u8);
                pixels.push(((y + phase) % 256) as u8);
                pixels.push(((x + y) % 256) as u8);
            }
        }

        VideoFrame {
            pixels,
            width,
            height,
            timestamp_ms: tick * 1000 / config.frame_rate.max(1) as u64,
        }
    }
}

#[async_trait::async_trait]
impl CameraBackend for SyntheticCamera {
    async fn start(&mut self) -> Result<watch::Receiver<Option<VideoFrame>>> {
        let (tx, rx) = watch::channel(None);
        let config = self.config.clone();

        let task = tokio::spawn(async move {
            let period = Duration::from_millis(1000 / config.frame_rate.max(1) as u64);
            let mut interval = tokio::time::interval(period);
            let mut tick: u64 = 0;

            loop {
                interval.tick().await;
                let frame = Self::render_frame(&config, tick);
                tick += 1;
                if tx.send(Some(frame)).is_err() {
                    // All receivers dropped, nothing left to feed.
                    break;
                }
            }
        });

        self.task = Some(task);
        info!("Synthetic camera started ({}x{})", self.config.width, self.config.height);

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Synthetic camera stopped");
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
