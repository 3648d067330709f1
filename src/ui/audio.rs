/// Playback engine states the player mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Ended,
}

/// Audio player model: source, playback state, and progress readouts.
///
/// The media engine drives this through `play`/`pause`/`handle_ended`/
/// `tick`; the progress bar and time labels are derived views.
#[derive(Debug, Default)]
pub struct AudioPlayer {
    source: Option<String>,
    state: PlaybackState,
    duration_secs: f64,
    position_secs: f64,
}

impl AudioPlayer {
    /// Set a new source and start playing from the beginning.
    pub fn load(&mut self, url: impl Into<String>) {
        self.source = Some(url.into());
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.state = PlaybackState::Playing;
    }

    pub fn unload(&mut self) {
        self.source = None;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.state = PlaybackState::Idle;
    }

    /// Engine reported the media's duration (loadedmetadata).
    pub fn set_duration(&mut self, secs: f64) {
        self.duration_secs = secs.max(0.0);
    }

    pub fn play(&mut self) {
        if self.source.is_some() {
            self.state = PlaybackState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Engine reached end of media: progress resets to zero.
    pub fn handle_ended(&mut self) {
        self.state = PlaybackState::Ended;
        self.position_secs = 0.0;
    }

    /// Periodic position update while playing (timeupdate).
    pub fn tick(&mut self, position_secs: f64) {
        self.position_secs = position_secs.clamp(0.0, self.duration_secs.max(position_secs));
    }

    /// Click on the progress bar: seek proportionally to the click position
    /// within the bar's rendered width.
    pub fn seek_fraction(&mut self, fraction: f64) {
        if self.duration_secs > 0.0 {
            self.position_secs = self.duration_secs * fraction.clamp(0.0, 1.0);
        }
    }

    /// Progress bar width, 0..=100.
    pub fn progress_percent(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.position_secs / self.duration_secs) * 100.0
        } else {
            0.0
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.position_secs)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.duration_secs)
    }

    /// Pause control is visible while playing; play control otherwise.
    pub fn show_pause_control(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

/// Format seconds as `m:ss` ("0:07", "12:30").
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let minutes = total / 60;
    let secs = total % 60;
    format!("{}:{:02}", minutes, secs)
}
