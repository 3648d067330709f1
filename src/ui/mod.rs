//! Presentation state
//!
//! The assistant's user-facing surface modeled as plain state: a front end
//! renders from these structs, and tests assert against them directly.
//! All mutation happens synchronously under the session's lock.

mod audio;
mod conversation;
mod emotion;
mod gallery;
mod status;

pub use audio::{AudioPlayer, PlaybackState};
pub use conversation::{ConversationEntry, ConversationLog, Role, VoicePreview};
pub use emotion::{Emotion, EmotionDisplay};
pub use gallery::{ImageGallery, ImageResult, Lightbox};
pub use status::{Status, StatusPresenter};

/// Everything the assistant shows the user, in one place.
#[derive(Debug, Default)]
pub struct View {
    pub status: StatusPresenter,
    pub emotion: EmotionDisplay,
    pub conversation: ConversationLog,
    pub voice: VoicePreview,
    /// Latest AI response text.
    pub response_text: String,
    pub gallery: ImageGallery,
    pub audio: AudioPlayer,
}

impl View {
    /// Reset everything a fresh session should not inherit.
    ///
    /// The conversation, response text, gallery and audio source are cleared;
    /// status and emotion carry over until new events arrive.
    pub fn clear_session_state(&mut self) {
        self.conversation.clear();
        self.voice.clear();
        self.response_text.clear();
        self.gallery.replace(Vec::new());
        self.audio.unload();
    }
}
