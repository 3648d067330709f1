pub mod capture;
pub mod config;
pub mod retry;
pub mod session;
pub mod speech;
pub mod transport;
pub mod ui;

pub use capture::{
    encode_jpeg_data_url, CameraBackend, CameraBackendFactory, CameraConfig, CameraSource,
    FrameSampler, SyntheticCamera, VideoFrame,
};
pub use config::Config;
pub use retry::{RestartSchedule, RetryPolicy};
pub use session::{AssistantSession, SessionConfig, SessionStats};
pub use speech::{ScriptedEngine, SpeechChannel, SpeechEngine, SpeechError, SpeechEvent, SpeechUpdate};
pub use transport::{AiResponse, ConnState, InboundMessage, OutboundFrame, Transport, TransportEvent};
pub use ui::{
    AudioPlayer, ConversationEntry, ConversationLog, Emotion, ImageGallery, ImageResult, Lightbox,
    PlaybackState, Role, Status, StatusPresenter, View, VoicePreview,
};
