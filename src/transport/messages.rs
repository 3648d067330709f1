use serde::{Deserialize, Serialize};

use crate::ui::{Emotion, ImageResult};

/// Frames the client sends to the service (JSON-encoded text frames).
///
/// Both shapes are single-key objects: `{"image": …}` carries a data-URL
/// encoded JPEG, `{"text": …}` a final speech transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundFrame {
    Image { image: String },
    Text { text: String },
}

/// Structured response body carried by an `ai_response` message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiResponse {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub images: Vec<ImageResult>,
}

/// Messages the service pushes to the client, tagged by `type`.
///
/// Unrecognized tags decode to [`InboundMessage::Unknown`] so new server
/// message types never break dispatch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    Emotion {
        emotion: Emotion,
    },
    AiResponse {
        response: AiResponse,
    },
    Audio {
        url: String,
    },
    /// Feature disabled server-side; payload intentionally ignored.
    FinalResponse,
    StopAcknowledged,
    Error {
        message: String,
    },
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Decode one inbound text frame.
    ///
    /// Non-parseable payloads are an error for the caller to log and
    /// discard; they must never close the connection.
    pub fn decode(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
