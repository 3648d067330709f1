use aura_client::transport::{AiResponse, InboundMessage, OutboundFrame};
use aura_client::ui::{Emotion, ImageResult};

#[test]
fn test_outbound_image_frame_shape() {
    let frame = OutboundFrame::Image {
        image: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
    };

    let json = serde_json::to_string(&frame).unwrap();
    assert!(json.starts_with("{\"image\":"));
    assert!(json.contains("data:image/jpeg;base64,"));
    assert!(!json.contains("\"type\""));

    let deserialized: OutboundFrame = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, frame);
}

#[test]
fn test_outbound_text_frame_shape() {
    let frame = OutboundFrame::Text {
        text: "turn left".to_string(),
    };

    let json = serde_json::to_string(&frame).unwrap();
    assert_eq!(json, r#"{"text":"turn left"}"#);
}

#[test]
fn test_emotion_message_decodes() {
    let msg = InboundMessage::decode(r#"{"type":"emotion","emotion":"happy"}"#).unwrap();
    assert_eq!(
        msg,
        InboundMessage::Emotion {
            emotion: Emotion::Happy
        }
    );
}

#[test]
fn test_all_emotion_labels_decode() {
    for (name, expected) in [
        ("angry", Emotion::Angry),
        ("disgust", Emotion::Disgust),
        ("fear", Emotion::Fear),
        ("happy", Emotion::Happy),
        ("sad", Emotion::Sad),
        ("surprise", Emotion::Surprise),
        ("neutral", Emotion::Neutral),
    ] {
        let json = format!(r#"{{"type":"emotion","emotion":"{}"}}"#, name);
        let msg = InboundMessage::decode(&json).unwrap();
        assert_eq!(msg, InboundMessage::Emotion { emotion: expected });
    }
}

#[test]
fn test_ai_response_with_images() {
    let json = r#"{
        "type": "ai_response",
        "response": {
            "result": "Here is what I found",
            "images": [
                {"image_url": "https://img.example/a.jpg", "source_url": "https://example.com/a"},
                {"image_url": "https://img.example/b.jpg"}
            ]
        }
    }"#;

    let msg = InboundMessage::decode(json).unwrap();
    let InboundMessage::AiResponse { response } = msg else {
        panic!("expected ai_response");
    };

    assert_eq!(response.result, "Here is what I found");
    assert_eq!(response.images.len(), 2);
    assert_eq!(
        response.images[0],
        ImageResult {
            image_url: "https://img.example/a.jpg".to_string(),
            source_url: Some("https://example.com/a".to_string()),
        }
    );
    assert_eq!(response.images[1].source_url, None);
}

#[test]
fn test_ai_response_missing_fields_default() {
    let msg = InboundMessage::decode(r#"{"type":"ai_response","response":{}}"#).unwrap();
    assert_eq!(
        msg,
        InboundMessage::AiResponse {
            response: AiResponse::default()
        }
    );
}

#[test]
fn test_audio_message_decodes() {
    let msg = InboundMessage::decode(r#"{"type":"audio","url":"/audio/out.mp3"}"#).unwrap();
    assert_eq!(
        msg,
        InboundMessage::Audio {
            url: "/audio/out.mp3".to_string()
        }
    );
}

#[test]
fn test_final_response_payload_is_ignored() {
    // Whatever the disabled feature ships alongside the tag must not matter.
    let msg = InboundMessage::decode(
        r#"{"type":"final_response","response":{"result":"bye"},"extra":42}"#,
    )
    .unwrap();
    assert_eq!(msg, InboundMessage::FinalResponse);
}

#[test]
fn test_stop_acknowledged_decodes() {
    let msg = InboundMessage::decode(r#"{"type":"stop_acknowledged"}"#).unwrap();
    assert_eq!(msg, InboundMessage::StopAcknowledged);
}

#[test]
fn test_error_message_decodes() {
    let msg =
        InboundMessage::decode(r#"{"type":"error","message":"no face detected"}"#).unwrap();
    assert_eq!(
        msg,
        InboundMessage::Error {
            message: "no face detected".to_string()
        }
    );
}

#[test]
fn test_unrecognized_tag_maps_to_unknown() {
    let msg = InboundMessage::decode(r#"{"type":"telemetry","uptime":12}"#).unwrap();
    assert_eq!(msg, InboundMessage::Unknown);
}

#[test]
fn test_malformed_payload_is_an_error() {
    assert!(InboundMessage::decode("not json at all").is_err());
    assert!(InboundMessage::decode(r#"{"no_type_field":true}"#).is_err());
}

// The emotion set is closed: a label outside it is rejected at the wire
// boundary, and the display keeps showing its current state (Neutral until
// a valid label has arrived).
#[test]
fn test_unknown_emotion_value_is_rejected() {
    assert!(InboundMessage::decode(r#"{"type":"emotion","emotion":"ecstatic"}"#).is_err());

    let display = aura_client::ui::EmotionDisplay::default();
    assert_eq!(display.current(), aura_client::ui::Emotion::Neutral);
    assert_eq!(display.glyph(), "😐");
}
