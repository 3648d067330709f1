use serde::{Deserialize, Serialize};

/// Emotion labels the service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    #[default]
    Neutral,
}

impl Emotion {
    /// Capitalized display label ("Happy").
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Angry => "Angry",
            Emotion::Disgust => "Disgust",
            Emotion::Fear => "Fear",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Surprise => "Surprise",
            Emotion::Neutral => "Neutral",
        }
    }

    /// Emoji glyph shown beside the label.
    pub fn glyph(&self) -> &'static str {
        match self {
            Emotion::Angry => "😠",
            Emotion::Disgust => "🤢",
            Emotion::Fear => "😨",
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Surprise => "😲",
            Emotion::Neutral => "😐",
        }
    }

    /// Styling class for the label element ("emotion-happy").
    pub fn css_class(&self) -> &'static str {
        match self {
            Emotion::Angry => "emotion-angry",
            Emotion::Disgust => "emotion-disgust",
            Emotion::Fear => "emotion-fear",
            Emotion::Happy => "emotion-happy",
            Emotion::Sad => "emotion-sad",
            Emotion::Surprise => "emotion-surprise",
            Emotion::Neutral => "emotion-neutral",
        }
    }
}

/// Current-emotion readout.
#[derive(Debug, Default)]
pub struct EmotionDisplay {
    current: Emotion,
}

impl EmotionDisplay {
    pub fn set(&mut self, emotion: Emotion) {
        self.current = emotion;
    }

    pub fn current(&self) -> Emotion {
        self.current
    }

    pub fn label(&self) -> &'static str {
        self.current.label()
    }

    pub fn glyph(&self) -> &'static str {
        self.current.glyph()
    }
}
