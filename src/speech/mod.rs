//! Speech recognition channel
//!
//! Wraps a continuous speech-to-text engine with the restart policy that
//! keeps recognition running across spontaneous engine stops.

mod channel;
mod engine;
mod scripted;

pub use channel::{SpeechChannel, SpeechUpdate};
pub use engine::{SpeechEngine, SpeechError, SpeechEvent};
pub use scripted::ScriptedEngine;
