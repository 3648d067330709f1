pub mod client;
pub mod messages;

pub use client::{ConnState, Transport, TransportEvent};
pub use messages::{AiResponse, InboundMessage, OutboundFrame};
