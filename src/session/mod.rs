pub mod controller;
pub mod handshake;
mod monitor;
pub mod state;
pub mod summary;

pub use controller::{ControllerParts, SessionController};
pub use handshake::{Decision, DecisionReply, Handshake, InterruptDecision};
pub use state::{SessionMode, SessionPhase, SessionState};
pub use summary::SessionSummary;
