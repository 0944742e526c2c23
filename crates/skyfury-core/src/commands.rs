//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

/// Menu-level actions. Per-frame flight and weapon controls travel as
/// [`InputState`](crate::input::InputState) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new game on the given level (1-based).
    StartLevel { level: u32 },
    /// Start an endless practice arena with no scripted waves.
    StartPractice,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Abandon the current game and return to the main menu.
    ReturnToMenu,
}
