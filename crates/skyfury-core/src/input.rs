//! Per-frame control state.

use serde::{Deserialize, Serialize};

/// Axis and button booleans sampled once per frame.
///
/// On the runway `up` is throttle and `down` is brake; in the air they
/// pitch the nose; in combat all four directions move the aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire_primary: bool,
    pub fire_missile: bool,
    /// Held to charge the plasma laser; releasing fires it.
    pub charge_laser: bool,
    pub shield: bool,
}
