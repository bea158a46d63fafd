//! Heartbeat duty mapping.
//!
//! The heartbeat LED gets brighter the more life segments are left. Only five
//! discrete levels exist so the PWM interrupt never does more than a compare.

use crate::config::DUTY_TABLE;
use crate::state::HungerMask;

/// Duty cycle, in percent, for the given hunger mask.
///
/// Four lit segments give 100%, then 50, 25, 10 and finally 0 with the bar empty.
pub fn duty_level(mask: HungerMask) -> u8 {
    DUTY_TABLE[mask.lit() as usize]
}
