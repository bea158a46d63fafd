//! Keep-your-pet-alive game for the micro:bit v2.
//!
//! Everything in here is board-agnostic: the game talks to the hardware
//! through the traits in [`peripherals`], and the drivers are generic over
//! `embedded-hal`. The firmware binary does the wiring.
#![cfg_attr(not(test), no_std)]

/// Log over RTT on the device, compile away on the host.
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        rtt_target::rprintln!($($arg)*);
        #[cfg(not(target_os = "none"))]
        let _ = format_args!($($arg)*);
    }};
}

pub mod config;
pub mod duty;
pub mod encoder;
pub mod game;
pub mod lcd;
pub mod peripherals;
pub mod seven_segment;
pub mod sprites;
pub mod state;
pub mod ticks;

#[cfg(test)]
mod testing;
