#![no_main]
#![no_std]

mod board;
mod control;

use cortex_m::asm;
use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use microbit::hal::gpio::Level;
use microbit::hal::spim::{self, Spim};
use microbit::hal::Timer;
use microbit::Board;
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

use pet_alive::encoder::PinEncoder;
use pet_alive::game::{Devices, PetGame};
use pet_alive::lcd::Hd44780;
use pet_alive::seven_segment::SevenSegment;
use pet_alive::state::{Phase, SharedGameState};

use crate::board::{ActiveLow, MatrixBar};
use crate::control::init_ticks;

const CORE_CLOCK_HZ: u32 = 64_000_000;

static SHARED: SharedGameState = SharedGameState::new();

#[entry]
fn main() -> ! {
    rtt_init_print!();
    let board = Board::take().unwrap();

    let encoder = PinEncoder::new(
        board.edge.e00.into_pullup_input().degrade(),
        board.edge.e01.into_pullup_input().degrade(),
        board.edge.e02.into_pullup_input().degrade(),
    );

    let lcd = Hd44780::new(
        board.edge.e08.into_push_pull_output(Level::Low).degrade(),
        board.edge.e09.into_push_pull_output(Level::Low).degrade(),
        [
            board.edge.e12.into_push_pull_output(Level::Low).degrade(),
            board.edge.e16.into_push_pull_output(Level::Low).degrade(),
            board.i2c_external.scl.into_push_pull_output(Level::Low).degrade(),
            board.i2c_external.sda.into_push_pull_output(Level::Low).degrade(),
        ],
        Timer::new(board.TIMER4),
    )
    .unwrap();

    let spi = Spim::new(
        board.SPIM0,
        spim::Pins {
            sck: Some(board.pins.p0_17.into_push_pull_output(Level::Low).degrade()),
            miso: None,
            mosi: Some(board.pins.p0_13.into_push_pull_output(Level::Low).degrade()),
        },
        spim::Frequency::M1,
        spim::MODE_0,
        0,
    );
    let digits = SevenSegment::new(
        spi,
        board.pins.p0_01.into_push_pull_output(Level::High).degrade(),
        Delay::new(board.SYST, CORE_CLOCK_HZ),
    )
    .unwrap();

    let pins = board.display_pins;
    let leds = MatrixBar::new(
        pins.row1.degrade(),
        [
            pins.col1.degrade(),
            pins.col2.degrade(),
            pins.col3.degrade(),
            pins.col4.degrade(),
        ],
    );
    let heartbeat = ActiveLow(pins.col5.degrade());

    init_ticks(
        (board.TIMER0, board.TIMER1, board.TIMER2),
        encoder,
        heartbeat,
        &SHARED,
    );

    let mut game = PetGame::new(
        &SHARED,
        Devices {
            lcd,
            leds,
            digits,
            delay: Timer::new(board.TIMER3),
        },
    );
    game.init();

    while game.step() != Phase::Won {}

    rprintln!("pet: survived, halting");
    loop {
        asm::wfi();
    }
}
