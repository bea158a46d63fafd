use core::cell::RefCell;
use cortex_m::interrupt::{free, Mutex};
use microbit::hal::prelude::*;
use microbit::hal::timer::{Instance, Periodic, Timer};
use microbit::pac::{self, interrupt, TIMER0, TIMER1, TIMER2};
use pet_alive::config::TIMER_CYCLES_PER_MS;
use pet_alive::state::SharedGameState;
use pet_alive::ticks::{CountdownTick, EncoderTick, PwmTick, Tick};

use crate::board::{Encoder, Heartbeat};

/// A periodic hardware timer firing one tick task every millisecond.
pub(crate) struct TickSource<TIM: Instance, T> {
    timer: Timer<TIM, Periodic>,
    task: T,
}

impl<TIM: Instance, T: Tick> TickSource<TIM, T> {
    fn new(timer: TIM, task: T) -> Self {
        let mut timer = Timer::periodic(timer);
        timer.enable_interrupt();
        timer.reset_event();
        timer.start(TIMER_CYCLES_PER_MS);
        TickSource { timer, task }
    }

    fn on_interrupt(&mut self) {
        self.timer.reset_event();
        self.task.tick();
    }
}

type EncoderSource = TickSource<TIMER0, EncoderTick<'static, Encoder>>;
type CountdownSource = TickSource<TIMER1, CountdownTick<'static>>;
type PwmSource = TickSource<TIMER2, PwmTick<'static, Heartbeat>>;

static ENCODER: Mutex<RefCell<Option<EncoderSource>>> = Mutex::new(RefCell::new(None));
static COUNTDOWN: Mutex<RefCell<Option<CountdownSource>>> = Mutex::new(RefCell::new(None));
static PWM: Mutex<RefCell<Option<PwmSource>>> = Mutex::new(RefCell::new(None));

/// Hand the tick tasks their timers and start all three.
pub(crate) fn init_ticks(
    timers: (TIMER0, TIMER1, TIMER2),
    encoder: Encoder,
    heartbeat: Heartbeat,
    shared: &'static SharedGameState,
) {
    let (timer0, timer1, timer2) = timers;
    let encoder = TickSource::new(timer0, EncoderTick::new(encoder, shared));
    let countdown = TickSource::new(timer1, CountdownTick::new(shared));
    let pwm = TickSource::new(timer2, PwmTick::new(heartbeat, shared));

    free(move |cs| {
        *ENCODER.borrow(cs).borrow_mut() = Some(encoder);
        *COUNTDOWN.borrow(cs).borrow_mut() = Some(countdown);
        *PWM.borrow(cs).borrow_mut() = Some(pwm);

        for irq in [pac::Interrupt::TIMER0, pac::Interrupt::TIMER1, pac::Interrupt::TIMER2] {
            pac::NVIC::unpend(irq);
            unsafe {
                pac::NVIC::unmask(irq);
            }
        }
    });
}

#[interrupt]
fn TIMER0() {
    free(|cs| {
        if let Some(source) = ENCODER.borrow(cs).borrow_mut().as_mut() {
            source.on_interrupt();
        }
    });
}

#[interrupt]
fn TIMER1() {
    free(|cs| {
        if let Some(source) = COUNTDOWN.borrow(cs).borrow_mut().as_mut() {
            source.on_interrupt();
        }
    });
}

#[interrupt]
fn TIMER2() {
    free(|cs| {
        if let Some(source) = PWM.borrow(cs).borrow_mut().as_mut() {
            source.on_interrupt();
        }
    });
}
