//! Discrete tick counter driving the in-game time of day and day counter.

use deadhold_core::TimeOfDay;

const MINUTES_PER_DAY: u32 = 24 * 60;
const DAWN_HOUR: u32 = 6;

/// Outcome of advancing the clock by one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockAdvance {
    /// The tick completed a step and the time of day moved forward.
    pub stepped: bool,
    /// The step landed on 06:00 and the day counter incremented.
    pub new_day: bool,
}

/// In-game clock. Every `ticks_per_step` ticks the time moves forward by
/// `minutes_per_step` minutes, wrapping at midnight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    minutes_per_step: u32,
    ticks_per_step: u32,
    total_steps: u32,
    step: u32,
    ticks: u64,
    day: u32,
}

impl Clock {
    /// Creates a clock set to 06:00 on day 1.
    ///
    /// Zero rates are clamped to one so the clock always advances.
    #[must_use]
    pub fn new(minutes_per_step: u32, ticks_per_step: u32) -> Self {
        let minutes_per_step = minutes_per_step.clamp(1, MINUTES_PER_DAY);
        let total_steps = (MINUTES_PER_DAY / minutes_per_step).max(1);
        Self {
            minutes_per_step,
            ticks_per_step: ticks_per_step.max(1),
            total_steps,
            step: (DAWN_HOUR * 60) / minutes_per_step,
            ticks: 0,
            day: 1,
        }
    }

    /// Rebuilds a clock from persisted counters.
    #[must_use]
    pub fn resume(
        minutes_per_step: u32,
        ticks_per_step: u32,
        ticks: u64,
        step: u32,
        day: u32,
    ) -> Self {
        let mut clock = Self::new(minutes_per_step, ticks_per_step);
        clock.ticks = ticks;
        clock.step = step % clock.total_steps;
        clock.day = day.max(1);
        clock
    }

    /// Advances the clock by a single tick.
    pub fn advance(&mut self) -> ClockAdvance {
        self.ticks = self.ticks.saturating_add(1);
        if self.ticks % u64::from(self.ticks_per_step) != 0 {
            return ClockAdvance::default();
        }

        self.step = (self.step + 1) % self.total_steps;
        let new_day = self.is_new_day();
        if new_day {
            self.day = self.day.saturating_add(1);
        }
        ClockAdvance {
            stepped: true,
            new_day,
        }
    }

    /// Current in-game time.
    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        let minutes = self.step * self.minutes_per_step;
        TimeOfDay {
            hour: minutes / 60,
            minute: minutes % 60,
        }
    }

    /// Reports whether the current time falls into the night.
    #[must_use]
    pub fn is_night(&self) -> bool {
        self.time_of_day().is_night()
    }

    /// Reports whether the latest tick was the step transition onto 06:00.
    #[must_use]
    pub fn is_new_day(&self) -> bool {
        let time = self.time_of_day();
        self.ticks > 0
            && self.ticks % u64::from(self.ticks_per_step) == 0
            && time.hour == DAWN_HOUR
            && time.minute == 0
    }

    /// Ticks elapsed since the clock started.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Index of the current step within the day.
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Number of steps making up a full day.
    #[must_use]
    pub const fn steps_per_day(&self) -> u32 {
        self.total_steps
    }

    /// Number of ticks making up a single step.
    #[must_use]
    pub const fn ticks_per_step(&self) -> u32 {
        self.ticks_per_step
    }

    /// Day counter, starting at 1.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }
}
