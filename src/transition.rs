//! Fixed-timestep clock and the room fade.
//!
//! `draw_web()` calls at ~60fps with variable delta. `Clock` turns that into
//! discrete ticks so the fade advances deterministically and can be tested
//! without a browser.

pub struct Clock {
    /// Milliseconds per tick (e.g. 50ms = 20 ticks/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    pub total_ticks: u64,
    last_timestamp: Option<f64>,
}

impl Clock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    pub fn ms_per_tick(&self) -> f64 {
        self.ms_per_tick
    }

    /// Feed a wall-clock timestamp (from `performance.now()` or similar) and
    /// get back the number of whole ticks that elapsed since the last call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // Clamp so a backgrounded tab does not skip a whole fade
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeStep {
    Idle,
    /// Old room dimming out.
    Out,
    /// New room brightening in.
    In,
}

/// Two-phase fade played when the player changes rooms: the old scene dims
/// out, the new scene is swapped in, then it brightens back up.
#[derive(Clone, Debug)]
pub struct Fade {
    half_ms: u32,
    elapsed_ms: u32,
    step: FadeStep,
}

impl Fade {
    pub fn new(half_ms: u32) -> Self {
        Self {
            half_ms,
            elapsed_ms: 0,
            step: FadeStep::Idle,
        }
    }

    pub fn step(&self) -> FadeStep {
        self.step
    }

    pub fn is_active(&self) -> bool {
        self.step != FadeStep::Idle
    }

    /// Begin dimming out. A zero-length fade stays idle.
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.step = if self.half_ms == 0 {
            FadeStep::Idle
        } else {
            FadeStep::Out
        };
    }

    /// Advance by `ms`. Returns true on the call that crosses from `Out`
    /// into `In`, which is when the caller should swap scenes.
    pub fn advance(&mut self, ms: u32) -> bool {
        match self.step {
            FadeStep::Idle => false,
            FadeStep::Out => {
                self.elapsed_ms += ms;
                if self.elapsed_ms < self.half_ms {
                    return false;
                }
                let carry = self.elapsed_ms - self.half_ms;
                self.step = FadeStep::In;
                self.elapsed_ms = 0;
                self.advance(carry);
                true
            }
            FadeStep::In => {
                self.elapsed_ms += ms;
                if self.elapsed_ms >= self.half_ms {
                    self.step = FadeStep::Idle;
                    self.elapsed_ms = 0;
                }
                false
            }
        }
    }

    /// 1.0 is fully visible, 0.0 is black.
    pub fn brightness(&self) -> f32 {
        let t = if self.half_ms == 0 {
            1.0
        } else {
            (self.elapsed_ms as f32 / self.half_ms as f32).min(1.0)
        };
        match self.step {
            FadeStep::Idle => 1.0,
            FadeStep::Out => 1.0 - t,
            FadeStep::In => t,
        }
    }
}
