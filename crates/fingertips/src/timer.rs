//! Performance measurement tools.

use std::{
    cell::Cell,
    fmt::{self, Arguments},
    mem,
    sync::Mutex,
    time::{Duration, Instant},
};

const EMA_ALPHA: f32 = 0.3;

/// A timer that can measure and average the time an operation takes.
///
/// Measurements are smoothed with an exponential moving average. Collected timings are reset
/// when the timer is displayed using `{}` ([`std::fmt::Display`]).
pub struct Timer {
    name: &'static str,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    /// The current smoothed time in seconds, or `None` if nothing was recorded yet.
    avg: Option<f32>,
    /// The number of time measurements that contributed to the current `avg`.
    count: usize,
}

impl State {
    fn record(&mut self, secs: f32) {
        self.avg = Some(match self.avg {
            Some(avg) => EMA_ALPHA * secs + (1.0 - EMA_ALPHA) * avg,
            None => secs,
        });
        self.count += 1;
    }
}

impl Timer {
    /// Creates a new timer.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(State::default()),
        }
    }

    /// Invokes a closure, measuring and recording the time it takes.
    pub fn time<T>(&self, timee: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        timee()
    }

    /// Starts timing an operation using a drop guard.
    ///
    /// When the returned [`TimerGuard`] is dropped, the time between the call to `start` and the
    /// drop is measured and recorded.
    pub fn start(&self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            timer: self,
        }
    }

    fn stop(&self, start: Instant) {
        self.record(start.elapsed());
    }

    fn record(&self, duration: Duration) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.record(duration.as_secs_f32());
    }
}

/// Displays the average recorded time and resets it.
impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let State { avg, count } = mem::take(&mut *state);
        let avg_ms = avg.unwrap_or(0.0) * 1000.0;

        write!(f, "{}: {count}x{avg_ms:.01}ms", self.name)
    }
}

/// Guard returned by [`Timer::start`]. Stops timing the operation when dropped.
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a Timer,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.stop(self.start);
    }
}

/// Measures the instantaneous frame rate of a frame loop.
///
/// Every call to [`FrameClock::tick`] computes the rate from the time since the previous call.
#[derive(Debug, Default)]
pub struct FrameClock {
    prev: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of a new frame and returns the current frame rate in Hz.
    ///
    /// Returns [`None`] on the first call, since there is no previous frame yet, and when no time
    /// has passed since the previous call.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f32> {
        let prev = self.prev.replace(now)?;
        let secs = now.saturating_duration_since(prev).as_secs_f32();
        if secs > 0.0 {
            Some(1.0 / secs)
        } else {
            None
        }
    }
}

/// Logs frames per second with optional extra data.
pub struct FpsCounter {
    name: String,
    frames: u32,
    start: Instant,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            start: Instant::now(),
        }
    }

    /// Advances the frame counter by 1 and logs FPS if one second has passed.
    ///
    /// The logged string will also include the counter's name passed to [`FpsCounter::new`].
    pub fn tick(&mut self) {
        self.tick_impl(format_args!(""));
    }

    /// Advances the frame counter by 1 and logs FPS and `extra` data if one second has passed.
    ///
    /// The logged string will also include the counter's name passed to [`FpsCounter::new`].
    pub fn tick_with<D: fmt::Display, I: IntoIterator<Item = D>>(&mut self, extra: I) {
        struct DisplayExtra<D: fmt::Display, I: Iterator<Item = D>>(Cell<Option<I>>);

        impl<D: fmt::Display, I: Iterator<Item = D>> fmt::Display for DisplayExtra<D, I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let Some(mut iter) = self.0.take() else {
                    return Ok(());
                };
                match iter.next() {
                    Some(item) => {
                        write!(f, " ({item}")?;
                        for item in iter {
                            write!(f, ", {item}")?;
                        }
                        f.write_str(")")
                    }
                    None => Ok(()),
                }
            }
        }

        self.tick_impl(format_args!(
            "{}",
            DisplayExtra(Cell::new(Some(extra.into_iter())))
        ));
    }

    fn tick_impl(&mut self, args: Arguments<'_>) {
        self.frames += 1;
        if self.start.elapsed() > Duration::from_secs(1) {
            log::debug!("{}: {} FPS{}", self.name, self.frames, args);

            self.frames = 0;
            self.start = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn timer_smooths_and_resets() {
        let timer = Timer::new("t");
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        // 0.3 * 20 + 0.7 * 10
        assert_eq!(timer.to_string(), "t: 2x13.0ms");
        assert_eq!(timer.to_string(), "t: 0x0.0ms");
    }

    #[test]
    fn timer_guard_records() {
        let timer = Timer::new("guarded");
        let value = timer.time(|| 42);
        assert_eq!(value, 42);
        assert!(timer.to_string().starts_with("guarded: 1x"));
    }

    #[test]
    fn frame_clock() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0), None);
        let fps = clock.tick_at(t0 + Duration::from_millis(40)).unwrap();
        assert_relative_eq!(fps, 25.0, max_relative = 1e-4);
        let t1 = t0 + Duration::from_millis(40);
        assert_eq!(clock.tick_at(t1), None);
    }

    #[test]
    fn fps_counter_restarts_every_second() {
        let mut counter = FpsCounter::new("frames");
        counter.tick();
        counter.tick_with(["extra"]);
        assert_eq!(counter.frames, 2);

        counter.start = Instant::now() - Duration::from_secs(2);
        counter.tick();
        assert_eq!(counter.frames, 0);
        assert!(counter.start.elapsed() < Duration::from_secs(1));
    }
}
