//! Poll loop driver
//!
//! Owns the hardware collaborators and the controller. Provides portable
//! pacing without async/await or platform-specific timers: the caller is
//! responsible for sleeping between cycles.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::ControllerConfig;
use crate::controller::{Controller, CycleOutcome};
use crate::error::ConfigError;
use crate::{OutputDriver, PowerControl, SampleSource};

/// Result of a poll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    /// Sleep this long, then tick again
    Sleep(Duration),
    /// The device has shut down; do not tick again
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Rail still off, splash may be showing
    Booting,
    Running,
    Halted,
}

/// Portable poll scheduler
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = PollScheduler::new(&config, source, driver, power)?;
///
/// sleep(scheduler.start());
/// while let PollResult::Sleep(duration) = scheduler.tick(Instant::now()) {
///     sleep(duration);
/// }
/// ```
pub struct PollScheduler<S, O, P, const CHANNELS: usize, const LEDS: usize>
where
    S: SampleSource,
    O: OutputDriver,
    P: PowerControl,
{
    source: S,
    output: O,
    power: P,
    controller: Controller<CHANNELS, LEDS>,
    poll_interval: Duration,
    phase: Phase,
}

impl<S, O, P, const CHANNELS: usize, const LEDS: usize> PollScheduler<S, O, P, CHANNELS, LEDS>
where
    S: SampleSource,
    O: OutputDriver,
    P: PowerControl,
{
    pub fn new(
        config: &ControllerConfig<'_>,
        source: S,
        output: O,
        power: P,
    ) -> Result<Self, ConfigError> {
        let controller = Controller::new(config, Instant::from_ticks(0))?;
        Ok(Self {
            source,
            output,
            power,
            controller,
            poll_interval: config.poll_interval,
            phase: Phase::Booting,
        })
    }

    /// Show the startup splash
    ///
    /// Returns how long the caller should hold the splash before the first
    /// [`tick`](Self::tick).
    pub fn start(&mut self) -> Duration {
        #[cfg(feature = "esp32-log")]
        println!("[PollScheduler.start] showing startup splash");
        let frame = self.controller.render_splash();
        self.output.write(frame);
        self.controller.startup().hold
    }

    /// Run one poll cycle
    ///
    /// The first tick enables the power rail and anchors the idle clock.
    /// On shutdown the dark frame is transmitted, the rail is released and
    /// [`PowerControl::halt`] is called exactly once.
    pub fn tick(&mut self, now: Instant) -> PollResult {
        match self.phase {
            Phase::Halted => return PollResult::Halted,
            Phase::Booting => {
                self.power.set_power_rail(true);
                self.controller.restart_idle_clock(now);
                self.phase = Phase::Running;
            }
            Phase::Running => {}
        }

        let samples: [u16; CHANNELS] =
            core::array::from_fn(|channel| self.source.read_sample(channel));
        let report = self.controller.run_cycle(&samples, now);
        self.output.write(self.controller.frame());

        match report.outcome {
            CycleOutcome::Continue => PollResult::Sleep(self.poll_interval),
            CycleOutcome::Shutdown => {
                #[cfg(feature = "esp32-log")]
                println!("[PollScheduler.tick] shutdown after {}s idle", report.idle.as_secs());
                self.power.set_power_rail(false);
                self.phase = Phase::Halted;
                self.power.halt();
                PollResult::Halted
            }
        }
    }

    /// Drive the whole lifecycle: splash, poll cycles, shutdown
    ///
    /// On hardware this never returns because `halt` does not. With a
    /// returning `halt` it comes back once the device has shut down.
    pub fn run(&mut self, mut now: impl FnMut() -> Instant, mut sleep: impl FnMut(Duration)) {
        let hold = self.start();
        sleep(hold);
        while let PollResult::Sleep(duration) = self.tick(now()) {
            sleep(duration);
        }
    }

    pub fn controller(&self) -> &Controller<CHANNELS, LEDS> {
        &self.controller
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn power(&self) -> &P {
        &self.power
    }
}
