//! Single owner of all control-loop state
//!
//! One call to [`Controller::run_cycle`] is one poll cycle: quantize,
//! debounce, decide the power mode, render. It performs no I/O and does not
//! sleep; the caller reads the samples, ships the frame and acts on the
//! returned outcome.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::config::{ControllerConfig, StartupConfig};
use crate::debouncer::{FrameVerdict, StateDebouncer, StateVector};
use crate::error::ConfigError;
use crate::power::{PowerMode, PowerModeController};
use crate::quantizer::LevelQuantizer;
use crate::renderer::{IntensityTable, LampRenderer};

/// What the outer loop should do after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Transmit the frame, sleep, poll again
    Continue,
    /// Transmit the dark frame, release the power rail and halt
    Shutdown,
}

/// Summary of one poll cycle
#[derive(Debug, Clone, Copy)]
pub struct CycleReport<const CHANNELS: usize> {
    pub mode: PowerMode,
    pub state: StateVector<CHANNELS>,
    pub idle: Duration,
    pub verdict: FrameVerdict,
    pub outcome: CycleOutcome,
}

/// Level-input controller for `CHANNELS` inputs and a chain of `LEDS` lamps
pub struct Controller<const CHANNELS: usize, const LEDS: usize> {
    quantizer: LevelQuantizer,
    debouncer: StateDebouncer<CHANNELS>,
    power: PowerModeController,
    renderer: LampRenderer<LEDS>,
    startup: StartupConfig,
}

impl<const CHANNELS: usize, const LEDS: usize> Controller<CHANNELS, LEDS> {
    /// Build a controller, rejecting inconsistent configuration
    ///
    /// The idle clock is anchored at `now` and every channel starts at level 0.
    pub fn new(config: &ControllerConfig<'_>, now: Instant) -> Result<Self, ConfigError> {
        config.check_layout(CHANNELS)?;
        let quantizer = LevelQuantizer::new(config.bands, config.tolerance)?;
        let intensities = IntensityTable::new(config.intensities)?;
        let renderer = LampRenderer::new(config.segments, intensities, config.standby)?;
        let power = PowerModeController::new(config.timeouts, config.pulse)?;

        Ok(Self {
            quantizer,
            debouncer: StateDebouncer::new(now),
            power,
            renderer,
            startup: config.startup,
        })
    }

    pub const fn mode(&self) -> PowerMode {
        self.power.mode()
    }

    pub const fn state(&self) -> &StateVector<CHANNELS> {
        self.debouncer.state()
    }

    pub const fn last_changed(&self) -> Instant {
        self.debouncer.clock().last_changed()
    }

    /// Current standby pulse phase
    pub const fn pulse_value(&self) -> f32 {
        self.power.pulse().value()
    }

    pub const fn startup(&self) -> StartupConfig {
        self.startup
    }

    /// Last rendered frame
    pub fn frame(&self) -> &[Rgb] {
        self.renderer.frame()
    }

    /// Render the startup splash
    pub fn render_splash(&mut self) -> &[Rgb] {
        self.renderer
            .render_segment(self.startup.segment, self.startup.intensity)
    }

    /// Re-anchor idle time, e.g. once the device has finished booting
    pub fn restart_idle_clock(&mut self, now: Instant) {
        self.debouncer.restart_clock(now);
    }

    /// Run one poll cycle with one raw sample per channel
    ///
    /// Once shutdown has been reported, further calls change nothing and keep
    /// reporting shutdown.
    pub fn run_cycle(
        &mut self,
        samples: &[u16; CHANNELS],
        now: Instant,
    ) -> CycleReport<CHANNELS> {
        if self.power.mode() == PowerMode::Shutdown {
            return CycleReport {
                mode: PowerMode::Shutdown,
                state: *self.debouncer.state(),
                idle: self.debouncer.clock().idle(now),
                verdict: FrameVerdict::Discarded,
                outcome: CycleOutcome::Shutdown,
            };
        }

        let debounced = self.debouncer.update(&self.quantizer, samples, now);
        #[cfg(feature = "esp32-log")]
        if debounced.verdict == FrameVerdict::Discarded {
            println!("[Controller.run_cycle] ambiguous sample in {:?}, frame dropped", samples);
        }

        #[cfg(feature = "esp32-log")]
        let previous = self.power.mode();
        let mode = self.power.update(debounced.idle);
        #[cfg(feature = "esp32-log")]
        if previous != mode {
            println!(
                "[Controller.run_cycle] power mode {:?} -> {:?} after {}s idle",
                previous,
                mode,
                debounced.idle.as_secs()
            );
        }

        let outcome = match mode {
            PowerMode::Normal => {
                self.renderer.render_levels(&debounced.state);
                CycleOutcome::Continue
            }
            PowerMode::Standby => {
                self.renderer.render_standby(self.power.pulse().intensity());
                CycleOutcome::Continue
            }
            PowerMode::Shutdown => {
                self.renderer.render_dark();
                CycleOutcome::Shutdown
            }
        };

        CycleReport {
            mode,
            state: debounced.state,
            idle: debounced.idle,
            verdict: debounced.verdict,
            outcome,
        }
    }
}
