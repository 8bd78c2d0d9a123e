mod common;

mod tests {
    use standby_lamp_controller::color::scale_color;
    use standby_lamp_controller::config::REFERENCE_SEGMENTS;
    use standby_lamp_controller::{
        CycleOutcome, Duration, FrameVerdict, Instant, Level, PowerMode,
    };

    use super::common::{BLACK, BOTTOM, GAP, GREEN, LOWER, TOP, UPPER, reference_controller};

    const CYCLE_MS: u64 = 100;

    #[test]
    fn test_idle_inputs_walk_to_shutdown() {
        let mut controller = reference_controller(Instant::from_millis(0));
        let samples = [TOP; 5];

        let mut standby_at = None;
        let mut shutdown_at = None;
        for cycle in 0..=4_100 {
            let now = Instant::from_millis(cycle * CYCLE_MS);
            let report = controller.run_cycle(&samples, now);
            assert_eq!(report.state, [Level::new(3); 5]);

            if report.mode == PowerMode::Standby && standby_at.is_none() {
                standby_at = Some(now);
            }
            if report.outcome == CycleOutcome::Shutdown {
                shutdown_at = Some(now);
                break;
            }
        }

        assert_eq!(standby_at, Some(Instant::from_secs(300)));
        assert_eq!(shutdown_at, Some(Instant::from_secs(400)));
        assert!(controller.frame().iter().all(|&led| led == BLACK));
    }

    #[test]
    fn test_mode_is_normal_just_before_standby() {
        let mut controller = reference_controller(Instant::from_millis(0));
        let report = controller.run_cycle(&[TOP; 5], Instant::from_millis(299_900));
        assert_eq!(report.mode, PowerMode::Normal);
        assert_eq!(report.idle, Duration::from_millis(299_900));
    }

    #[test]
    fn test_cycles_after_shutdown_change_nothing() {
        let mut controller = reference_controller(Instant::from_millis(0));
        let report = controller.run_cycle(&[BOTTOM; 5], Instant::from_secs(400));
        assert_eq!(report.outcome, CycleOutcome::Shutdown);

        let report = controller.run_cycle(&[TOP; 5], Instant::from_secs(401));
        assert_eq!(report.outcome, CycleOutcome::Shutdown);
        assert_eq!(controller.state(), &[Level::new(0); 5]);
        assert_eq!(controller.last_changed(), Instant::from_millis(0));
        assert!(controller.frame().iter().all(|&led| led == BLACK));
    }

    #[test]
    fn test_oscillating_input_stays_normal() {
        let mut controller = reference_controller(Instant::from_millis(0));

        for cycle in 0..10_000 {
            let now = Instant::from_millis(cycle * CYCLE_MS);
            let first = if cycle % 2 == 0 { TOP } else { UPPER };
            let report = controller.run_cycle(&[first, LOWER, LOWER, LOWER, LOWER], now);

            assert_eq!(report.verdict, FrameVerdict::Changed);
            assert_eq!(report.mode, PowerMode::Normal);
            assert_eq!(controller.last_changed(), now);
        }
    }

    #[test]
    fn test_gap_input_keeps_state_and_accumulates_idle() {
        let mut controller = reference_controller(Instant::from_millis(0));
        controller.run_cycle(&[UPPER; 5], Instant::from_millis(0));
        let state = *controller.state();

        for cycle in 1..=50 {
            let now = Instant::from_millis(cycle * CYCLE_MS);
            let report = controller.run_cycle(&[UPPER, UPPER, GAP, UPPER, UPPER], now);

            assert_eq!(report.verdict, FrameVerdict::Discarded);
            assert_eq!(report.state, state);
            assert_eq!(report.idle, Duration::from_millis(cycle * CYCLE_MS));
            assert_eq!(controller.last_changed(), Instant::from_millis(0));
        }

        let report = controller.run_cycle(&[GAP; 5], Instant::from_secs(300));
        assert_eq!(report.mode, PowerMode::Standby);
    }

    #[test]
    fn test_normal_mode_renders_levels() {
        let mut controller = reference_controller(Instant::from_millis(0));
        controller.run_cycle(&[BOTTOM, LOWER, UPPER, TOP, BOTTOM], Instant::from_millis(0));

        let frame = controller.frame();
        assert_eq!(frame[0], scale_color(REFERENCE_SEGMENTS[0].color, 0.3));
        assert_eq!(frame[6], scale_color(REFERENCE_SEGMENTS[1].color, 0.1));
        assert_eq!(frame[13], scale_color(REFERENCE_SEGMENTS[2].color, 0.02));
        assert_eq!(frame[20], BLACK);
        assert_eq!(frame[33], scale_color(REFERENCE_SEGMENTS[4].color, 0.3));
    }

    #[test]
    fn test_top_band_turns_lamp_off() {
        let mut controller = reference_controller(Instant::from_millis(0));
        let samples = [TOP, BOTTOM, BOTTOM, BOTTOM, BOTTOM];
        let report = controller.run_cycle(&samples, Instant::from_millis(0));
        assert_eq!(report.state[0], Level::new(3));

        let frame = controller.frame();
        assert!(frame[..6].iter().all(|&led| led == BLACK));
        assert!(frame[6..].iter().all(|&led| led != BLACK));
    }

    #[test]
    fn test_standby_pulses_first_segment_and_freezes_rest() {
        let mut controller = reference_controller(Instant::from_millis(0));
        controller.run_cycle(&[TOP; 5], Instant::from_millis(0));
        let normal = controller.frame().to_vec();

        // Inputs turn ambiguous: they must not disturb the frozen segments.
        for step in 0..20_u64 {
            let now = Instant::from_millis(300_000 + step * CYCLE_MS);
            let report = controller.run_cycle(&[GAP; 5], now);
            assert_eq!(report.mode, PowerMode::Standby);

            let pulse = scale_color(GREEN, controller.pulse_value() / 100.0);
            let frame = controller.frame();
            assert!(frame[..6].iter().all(|&led| led == pulse));
            assert_eq!(&frame[6..], &normal[6..]);
        }
    }

    #[test]
    fn test_activity_leaves_standby() {
        let mut controller = reference_controller(Instant::from_millis(0));
        controller.run_cycle(&[TOP; 5], Instant::from_millis(0));

        let report = controller.run_cycle(&[TOP; 5], Instant::from_secs(310));
        assert_eq!(report.mode, PowerMode::Standby);

        let report = controller.run_cycle(&[BOTTOM, TOP, TOP, TOP, TOP], Instant::from_secs(311));
        assert_eq!(report.mode, PowerMode::Normal);
        assert_eq!(report.idle, Duration::from_secs(0));
        assert_eq!(
            controller.frame()[0],
            scale_color(REFERENCE_SEGMENTS[0].color, 0.3)
        );
    }
}
