//! Host commands received while the control loop is running.

use sprout::app::service::Controller;
use sprout::config::SystemConfig;

use crate::mock_hw::{MockBoard, RecordingDelay};

fn booted() -> (Controller, MockBoard, RecordingDelay) {
    let mut ctl = Controller::new(SystemConfig::default()).unwrap();
    let mut hw = MockBoard::with_host();
    let mut delay = RecordingDelay::default();
    ctl.power_on(&mut hw);
    ctl.run_boot(&mut hw, &mut delay);
    hw.clear_records();
    (ctl, hw, delay)
}

#[test]
fn one_line_per_tick() {
    let (mut ctl, mut hw, mut delay) = booted();
    hw.push_line("SET_AIR_HIGH:30");
    hw.push_line("SET_AIR_LOW:12");

    ctl.tick(&mut hw, &mut delay);
    assert_eq!(ctl.state().config.air_high_c, Some(30.0));
    assert_eq!(ctl.state().config.air_low_c, Some(16.0));

    ctl.tick(&mut hw, &mut delay);
    assert_eq!(ctl.state().config.air_low_c, Some(12.0));
}

#[test]
fn crlf_terminated_lines_accepted() {
    let (mut ctl, mut hw, mut delay) = booted();
    hw.push_line("SET_WATER_LOW:17.5\r");
    ctl.tick(&mut hw, &mut delay);
    assert_eq!(ctl.state().config.water_low_c, Some(17.5));
}

#[test]
fn overlong_line_dropped_next_line_applied() {
    let (mut ctl, mut hw, mut delay) = booted();
    hw.push_line(&format!("SET_PROGRAM:{}", "A".repeat(100)));
    hw.push_line("SET_FLOW_ON:5");

    ctl.tick(&mut hw, &mut delay);
    assert_eq!(ctl.state().config.program_name(), "BASIL");
    assert_eq!(ctl.state().config.flow_on_secs, Some(300));
}

#[test]
fn invalid_value_keeps_previous_one() {
    let (mut ctl, mut hw, mut delay) = booted();
    for line in ["SET_BLUE_LEVEL:-1", "SET_LIGHT_ON:25:00", "SET_FLOW_OFF:0", "SET_AIR_HIGH:hot"] {
        hw.push_line(line);
    }
    for _ in 0..4 {
        ctl.tick(&mut hw, &mut delay);
    }

    let cfg = &ctl.state().config;
    assert_eq!(cfg.blue_level, Some(60));
    assert_eq!(cfg.light_on_minute, Some(420));
    assert_eq!(cfg.flow_off_secs, Some(2700));
    assert_eq!(cfg.air_high_c, Some(28.0));
    // Nothing is echoed back for rejected lines.
    assert!(hw.sent.is_empty());
}

#[test]
fn new_program_name_goes_to_panel() {
    let (mut ctl, mut hw, mut delay) = booted();
    hw.push_line("SET_PROGRAM:A VERY LONG PROGRAM NAME");
    ctl.tick(&mut hw, &mut delay);

    assert_eq!(ctl.state().config.program_name(), "A VERY LONG PRO");
    assert_eq!(
        hw.texts(),
        [
            ("PROGRAM", sprout::drivers::lcd::DisplayLine::Top),
            ("A VERY LONG PRO", sprout::drivers::lcd::DisplayLine::Bottom),
        ]
    );
}

#[test]
fn set_time_moves_schedule() {
    let (mut ctl, mut hw, mut delay) = booted();
    // 2024-02-29 03:00:00: outside 07:00-19:00.
    hw.push_line("SET_TIME:1709175600");
    for _ in 0..10 {
        ctl.tick(&mut hw, &mut delay);
    }
    assert_eq!(hw.epoch, Some(1_709_175_600));
    assert!(!ctl.state().lighting.is_on());
}

#[test]
fn new_flow_times_apply_at_next_transition() {
    let (mut ctl, mut hw, mut delay) = booted();
    // First second: pump on for the booted 15 minutes.
    for _ in 0..10 {
        ctl.tick(&mut hw, &mut delay);
    }
    assert_eq!(ctl.state().irrigation.counter(), 900);

    hw.push_line("SET_FLOW_ON:1");
    for _ in 0..10 {
        ctl.tick(&mut hw, &mut delay);
    }
    // The running phase keeps counting down from the old length.
    assert_eq!(ctl.state().irrigation.counter(), 899);
    assert_eq!(ctl.state().config.flow_on_secs, Some(60));
}
