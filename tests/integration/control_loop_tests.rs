//! Running loop: timers, schedules, climate control and the front panel.

use sprout::app::service::Controller;
use sprout::config::SystemConfig;
use sprout::drivers::lcd::DisplayLine;
use sprout::error::SensorError;

use crate::mock_hw::{ActuatorCall, DisplayCall, MockBoard, RecordingDelay};

/// Ticks per second and per minute at the default 100 ms tick.
const SECOND: usize = 10;
const MINUTE: usize = 600;

/// Lit-window LED duties for the scripted program (80 / 20 / 60 %).
const LIT: (u8, u8, u8) = (204, 51, 153);

fn booted() -> (Controller, MockBoard, RecordingDelay) {
    let mut ctl = Controller::new(SystemConfig::default()).unwrap();
    let mut hw = MockBoard::with_host();
    let mut delay = RecordingDelay::default();
    ctl.power_on(&mut hw);
    ctl.run_boot(&mut hw, &mut delay);
    hw.clear_records();
    delay.waits_ms.clear();
    (ctl, hw, delay)
}

fn run(ctl: &mut Controller, hw: &mut MockBoard, delay: &mut RecordingDelay, ticks: usize) {
    for _ in 0..ticks {
        ctl.tick(hw, delay);
    }
}

fn fan_writes(hw: &MockBoard) -> Vec<u8> {
    hw.actuator_calls
        .iter()
        .filter_map(|c| match c {
            ActuatorCall::Fan(duty) => Some(*duty),
            _ => None,
        })
        .collect()
}

fn heater_writes(hw: &MockBoard) -> Vec<bool> {
    hw.actuator_calls
        .iter()
        .filter_map(|c| match c {
            ActuatorCall::Heater(on) => Some(*on),
            _ => None,
        })
        .collect()
}

// ── Timing ────────────────────────────────────────────────────

#[test]
fn every_tick_sleeps_one_tick_period() {
    let (mut ctl, mut hw, mut delay) = booted();
    run(&mut ctl, &mut hw, &mut delay, 25);
    assert_eq!(delay.waits_ms, vec![100; 25]);
}

#[test]
fn first_second_starts_pump_then_light() {
    let (mut ctl, mut hw, mut delay) = booted();

    run(&mut ctl, &mut hw, &mut delay, SECOND - 1);
    assert!(hw.actuator_calls.is_empty());

    run(&mut ctl, &mut hw, &mut delay, 1);
    assert_eq!(
        hw.actuator_calls,
        [ActuatorCall::Pump(true), ActuatorCall::Led { r: LIT.0, g: LIT.1, b: LIT.2 }]
    );
    assert_eq!(hw.telemetry(), ["INFO:FLOW=ON", "INFO:LIGHT=ON"]);
}

#[test]
fn pump_follows_duty_cycle() {
    let (mut ctl, mut hw, mut delay) = booted();

    // On at the first second, off after 900 more.
    run(&mut ctl, &mut hw, &mut delay, SECOND + 900 * SECOND - 1);
    assert_eq!(hw.pump_writes(), [true]);
    run(&mut ctl, &mut hw, &mut delay, 1);
    assert_eq!(hw.pump_writes(), [true, false]);
    assert_eq!(ctl.state().irrigation.counter(), -2700);
}

#[test]
fn light_stays_dark_outside_window() {
    let (mut ctl, mut hw, mut delay) = booted();
    // 2024-02-29 05:00:00
    hw.epoch = Some(1_709_182_800);

    run(&mut ctl, &mut hw, &mut delay, 5 * SECOND);
    assert_eq!(hw.last_led(), None);
    assert!(!ctl.state().lighting.is_on());
}

#[test]
fn light_switches_off_at_window_end() {
    let (mut ctl, mut hw, mut delay) = booted();
    run(&mut ctl, &mut hw, &mut delay, SECOND);
    assert_eq!(hw.last_led(), Some(LIT));

    // 2024-02-29 19:00:00
    hw.epoch = Some(1_709_233_200);
    run(&mut ctl, &mut hw, &mut delay, SECOND);
    assert_eq!(hw.last_led(), Some((0, 0, 0)));
    assert!(hw.telemetry().contains(&"INFO:LIGHT=OFF"));
}

// ── Minute refresh ────────────────────────────────────────────

#[test]
fn minute_refresh_reports_readings() {
    let (mut ctl, mut hw, mut delay) = booted();

    run(&mut ctl, &mut hw, &mut delay, MINUTE - 1);
    assert_eq!(hw.probe_reads, 0);

    run(&mut ctl, &mut hw, &mut delay, 1);
    assert_eq!(hw.probe_reads, 1);
    let telemetry = hw.telemetry();
    assert!(telemetry.ends_with(&["INFO:AIR_TEMP=24.00", "INFO:AIR_HUM=65.00", "INFO:WATER_TEMP=20.00"]));
}

#[test]
fn fan_cools_with_hysteresis() {
    let (mut ctl, mut hw, mut delay) = booted();

    hw.air_temperature = Ok(29.0);
    run(&mut ctl, &mut hw, &mut delay, MINUTE);
    assert_eq!(fan_writes(&hw), [255]);
    assert!(hw.telemetry().contains(&"INFO:FAN=100"));

    // Inside the band: hold.
    hw.air_temperature = Ok(27.5);
    run(&mut ctl, &mut hw, &mut delay, MINUTE);
    assert_eq!(fan_writes(&hw), [255]);

    hw.air_temperature = Ok(26.9);
    run(&mut ctl, &mut hw, &mut delay, MINUTE);
    assert_eq!(fan_writes(&hw), [255, 0]);
    assert!(hw.telemetry().contains(&"INFO:FAN=0"));
}

#[test]
fn heater_written_once_while_decision_holds() {
    let (mut ctl, mut hw, mut delay) = booted();

    hw.water_temperature = Ok(17.0);
    run(&mut ctl, &mut hw, &mut delay, 3 * MINUTE);
    assert_eq!(heater_writes(&hw), [true]);
    let heat_lines = hw.telemetry().iter().filter(|l| l.starts_with("INFO:HEAT")).count();
    assert_eq!(heat_lines, 1);

    hw.water_temperature = Ok(22.0);
    run(&mut ctl, &mut hw, &mut delay, MINUTE);
    assert_eq!(heater_writes(&hw), [true, false]);
}

#[test]
fn faulted_probe_is_reported_and_holds_effector() {
    let (mut ctl, mut hw, mut delay) = booted();

    hw.air_temperature = Err(SensorError::Disconnected);
    run(&mut ctl, &mut hw, &mut delay, MINUTE);
    assert!(hw.telemetry().contains(&"INFO:SENSOR_FAULT=AIR_TEMP"));
    assert!(fan_writes(&hw).is_empty());
}

// ── Front panel ───────────────────────────────────────────────

#[test]
fn right_button_inspects_without_telemetry() {
    let (mut ctl, mut hw, mut delay) = booted();
    run(&mut ctl, &mut hw, &mut delay, SECOND);
    hw.clear_records();

    hw.press(true, false);
    run(&mut ctl, &mut hw, &mut delay, 1);
    assert_eq!(hw.last_led(), Some((LIT.0, 255, LIT.2)));
    assert!(ctl.state().actuators.is_inspecting());

    // Holding does not rewrite.
    run(&mut ctl, &mut hw, &mut delay, 3);
    assert_eq!(hw.actuator_calls.len(), 1);

    hw.press(false, false);
    run(&mut ctl, &mut hw, &mut delay, 1);
    assert_eq!(hw.last_led(), Some(LIT));
    assert!(hw.telemetry().is_empty());
}

#[test]
fn both_buttons_cancel_inspection() {
    let (mut ctl, mut hw, mut delay) = booted();
    hw.press(true, false);
    run(&mut ctl, &mut hw, &mut delay, 1);
    assert!(ctl.state().actuators.is_inspecting());

    hw.press(true, true);
    run(&mut ctl, &mut hw, &mut delay, 1);
    assert!(!ctl.state().actuators.is_inspecting());
}

#[test]
fn schedule_waits_while_inspecting() {
    let (mut ctl, mut hw, mut delay) = booted();
    hw.press(true, false);
    run(&mut ctl, &mut hw, &mut delay, SECOND);
    assert!(!ctl.state().lighting.is_on());

    hw.press(false, false);
    run(&mut ctl, &mut hw, &mut delay, SECOND);
    assert!(ctl.state().lighting.is_on());
    assert_eq!(hw.last_led(), Some(LIT));
}

#[test]
fn left_button_rotates_pages_then_shows_clock() {
    let (mut ctl, mut hw, mut delay) = booted();
    run(&mut ctl, &mut hw, &mut delay, SECOND);
    hw.clear_records();

    hw.press(false, true);
    run(&mut ctl, &mut hw, &mut delay, 1);
    assert_eq!(hw.probe_reads, 1);
    assert!(ctl.state().rotation.is_active());
    hw.press(false, false);

    // Nine more seconds walk every page.
    run(&mut ctl, &mut hw, &mut delay, 9 * SECOND);
    assert_eq!(
        hw.texts(),
        [
            ("PROGRAM", DisplayLine::Top),
            ("BASIL", DisplayLine::Bottom),
            ("AIR TEMP", DisplayLine::Top),
            (" 24.0°C", DisplayLine::Bottom),
            ("AIR HUMIDITY", DisplayLine::Top),
            (" 65.0%", DisplayLine::Bottom),
            ("WATER TEMP", DisplayLine::Top),
            (" 20.0°C", DisplayLine::Bottom),
        ]
    );
    assert_eq!(hw.display_calls.last(), Some(&DisplayCall::ShowClock));
    assert!(!ctl.state().rotation.is_active());
}

#[test]
fn left_press_ignored_while_rotating() {
    let (mut ctl, mut hw, mut delay) = booted();
    hw.press(false, true);
    run(&mut ctl, &mut hw, &mut delay, 3);
    assert_eq!(hw.probe_reads, 1);
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn dark_program_entering_window_writes_nothing() {
    let (mut ctl, mut hw, mut delay) = booted();
    for line in ["SET_RED_LEVEL:0", "SET_GREEN_LEVEL:0", "SET_BLUE_LEVEL:0"] {
        hw.push_line(line);
    }

    // The lit side of the schedule asks for the power-on triple again.
    run(&mut ctl, &mut hw, &mut delay, SECOND);
    assert!(ctl.state().lighting.is_on());
    assert_eq!(hw.last_led(), None);
    assert!(!hw.telemetry().iter().any(|l| l.starts_with("INFO:LIGHT")));
}

#[test]
fn green_only_program_stays_reported_dark() {
    let (mut ctl, mut hw, mut delay) = booted();
    for line in ["SET_RED_LEVEL:0", "SET_GREEN_LEVEL:50", "SET_BLUE_LEVEL:0"] {
        hw.push_line(line);
    }

    run(&mut ctl, &mut hw, &mut delay, SECOND);
    assert_eq!(hw.last_led(), Some((0, 127, 0)));
    assert!(!hw.telemetry().iter().any(|l| l.starts_with("INFO:LIGHT")));
}

#[test]
fn garbage_line_changes_nothing() {
    let (mut ctl, mut hw, mut delay) = booted();
    let before = ctl.state().config.clone();

    hw.push_line("GARBAGE");
    run(&mut ctl, &mut hw, &mut delay, 1);

    assert_eq!(ctl.state().config, before);
    assert!(hw.sent.is_empty());
    assert!(hw.display_calls.is_empty());
}
