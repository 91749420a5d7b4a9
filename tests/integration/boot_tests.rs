//! Boot handshake: power-on state, connect animation, field acquisition.

use sprout::app::service::Controller;
use sprout::clock::CivilTime;
use sprout::config::SystemConfig;
use sprout::drivers::lcd::{ClockFormat, DisplayLine, Icon, IconLevel, IconSpeed};
use sprout::fsm::BootStage;

use crate::mock_hw::{DisplayCall, MockBoard, RecordingDelay, TEST_EPOCH, default_script};

fn controller() -> Controller {
    Controller::new(SystemConfig::default()).unwrap()
}

fn write_at(text: &str, line: DisplayLine, column: u8) -> DisplayCall {
    DisplayCall::WriteAt { text: text.to_string(), line, column }
}

// ── Power-on ──────────────────────────────────────────────────

#[test]
fn power_on_reports_safe_state() {
    let mut ctl = controller();
    let mut hw = MockBoard::new();
    ctl.power_on(&mut hw);

    assert_eq!(
        hw.telemetry(),
        ["INFO:LIGHT=OFF", "INFO:FAN=0", "INFO:HEAT=OFF", "INFO:FLOW=OFF"]
    );
    assert_eq!(
        hw.display_calls,
        [DisplayCall::Clear(DisplayLine::Both), DisplayCall::ClockFormat(ClockFormat::Eu)]
    );
}

// ── Connect stage ─────────────────────────────────────────────

#[test]
fn unanswered_host_is_asked_again() {
    let mut ctl = controller();
    let mut hw = MockBoard::new();
    let mut delay = RecordingDelay::default();
    ctl.power_on(&mut hw);
    hw.clear_records();

    for _ in 0..3 {
        assert!(!ctl.poll_boot(&mut hw, &mut delay));
    }

    assert_eq!(hw.requests(), ["INIT:GET_PROGRAM"; 3]);
    assert_eq!(ctl.boot_stage(), BootStage::Connect);
    // Start-up pause, prompt dwell, then one retry interval per dot.
    assert_eq!(delay.waits_ms, [2000, 2000, 100, 100]);
    assert_eq!(
        hw.display_calls,
        [
            write_at("INITIALIZING", DisplayLine::Top, 2),
            DisplayCall::Icon(Icon::Rec, IconLevel::High),
            DisplayCall::RecSpeed(IconSpeed::Medium),
            write_at("CONNECT HOST", DisplayLine::Bottom, 2),
            write_at(".", DisplayLine::Bottom, 0),
            DisplayCall::WriteAfter(".".to_string()),
            DisplayCall::WriteAfter(".".to_string()),
        ]
    );
}

#[test]
fn prompt_returns_once_line_is_full_of_dots() {
    let mut ctl = controller();
    let mut hw = MockBoard::new();
    let mut delay = RecordingDelay::default();

    // Prompt, sixteen appended dots, prompt again.
    for _ in 0..18 {
        ctl.poll_boot(&mut hw, &mut delay);
    }

    let prompts = hw
        .display_calls
        .iter()
        .filter(|c| **c == write_at("CONNECT HOST", DisplayLine::Bottom, 2))
        .count();
    let dots = hw
        .display_calls
        .iter()
        .filter(|c| matches!(c, DisplayCall::WriteAfter(_)))
        .count();
    assert_eq!(prompts, 2);
    assert_eq!(dots, 16);
}

// ── Full handshake ────────────────────────────────────────────

#[test]
fn scripted_host_completes_handshake_in_order() {
    let mut ctl = controller();
    let mut hw = MockBoard::with_host();
    let mut delay = RecordingDelay::default();
    ctl.power_on(&mut hw);
    ctl.run_boot(&mut hw, &mut delay);

    assert!(ctl.is_booted());
    assert_eq!(ctl.boot_stage(), BootStage::Complete);

    let expected: Vec<&str> = default_script().iter().map(|(req, _)| *req).collect();
    assert_eq!(hw.requests(), expected);

    let cfg = &ctl.state().config;
    assert!(cfg.is_complete());
    assert_eq!(cfg.program_name(), "BASIL");
    assert_eq!(cfg.light_window(), Some((420, 1140)));
    assert_eq!(cfg.flow_durations(), Some((900, 2700)));
    assert_eq!(cfg.light_levels(), Some((80, 20, 60)));
    assert_eq!(hw.epoch, Some(TEST_EPOCH));

    // The pump starts on the very first second of the loop.
    assert_eq!(ctl.state().irrigation.counter(), -1);
}

#[test]
fn completion_loads_and_shows_panel_clock() {
    let mut ctl = controller();
    let mut hw = MockBoard::with_host();
    let mut delay = RecordingDelay::default();
    ctl.run_boot(&mut hw, &mut delay);

    assert!(hw
        .display_calls
        .contains(&DisplayCall::SetClock(CivilTime::from_epoch(TEST_EPOCH))));
    assert!(hw.display_calls.contains(&DisplayCall::RecSpeed(IconSpeed::Stop)));
    assert_eq!(hw.display_calls.last(), Some(&DisplayCall::ShowClock));
    assert!(hw.texts().contains(&("BASIL", DisplayLine::Bottom)));
}

#[test]
fn fields_sent_ahead_skip_their_requests() {
    let mut ctl = controller();
    let mut hw = MockBoard::new();
    let mut delay = RecordingDelay::default();

    // The host dumps the whole program without waiting to be asked.
    for (_, line) in default_script().iter().rev() {
        hw.push_line(line);
    }

    assert!(!ctl.poll_boot(&mut hw, &mut delay));
    assert!(ctl.poll_boot(&mut hw, &mut delay));
    assert_eq!(hw.requests(), ["INIT:GET_PROGRAM"]);
}

#[test]
fn rejected_reply_keeps_stage_pending() {
    let mut ctl = controller();
    let mut hw = MockBoard::with_host();
    let mut delay = RecordingDelay::default();
    hw.reply("INIT:GET_RED_LEVEL", "SET_RED_LEVEL:101");

    for _ in 0..6 {
        ctl.poll_boot(&mut hw, &mut delay);
    }
    assert_eq!(ctl.boot_stage(), BootStage::RedLevel);
    assert_eq!(ctl.state().config.red_level, None);
    let red_requests = hw.requests().iter().filter(|r| **r == "INIT:GET_RED_LEVEL").count();
    assert_eq!(red_requests, 4);

    hw.reply("INIT:GET_RED_LEVEL", "SET_RED_LEVEL:100");
    ctl.run_boot(&mut hw, &mut delay);
    assert!(ctl.is_booted());
    assert_eq!(ctl.state().config.red_level, Some(100));
}

#[test]
fn noise_during_handshake_is_ignored() {
    let mut ctl = controller();
    let mut hw = MockBoard::with_host();
    let mut delay = RecordingDelay::default();
    hw.push_line("HELLO");
    hw.push_line("SET_FAN:50");
    hw.push_line(&"X".repeat(200));

    ctl.run_boot(&mut hw, &mut delay);
    assert!(ctl.is_booted());
    assert_eq!(hw.requests().len(), default_script().len());
}

#[test]
fn completed_boot_is_idempotent() {
    let mut ctl = controller();
    let mut hw = MockBoard::with_host();
    let mut delay = RecordingDelay::default();
    ctl.run_boot(&mut hw, &mut delay);
    hw.clear_records();

    assert!(ctl.poll_boot(&mut hw, &mut delay));
    assert!(hw.sent.is_empty());
    assert!(hw.display_calls.is_empty());
}
