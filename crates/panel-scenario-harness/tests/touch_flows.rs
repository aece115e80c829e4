use panel_scenario_harness::ScenarioHarness;
use panel_ui::buffer::HeapAllocator;
use panel_ui::config::BoardConfig;
use panel_ui::input::{TouchSample, TouchState};
use panel_ui::ui::screen::READOUT_HINT;

fn booted() -> ScenarioHarness {
    let mut harness = ScenarioHarness::boot(BoardConfig::default(), HeapAllocator::new());
    harness.step();
    harness
}

#[test]
fn input_is_polled_once_per_iteration() {
    let mut harness = booted();
    let before = harness.touch().has_signal_calls();

    for i in 1..=6 {
        let report = harness.step();
        assert_eq!(report.ui.map(|ui| ui.input_reads), Some(1));
        assert_eq!(harness.touch().has_signal_calls(), before + i);
    }
}

#[test]
fn scripted_touch_reports_pressed_point() {
    let mut harness = booted();
    assert_eq!(harness.readout(), Some(READOUT_HINT));

    harness.press(120, 80);
    harness.step();

    let runtime = harness.runtime().expect("UI should be running");
    assert_eq!(runtime.last_input(), TouchSample::pressed(120, 80));
    assert_eq!(harness.readout(), Some("x=120 y=80"));
}

#[test]
fn press_repaints_only_the_readout() {
    let mut harness = booted();
    harness.panel_mut().clear_records();

    harness.press(300, 200);
    let report = harness.step().ui.expect("UI should be running");

    assert!(report.flushes > 0);
    let readout = harness
        .runtime()
        .map(|r| r.screen().readout_label().bounds())
        .expect("UI should be running");
    for blit in harness.panel().blits() {
        assert!(i32::from(blit.y) >= readout.top_left.y);
    }
}

#[test]
fn holding_still_causes_no_redraw() {
    let mut harness = booted();
    harness.press(50, 60);
    harness.step();
    harness.panel_mut().clear_records();

    let reports = harness.run(5);

    assert!(reports.iter().all(|r| r.ui.map(|ui| ui.flushes) == Some(0)));
    assert!(harness.panel().blits().is_empty());
}

#[test]
fn lost_signal_reports_released() {
    let mut harness = booted();
    harness.press(10, 20);
    harness.step();

    harness.lose_signal();
    for _ in 0..3 {
        harness.step();
        let last = harness.runtime().map(|r| r.last_input()).expect("running");
        assert_eq!(last.state, TouchState::Released);
    }
    // Read-out keeps the last pressed coordinates
    assert_eq!(harness.readout(), Some("x=10 y=20"));
}

#[test]
fn release_updates_activity_only_while_pressed() {
    let mut harness = booted();
    harness.press(1, 1);
    harness.step();
    let pressed_at = harness.runtime().map(|r| r.last_activity_ms()).expect("running");

    harness.release();
    harness.run(4);

    let runtime = harness.runtime().expect("running");
    assert_eq!(runtime.last_activity_ms(), pressed_at);
    assert!(runtime.tick_ms() > pressed_at);
    assert_eq!(runtime.last_input(), TouchSample::released(1, 1));
}
