use log::Level;
use panel_scenario_harness::log_capture::{captured, captured_at, start_capture};
use panel_scenario_harness::ScenarioHarness;
use panel_ui::buffer::{HeapAllocator, MemoryRegion};
use panel_ui::config::{BoardConfig, RenderMode};
use panel_ui::main_loop::IterationReport;
use panel_ui::test_display::TestPanel;
use panel_ui::mock_touch::ScriptedTouch;

#[test]
fn partial_boot_registers_forty_row_stripe() {
    let harness = ScenarioHarness::boot(BoardConfig::default(), HeapAllocator::new());

    let runtime = harness.runtime().expect("UI should be running");
    assert_eq!(runtime.draw_buffer_pixels(), 19_200);
    assert_eq!(runtime.draw_buffer_bytes(), 38_400);
    assert_eq!(harness.region(), Some(MemoryRegion::Internal));
}

#[test]
fn direct_boot_registers_full_frame() {
    let config = BoardConfig::default().with_render_mode(RenderMode::Direct);
    let harness = ScenarioHarness::boot(config, HeapAllocator::new());

    let runtime = harness.runtime().expect("UI should be running");
    assert_eq!(runtime.draw_buffer_pixels(), 480 * 480);
    assert_eq!(runtime.draw_buffer_bytes(), 460_800);
}

#[test]
fn internal_failure_falls_back_without_error() {
    start_capture();
    let heap = HeapAllocator::new().with_internal_budget(1024);
    let harness = ScenarioHarness::boot(BoardConfig::default(), heap);

    assert!(harness.is_running());
    assert_eq!(harness.region(), Some(MemoryRegion::Any));
    assert!(
        captured_at(Level::Error).is_empty(),
        "unexpected errors: {:?}",
        captured_at(Level::Error)
    );
    let failures: Vec<_> = captured()
        .into_iter()
        .filter(|r| r.message.to_lowercase().contains("fail"))
        .collect();
    assert!(failures.is_empty(), "failure reported: {:?}", failures);
}

#[test]
fn double_allocation_failure_leaves_ui_stopped() {
    start_capture();
    let mut harness = ScenarioHarness::boot(BoardConfig::default(), HeapAllocator::exhausted());

    assert!(!harness.is_running());
    assert_eq!(harness.region(), None);
    assert!(captured_at(Level::Error)
        .iter()
        .any(|r| r.message.contains("Draw buffer allocate failed")));

    for report in harness.run(10) {
        assert_eq!(report, IterationReport::default());
    }
    assert_eq!(harness.touch().has_signal_calls(), 0);
    assert!(harness.panel().blits().is_empty());
    assert_eq!(harness.panel().pushes(), 0);
}

#[test]
fn failed_panel_begin_is_logged_and_boot_continues() {
    start_capture();
    let mut harness = ScenarioHarness::boot_with(
        BoardConfig::default(),
        TestPanel::default_size().failing_begin(),
        ScriptedTouch::new(),
        HeapAllocator::new(),
    );

    assert!(captured()
        .iter()
        .any(|r| r.level == Level::Error && r.message.contains("Panel begin failed")));
    assert!(harness.is_running());
    assert!(harness.step().ui.is_some());
}

#[test]
fn first_iteration_paints_whole_screen_in_stripes() {
    let mut harness = ScenarioHarness::boot(BoardConfig::default(), HeapAllocator::new());

    let report = harness.step().ui.expect("UI should be running");
    assert_eq!(report.flushes, 12);
    let rows: u32 = harness.panel().blits().iter().map(|b| u32::from(b.h)).sum();
    assert_eq!(rows, 480);
    assert!(harness.panel().blits().iter().all(|b| b.w == 480 && b.x == 0));
    assert!(!harness.panel().lit_pixels().is_empty());

    harness.panel_mut().clear_records();
    let report = harness.step().ui.expect("UI should be running");
    assert_eq!(report.flushes, 0);
    assert!(harness.panel().blits().is_empty());
}
