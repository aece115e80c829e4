use panel_scenario_harness::ScenarioHarness;
use panel_ui::buffer::HeapAllocator;
use panel_ui::config::BoardConfig;

#[test]
fn home_screen_screenshot() {
    let mut harness = ScenarioHarness::boot(BoardConfig::default(), HeapAllocator::new());
    harness.step();
    harness.press(120, 80);
    harness.step();

    let path = std::env::temp_dir().join("panel-scenario-harness/home_touched.png");
    harness
        .save_screenshot_png(&path)
        .expect("Failed to save home screen screenshot");
    assert!(path.exists());
}
