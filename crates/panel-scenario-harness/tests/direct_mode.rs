use panel_scenario_harness::ScenarioHarness;
use panel_ui::buffer::HeapAllocator;
use panel_ui::config::{BoardConfig, FramePush, RenderMode};

fn direct(push: FramePush) -> ScenarioHarness {
    let config = BoardConfig::default()
        .with_render_mode(RenderMode::Direct)
        .with_frame_push(push);
    ScenarioHarness::boot(config, HeapAllocator::new())
}

#[test]
fn one_full_frame_push_per_iteration() {
    let mut harness = direct(FramePush::Panel);

    for expected in 1..=5 {
        let report = harness.step();
        assert!(report.frame_pushed);
        assert_eq!(harness.panel().pushes(), expected);
    }
    assert!(harness.panel().blits().is_empty());
}

#[test]
fn push_follows_ui_processing() {
    let mut harness = direct(FramePush::Panel);
    harness.step();

    harness.press(240, 240);
    harness.step();

    let frame = harness
        .main_loop()
        .bridge()
        .frame()
        .expect("UI should be running")
        .to_vec();
    assert_eq!(harness.readout(), Some("x=240 y=240"));
    assert_eq!(harness.panel().pixels(), frame.as_slice());
}

#[test]
fn blit_strategy_copies_whole_frame_each_iteration() {
    let mut harness = direct(FramePush::Blit);

    harness.run(3);

    let blits = harness.panel().blits();
    assert_eq!(blits.len(), 3);
    assert!(blits.iter().all(|b| (b.x, b.y, b.w, b.h) == (0, 0, 480, 480)));
    assert_eq!(harness.panel().pushes(), 0);
}

#[test]
fn no_push_without_draw_buffer() {
    let config = BoardConfig::default().with_render_mode(RenderMode::Direct);
    let mut harness = ScenarioHarness::boot(config, HeapAllocator::exhausted());

    assert!(harness.run(3).iter().all(|r| !r.frame_pushed));
    assert_eq!(harness.panel().pushes(), 0);
}
