use grainfall_engine::World;

#[test]
fn perf_smoke_step() {
    let mut world = World::new(128, 64);
    world.enable_perf_metrics(true);
    for x in 0..128 {
        world.paint_with_radius(x, 8, 2, 1).unwrap(); // sand A
    }
    world.step();
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.cells_visited() + stats.cells_skipped(), 128 * 64);
    assert_eq!(stats.generation(), 1);
}

#[test]
fn perf_smoke_frame_records_render_time() {
    let mut world = World::new(96, 96);
    world.enable_perf_metrics(true);
    assert_eq!(world.frame(3.0), 3);
    let stats = world.get_perf_stats();
    assert!(stats.render_ms() >= 0.0);
    assert_eq!(stats.generation(), 3);
    assert_eq!(world.pixels_len(), 96 * 96 * 4);
}
