use capturevate::kernel::aggregator::Aggregator;
use capturevate::{recorder_fn, BuiltinRecorder, Config, DataRecord, Metric, PageEvent, StaticEnvironment, Viewport};

fn env() -> StaticEnvironment {
    StaticEnvironment::new("TestAgent/1.0", "/index.html")
}

fn load() -> PageEvent {
    PageEvent::Load { viewport: Viewport::new(1280.0, 720.0) }
}

fn aggregator(mut config: Config) -> Aggregator {
    Aggregator::from_config(&mut config, &env())
}

#[test]
fn test_page_clicks_counts_every_click() {
    let mut agg = aggregator(Config::default());
    assert!(!agg.record().contains("pageClicks"), "Key should not exist before the first click");

    for _ in 0..7 {
        agg.dispatch(&PageEvent::Click);
    }
    assert_eq!(agg.record().number("pageClicks"), Some(7.0));
}

#[test]
fn test_disabled_page_clicks_never_appears() {
    let mut agg = aggregator(Config::default().with_enabled("pageClicks", false));
    agg.dispatch(&load());
    for _ in 0..3 {
        agg.dispatch(&PageEvent::Click);
    }
    assert!(!agg.record().contains("pageClicks"));
    assert!(!agg.recorder_names().contains(&"pageClicks"));
}

#[test]
fn test_seconds_on_page_waits_for_load() {
    let mut agg = aggregator(Config::default());

    agg.dispatch(&PageEvent::SecondElapsed);
    assert!(!agg.record().contains("secondsOnPage"), "Ticks before load are ignored");

    agg.dispatch(&load());
    for expected in 1..=5 {
        agg.dispatch(&PageEvent::SecondElapsed);
        assert_eq!(agg.record().number("secondsOnPage"), Some(expected as f64));
    }
}

#[test]
fn test_mouse_distance_first_move_is_zero() {
    let mut agg = aggregator(Config::default());
    agg.dispatch(&load());

    agg.dispatch(&PageEvent::MouseMove { offset_x: 100.0, offset_y: 100.0 });
    assert_eq!(agg.record().number("mouseDistance"), Some(0.0));
    assert_eq!(agg.record().number("mouseXDistance"), Some(0.0));
    assert_eq!(agg.record().number("mouseYDistance"), Some(0.0));
}

#[test]
fn test_mouse_distance_accumulates_euclidean_path() {
    let mut agg = aggregator(Config::default());
    agg.dispatch(&load());

    let path = [(0.0, 0.0), (3.0, 4.0), (3.0, 10.0), (0.0, 6.0)];
    for (x, y) in path {
        agg.dispatch(&PageEvent::MouseMove { offset_x: x, offset_y: y });
    }

    // 5 + 6 + 5
    assert_eq!(agg.record().number("mouseDistance"), Some(16.0));
    assert_eq!(agg.record().number("mouseXDistance"), Some(6.0));
    assert_eq!(agg.record().number("mouseYDistance"), Some(14.0));
}

#[test]
fn test_mouse_moves_before_load_are_ignored() {
    let mut agg = aggregator(Config::default());
    agg.dispatch(&PageEvent::MouseMove { offset_x: 0.0, offset_y: 0.0 });
    assert!(!agg.record().contains("mouseDistance"));

    agg.dispatch(&load());
    // Seeded from the first post-load move, not the pre-load one.
    agg.dispatch(&PageEvent::MouseMove { offset_x: 50.0, offset_y: 0.0 });
    assert_eq!(agg.record().number("mouseDistance"), Some(0.0));
}

#[test]
fn test_scroll_distance_is_high_water_mark() {
    let mut agg = aggregator(Config::default());

    for top in [100.0, 400.0, 50.0, 300.0] {
        agg.dispatch(&PageEvent::Scroll { scroll_top: top });
    }
    // Sum of movement would be 100 + 300 + 350 + 250.
    assert_eq!(agg.record().number("scrollDistance"), Some(400.0));
}

#[test]
fn test_window_size_tracks_load_and_resize() {
    let mut agg = aggregator(Config::default());
    assert!(!agg.record().contains("windowWidth"));

    agg.dispatch(&load());
    assert_eq!(agg.record().number("windowWidth"), Some(1280.0));
    assert_eq!(agg.record().number("windowHeight"), Some(720.0));

    agg.dispatch(&PageEvent::Resize { viewport: Viewport::new(800.0, 600.0) });
    agg.dispatch(&PageEvent::Resize { viewport: Viewport::new(1024.0, 768.0) });
    assert_eq!(agg.record().number("windowWidth"), Some(1024.0));
    assert_eq!(agg.record().number("windowHeight"), Some(768.0));
}

#[test]
fn test_user_agent_recorded_synchronously() {
    let agg = aggregator(Config::default());
    assert_eq!(
        agg.record().get("userAgent"),
        Some(&Metric::Text("TestAgent/1.0".to_string()))
    );
}

#[test]
fn test_path_defaults_to_location_unless_seeded() {
    let agg = aggregator(Config::default());
    assert_eq!(agg.record().get("path").and_then(Metric::as_text), Some("/index.html"));

    let agg = aggregator(Config::default().with_data("path", "/custom"));
    assert_eq!(agg.record().get("path").and_then(Metric::as_text), Some("/custom"));
}

#[test]
fn test_custom_recorders_run_after_builtins() {
    let config = Config::default()
        .with_recorder("keyPresses", recorder_fn(|event: &PageEvent, record: &mut DataRecord| {
            if let PageEvent::Click = event {
                // Sees pageClicks already updated for this event.
                let clicks = record.number("pageClicks").unwrap_or(0.0);
                record.set("clicksSeenByCustom", clicks);
            }
        }))
        .with_enabled("userAgent", false);

    let mut agg = aggregator(config);
    assert_eq!(
        agg.recorder_names(),
        vec!["pageClicks", "secondsOnPage", "mouseDistance", "scrollDistance", "windowSize", "keyPresses"]
    );

    agg.dispatch(&PageEvent::Click);
    agg.dispatch(&PageEvent::Click);
    assert_eq!(agg.record().number("clicksSeenByCustom"), Some(2.0));
    assert!(!agg.record().contains("userAgent"));
}

#[test]
fn test_custom_recorder_runs_even_if_named_like_disabled_builtin() {
    let config = Config::default()
        .with_enabled("pageClicks", false)
        .with_recorder("pageClicks", recorder_fn(|event: &PageEvent, record: &mut DataRecord| {
            if let PageEvent::Click = event {
                record.add("pageClicks", 10.0);
            }
        }));

    let mut agg = aggregator(config);
    agg.dispatch(&PageEvent::Click);
    assert_eq!(agg.record().number("pageClicks"), Some(10.0));
}

#[test]
fn test_builtin_catalog_names_round_trip() {
    for builtin in BuiltinRecorder::ALL {
        assert_eq!(BuiltinRecorder::from_name(builtin.name()), Some(builtin));
    }
    assert_eq!(BuiltinRecorder::from_name("keyPresses"), None);
}
