//! Behavioral contract of the backend trait, exercised on the headless
//! adapter so the suite runs without a display.

use std::{fs, path::PathBuf};

use vek::{Extent2, Vec2};

use mini_arcade_backend::{
    assets::LoadError, capture, Backend, Color, Config, DrawCommand, DrawError, HeadlessBackend,
    InputEvent, Key, PresentError,
};

/// Pixel of a presented frame at a coordinate.
fn pixel(frame: &[u32], width: u32, x: u32, y: u32) -> u32 {
    frame[(y * width + x) as usize]
}

/// Fresh asset directory under the system temporary directory.
fn temp_asset_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mini-arcade-backend-{test}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();

    dir
}

#[test]
fn frames_are_strictly_paired() {
    let mut backend = HeadlessBackend::new(&Config::default()).unwrap();

    // Presenting before any frame was begun is rejected
    assert!(matches!(
        backend.present(),
        Err(PresentError::FrameNotStarted)
    ));

    backend.begin_frame().unwrap();
    // Nesting frames is rejected and the active frame stays usable
    assert!(matches!(
        backend.begin_frame(),
        Err(DrawError::FrameInProgress)
    ));
    backend
        .draw(&DrawCommand::clear(Color::BLUE))
        .unwrap();
    backend.present().unwrap();

    // A full second cycle works
    backend.begin_frame().unwrap();
    backend.present().unwrap();
}

#[test]
fn draw_outside_a_frame_is_rejected() {
    let mut backend = HeadlessBackend::new(&Config::default()).unwrap();

    assert!(matches!(
        backend.draw(&DrawCommand::rect(0.0, 0.0, 1.0, 1.0, Color::RED)),
        Err(DrawError::FrameNotStarted)
    ));

    // Which also holds right after presenting
    backend.begin_frame().unwrap();
    backend.present().unwrap();
    assert!(matches!(
        backend.draw(&DrawCommand::rect(0.0, 0.0, 1.0, 1.0, Color::RED)),
        Err(DrawError::FrameNotStarted)
    ));
}

#[test]
fn shutdown_is_idempotent_and_terminal() {
    let mut backend = HeadlessBackend::new(&Config::default()).unwrap();
    backend.begin_frame().unwrap();
    backend.present().unwrap();

    backend.shutdown();
    // A second shutdown is a no-op
    backend.shutdown();

    assert!(matches!(backend.begin_frame(), Err(DrawError::ShutDown)));
    assert!(matches!(
        backend.draw(&DrawCommand::clear(Color::BLACK)),
        Err(DrawError::ShutDown)
    ));
    assert!(matches!(backend.present(), Err(PresentError::ShutDown)));
    assert!(backend.poll_events().is_empty());
    assert!(backend.last_frame().is_none());
}

#[test]
fn polling_an_empty_queue_returns_immediately() {
    let mut backend = HeadlessBackend::new(&Config::default()).unwrap();

    assert!(backend.poll_events().is_empty());

    backend.push_event(InputEvent::KeyDown {
        key: Key::Space,
        repeat: false,
    });
    backend.push_event(InputEvent::WindowClose);

    // Queued events come out once, in order
    let events = backend.poll_events();
    assert!(matches!(
        events[..],
        [
            InputEvent::KeyDown {
                key: Key::Space,
                repeat: false
            },
            InputEvent::WindowClose
        ]
    ));
    assert!(backend.poll_events().is_empty());
}

#[test]
fn red_rectangle_lands_on_the_frame() {
    // 640x480 with the default black background
    let config = Config::default().with_size(640, 480);
    let mut backend = HeadlessBackend::new(&config).unwrap();
    assert_eq!(backend.size(), Extent2::new(640, 480));

    backend.begin_frame().unwrap();
    backend
        .draw(&DrawCommand::rect(10.0, 10.0, 20.0, 20.0, Color::RED))
        .unwrap();
    backend.present().unwrap();

    let frame = backend.last_frame().unwrap();
    assert_eq!(frame.len(), 640 * 480);

    // Inside the rectangle
    assert_eq!(pixel(frame, 640, 10, 10), 0xFFFF0000);
    assert_eq!(pixel(frame, 640, 29, 29), 0xFFFF0000);
    // Just outside
    assert_eq!(pixel(frame, 640, 9, 9), 0xFF000000);
    assert_eq!(pixel(frame, 640, 30, 30), 0xFF000000);
}

#[test]
fn frame_resets_to_the_background_each_cycle() {
    let config = Config::default()
        .with_size(8, 8)
        .with_background_color(Color::BLUE);
    let mut backend = HeadlessBackend::new(&config).unwrap();

    backend.begin_frame().unwrap();
    backend
        .draw(&DrawCommand::rect(0.0, 0.0, 8.0, 8.0, Color::WHITE))
        .unwrap();
    backend.present().unwrap();

    // The next frame starts from the background again
    backend.begin_frame().unwrap();
    backend.present().unwrap();

    let frame = backend.last_frame().unwrap();
    assert!(frame.iter().all(|px| *px == 0xFF0000FF));
}

#[test]
fn missing_sprite_error_names_the_identifier() {
    let config = Config::default()
        .with_size(8, 8)
        .with_asset_dir(temp_asset_dir("missing"));
    let mut backend = HeadlessBackend::new(&config).unwrap();

    backend.begin_frame().unwrap();
    let error = backend
        .draw(&DrawCommand::sprite("missing.sprite", 0.0, 0.0))
        .unwrap_err();

    assert!(matches!(
        &error,
        DrawError::Asset {
            id,
            source: LoadError::Missing { .. }
        } if id == "missing.sprite"
    ));

    // A failed draw call doesn't abort the frame
    backend.present().unwrap();
}

#[test]
fn sprites_load_from_dotted_identifiers() {
    let dir = temp_asset_dir("sprites");
    fs::create_dir_all(dir.join("sprites")).unwrap();

    // A 2x2 opaque green block
    capture::save_png(
        &dir.join("sprites").join("block.png"),
        Extent2::new(2, 2),
        &[0xFF00FF00; 4],
    )
    .unwrap();

    let config = Config::default().with_size(8, 8).with_asset_dir(&dir);
    let mut backend = HeadlessBackend::new(&config).unwrap();

    backend.begin_frame().unwrap();
    backend
        .draw(&DrawCommand::sprite("sprites.block", 3.0, 3.0))
        .unwrap();
    backend.present().unwrap();

    let frame = backend.last_frame().unwrap();
    assert_eq!(pixel(frame, 8, 3, 3), 0xFF00FF00);
    assert_eq!(pixel(frame, 8, 4, 4), 0xFF00FF00);
    assert_eq!(pixel(frame, 8, 2, 2), 0xFF000000);
    assert_eq!(pixel(frame, 8, 5, 5), 0xFF000000);

    // Second use hits the cache
    backend.begin_frame().unwrap();
    backend
        .draw(&DrawCommand::sprite("sprites.block", 0.0, 0.0))
        .unwrap();
    backend.present().unwrap();

    let frame = backend.last_frame().unwrap();
    assert_eq!(pixel(frame, 8, 0, 0), 0xFF00FF00);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn text_draws_tinted_glyphs() {
    let dir = temp_asset_dir("fonts");
    fs::create_dir_all(dir.join("fonts")).unwrap();

    // Strip of two 2x2 glyphs covering 'A' and 'B', 'A' opaque and 'B' empty
    let mut strip = vec![0u32; 4 * 2];
    for y in 0..2 {
        for x in 0..2 {
            strip[y * 4 + x] = 0xFFFFFFFF;
        }
    }
    capture::save_png(
        &dir.join("fonts").join("tiny.png"),
        Extent2::new(4, 2),
        &strip,
    )
    .unwrap();
    fs::write(
        dir.join("fonts").join("tiny.toml"),
        "glyph_width = 2\nglyph_height = 2\nfirst_char = 65\nlast_char = 66\n",
    )
    .unwrap();

    let config = Config::default().with_size(8, 8).with_asset_dir(&dir);
    let mut backend = HeadlessBackend::new(&config).unwrap();

    assert_eq!(
        backend.measure_text("fonts.tiny", "AB").unwrap(),
        Extent2::new(4.0, 2.0)
    );

    backend.begin_frame().unwrap();
    backend
        .draw(&DrawCommand::text(
            "fonts.tiny",
            "AB",
            0.0,
            0.0,
            Color::RED,
        ))
        .unwrap();
    backend.present().unwrap();

    let frame = backend.last_frame().unwrap();
    // The 'A' glyph is tinted with the text color
    assert_eq!(pixel(frame, 8, 0, 0), 0xFFFF0000);
    assert_eq!(pixel(frame, 8, 1, 1), 0xFFFF0000);
    // The 'B' glyph is fully transparent, the background shows through
    assert_eq!(pixel(frame, 8, 2, 0), 0xFF000000);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn font_strip_shorter_than_its_metadata_is_rejected() {
    let dir = temp_asset_dir("short-font");
    fs::create_dir_all(dir.join("fonts")).unwrap();

    // The strip is one pixel tall while the metadata claims two
    capture::save_png(
        &dir.join("fonts").join("short.png"),
        Extent2::new(4, 1),
        &[0xFFFFFFFF; 4],
    )
    .unwrap();
    fs::write(
        dir.join("fonts").join("short.toml"),
        "glyph_width = 2\nglyph_height = 2\nfirst_char = 65\nlast_char = 66\n",
    )
    .unwrap();

    let config = Config::default().with_size(8, 8).with_asset_dir(&dir);
    let mut backend = HeadlessBackend::new(&config).unwrap();

    backend.begin_frame().unwrap();
    let error = backend
        .draw(&DrawCommand::text("fonts.short", "A", 0.0, 0.0, Color::RED))
        .unwrap_err();

    assert!(matches!(
        &error,
        DrawError::Asset {
            id,
            source: LoadError::Malformed { .. }
        } if id == "fonts.short"
    ));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn shutdown_in_the_middle_of_a_frame_releases_everything() {
    let mut backend = HeadlessBackend::new(&Config::default()).unwrap();
    backend.push_event(InputEvent::WindowClose);

    backend.begin_frame().unwrap();
    backend
        .draw(&DrawCommand::clear(Color::WHITE))
        .unwrap();
    backend.shutdown();

    assert!(backend.last_frame().is_none());
    assert!(backend.poll_events().is_empty());
    assert!(matches!(backend.begin_frame(), Err(DrawError::ShutDown)));
    assert!(matches!(backend.present(), Err(PresentError::ShutDown)));
}

#[test]
fn viewport_offsets_and_scales_geometry() {
    let config = Config::default().with_size(16, 16);
    let mut backend = HeadlessBackend::new(&config).unwrap();

    backend.set_viewport(Vec2::new(4, 0), 2.0);
    backend.begin_frame().unwrap();
    backend
        .draw(&DrawCommand::rect(1.0, 0.0, 2.0, 2.0, Color::WHITE))
        .unwrap();
    backend.present().unwrap();

    // Offset by 4 and scaled by 2, the rectangle covers x 6..10, y 0..4
    let frame = backend.last_frame().unwrap();
    assert_eq!(pixel(frame, 16, 6, 0), 0xFFFFFFFF);
    assert_eq!(pixel(frame, 16, 9, 3), 0xFFFFFFFF);
    assert_eq!(pixel(frame, 16, 5, 0), 0xFF000000);
    assert_eq!(pixel(frame, 16, 10, 0), 0xFF000000);

    // Clearing the transform brings geometry back to the origin
    backend.clear_viewport();
    backend.begin_frame().unwrap();
    backend
        .draw(&DrawCommand::rect(0.0, 0.0, 1.0, 1.0, Color::WHITE))
        .unwrap();
    backend.present().unwrap();

    let frame = backend.last_frame().unwrap();
    assert_eq!(pixel(frame, 16, 0, 0), 0xFFFFFFFF);
}

#[test]
fn resize_reallocates_the_surface() {
    let config = Config::default().with_size(8, 8);
    let mut backend = HeadlessBackend::new(&config).unwrap();

    backend.resize(Extent2::new(16, 4));
    assert_eq!(backend.size(), Extent2::new(16, 4));

    backend.begin_frame().unwrap();
    backend.present().unwrap();
    assert_eq!(backend.last_frame().unwrap().len(), 16 * 4);
}

#[test]
fn title_follows_configuration_and_updates() {
    let config = Config::default().with_title("Contract");
    let mut backend = HeadlessBackend::new(&config).unwrap();

    assert_eq!(backend.title(), "Contract");
    backend.set_title("Updated");
    assert_eq!(backend.title(), "Updated");
}
