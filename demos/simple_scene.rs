//! Open a window and draw a small scene until escape is pressed.
//!
//! Run with `cargo run --example simple-scene`.

use miette::{IntoDiagnostic, Result};
use mini_arcade_backend::{
    Backend, Color, Config, DrawCommand, InputEvent, Key, WinitBackend,
};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::default()
        .with_title("Simple scene")
        .with_size(640, 480)
        .with_frame_rate(60);
    let mut backend = WinitBackend::new(&config).into_diagnostic()?;

    let mut pointer = (0.0, 0.0);
    'game: loop {
        for event in backend.poll_events() {
            match event {
                InputEvent::WindowClose
                | InputEvent::Quit
                | InputEvent::KeyDown {
                    key: Key::Escape, ..
                } => break 'game,
                InputEvent::PointerMoved { position, .. } => {
                    pointer = (position.x, position.y);
                }
                _ => (),
            }
        }

        backend.begin_frame().into_diagnostic()?;
        backend
            .draw(&DrawCommand::rect(10.0, 10.0, 20.0, 20.0, Color::RED))
            .into_diagnostic()?;
        backend
            .draw(&DrawCommand::line(
                40.0,
                20.0,
                pointer.0,
                pointer.1,
                Color::WHITE,
            ))
            .into_diagnostic()?;
        backend.present().into_diagnostic()?;
    }

    backend.shutdown();

    Ok(())
}
