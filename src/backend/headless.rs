//! Backend adapter that doesn't interface with any OS functionality.
//!
//! Renders into the same software frame surface as the windowed adapter but
//! presents into memory, and polls events from a queue filled by the caller.
//! Meant for tests, CI and headless tools where no display is available.

use std::collections::VecDeque;

use vek::{Extent2, Vec2};

use super::{Backend, Phase};
use crate::{
    assets::AssetSource,
    audio::Audio,
    config::Config,
    draw::{Color, DrawCommand},
    error::{DrawError, InitError, PresentError},
    event::InputEvent,
    graphics::Graphics,
};

/// Display-less backend adapter.
pub struct HeadlessBackend {
    /// Frame surface and asset caches.
    graphics: Graphics,
    /// Sound playback, runs on the real audio device when one exists.
    audio: Audio,
    /// Position in the per-frame state machine.
    phase: Phase,
    /// Background color the surface is reset to each frame.
    background: Color,
    /// Events waiting to be polled.
    queue: VecDeque<InputEvent>,
    /// Snapshot of the most recently presented frame.
    last_frame: Option<Vec<u32>>,
    /// Window title, only stored.
    title: String,
}

impl HeadlessBackend {
    /// Queue an event to be returned by the next [`Backend::poll_events`] call.
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// The most recently presented frame as packed `0xAARRGGBB` pixels.
    ///
    /// `None` until the first `present`.
    pub fn last_frame(&self) -> Option<&[u32]> {
        self.last_frame.as_deref()
    }

    /// Sound playback component.
    pub fn audio(&mut self) -> &mut Audio {
        &mut self.audio
    }

    /// Where assets are loaded from.
    pub fn assets(&self) -> &AssetSource {
        &self.graphics.assets
    }

    /// Measure a string with a font asset, loading the font when needed.
    ///
    /// # Errors
    ///
    /// - When the font asset cannot be loaded.
    pub fn measure_text(&mut self, font: &str, text: &str) -> Result<Extent2<f32>, DrawError> {
        self.graphics.measure_text(font, text)
    }

    /// The stored window title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Backend for HeadlessBackend {
    fn new(config: &Config) -> Result<Self, InitError> {
        let size = Extent2::new(config.width, config.height);
        let graphics = Graphics::new(size, AssetSource::new(&config.asset_dir));

        log::debug!("Opening headless surface of {}x{} pixels", size.w, size.h);

        Ok(Self {
            graphics,
            audio: Audio::new(),
            phase: Phase::Ready,
            background: config.background_color,
            queue: VecDeque::new(),
            last_frame: None,
            title: config.title.clone(),
        })
    }

    fn size(&self) -> Extent2<u32> {
        self.graphics.canvas.size()
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.queue.drain(..).collect()
    }

    fn begin_frame(&mut self) -> Result<(), DrawError> {
        self.phase.begin()?;
        self.graphics.canvas.fill(self.background.to_pixel());

        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<(), DrawError> {
        self.phase.ensure_drawing()?;

        self.graphics.handle_command(command)
    }

    fn present(&mut self) -> Result<(), PresentError> {
        self.phase.finish()?;

        // Publishing is snapshotting the surface
        self.last_frame = Some(self.graphics.canvas.buffer().to_vec());

        Ok(())
    }

    fn shutdown(&mut self) {
        if self.phase == Phase::Shutdown {
            return;
        }

        log::debug!("Shutting down headless backend");

        self.audio.shutdown();
        self.graphics.release();
        self.last_frame = None;
        self.queue.clear();
        self.phase = Phase::Shutdown;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    fn resize(&mut self, size: Extent2<u32>) {
        self.graphics.resize(size);
    }

    fn set_viewport(&mut self, offset: Vec2<i32>, scale: f32) {
        self.graphics.viewport.set(offset, scale);
    }

    fn clear_viewport(&mut self) {
        self.graphics.viewport.clear();
    }
}
