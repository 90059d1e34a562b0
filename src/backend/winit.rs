//! Windowed backend adapter on winit with a software-rendered surface.
//!
//! Draw commands are rasterized into the CPU frame surface, which is uploaded
//! and scaled to the window by the `pixels` crate on present. Native winit
//! events are translated one-to-one into the neutral event vocabulary,
//! everything without a neutral representation is dropped at trace level.

use std::{
    thread,
    time::{Duration, Instant},
};

use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use vek::{Extent2, Vec2};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, Ime, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    platform::pump_events::EventLoopExtPumpEvents,
    window::{Fullscreen, Window, WindowBuilder},
};

use super::{Backend, Phase};
use crate::{
    assets::AssetSource,
    audio::Audio,
    config::Config,
    draw::{Color, DrawCommand},
    error::{DrawError, InitError, PresentError},
    event::{InputEvent, Key, PointerButton},
    graphics::Graphics,
};

/// Backend adapter presenting to a winit window.
///
/// All operations must be called from the thread that created the adapter,
/// which on most platforms must be the main thread.
pub struct WinitBackend {
    /// Event loop the window lives on, pumped manually every poll.
    ///
    /// `None` after shutdown.
    event_loop: Option<EventLoop<()>>,
    /// Window and its presentation surface.
    ///
    /// `None` after shutdown.
    surface: Option<Surface>,
    /// Frame surface and asset caches.
    graphics: Graphics,
    /// Sound playback.
    audio: Audio,
    /// Position in the per-frame state machine.
    phase: Phase,
    /// Background color the surface is reset to each frame.
    background: Color,
    /// Bounds the blocking of `present`.
    limiter: FrameLimiter,
    /// Last known pointer position in logical surface pixels.
    cursor: Vec2<f32>,
    /// Physical size of the window surface, for mapping pointer coordinates.
    surface_size: Extent2<f32>,
    /// Whether at least one frame was presented since startup.
    presented: bool,
}

/// Window paired with its pixel surface.
///
/// The surface is declared first so it is dropped before the window it
/// borrows its display handle from.
struct Surface {
    /// GPU-scaled presentation of the CPU frame buffer.
    pixels: Pixels,
    /// The winit window.
    window: Window,
}

impl WinitBackend {
    /// The frame surface of the most recent presented frame.
    ///
    /// `None` until the first `present`, while a frame is being drawn, and
    /// after shutdown.
    pub fn last_frame(&self) -> Option<&[u32]> {
        (self.presented && self.phase == Phase::Ready).then(|| self.graphics.canvas.buffer())
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
}

impl Backend for WinitBackend {
    fn new(config: &Config) -> Result<Self, InitError> {
        let event_loop = EventLoop::new().map_err(|err| InitError::Display(Box::new(err)))?;

        let buffer_size = Extent2::new(config.width, config.height);
        let logical_size = LogicalSize::new(
            f64::from(config.width) * f64::from(config.scaling),
            f64::from(config.height) * f64::from(config.scaling),
        );

        // Don't allow the window to be smaller than the surface size
        let mut window_builder = WindowBuilder::new()
            .with_title(config.title.clone())
            .with_inner_size(logical_size)
            .with_min_inner_size(LogicalSize::new(
                f64::from(config.width),
                f64::from(config.height),
            ));
        if config.fullscreen {
            window_builder = window_builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = window_builder
            .build(&event_loop)
            .map_err(|err| InitError::Window(Box::new(err)))?;
        window.set_ime_allowed(true);

        let physical = window.inner_size();
        let pixels = {
            let surface_texture =
                SurfaceTexture::new(physical.width.max(1), physical.height.max(1), &window);
            PixelsBuilder::new(buffer_size.w, buffer_size.h, surface_texture)
                .clear_color(pixels::wgpu::Color::BLACK)
                .blend_state(pixels::wgpu::BlendState::REPLACE)
                .build()
        }
        .map_err(|err| InitError::Surface(Box::new(err)))?;

        log::debug!(
            "Opened window with a {}x{} surface at {}x{} physical pixels",
            buffer_size.w,
            buffer_size.h,
            physical.width,
            physical.height
        );

        Ok(Self {
            event_loop: Some(event_loop),
            surface: Some(Surface { pixels, window }),
            graphics: Graphics::new(buffer_size, AssetSource::new(&config.asset_dir)),
            audio: Audio::new(),
            phase: Phase::Ready,
            background: config.background_color,
            limiter: FrameLimiter::new(config.frame_rate),
            cursor: Vec2::zero(),
            surface_size: Extent2::new(physical.width.max(1) as f32, physical.height.max(1) as f32),
            presented: false,
        })
    }

    fn size(&self) -> Extent2<u32> {
        self.graphics.canvas.size()
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let (Some(event_loop), Some(surface)) = (&mut self.event_loop, &mut self.surface) else {
            return events;
        };
        let cursor = &mut self.cursor;
        let surface_size = &mut self.surface_size;
        let buffer_size = self.graphics.canvas.size().as_::<f32>();

        // Run a single non-blocking iteration of the native event loop
        let _status = event_loop.pump_events(Some(Duration::ZERO), |event, _elwt| {
            let Event::WindowEvent { event, .. } = event else {
                // Event loop bookkeeping, nothing to translate
                return;
            };

            match event {
                WindowEvent::KeyboardInput { event, .. } => {
                    let PhysicalKey::Code(code) = event.physical_key else {
                        log::trace!("Dropping unidentified key event");
                        return;
                    };
                    let Some(key) = translate_key(code) else {
                        log::trace!("Dropping unmapped key {code:?}");
                        return;
                    };

                    events.push(match event.state {
                        ElementState::Pressed => InputEvent::KeyDown {
                            key,
                            repeat: event.repeat,
                        },
                        ElementState::Released => InputEvent::KeyUp { key },
                    });
                }
                WindowEvent::CursorMoved { position, .. } => {
                    // Map physical window coordinates onto the frame surface
                    let position = Vec2::new(
                        position.x as f32 * buffer_size.w / surface_size.w,
                        position.y as f32 * buffer_size.h / surface_size.h,
                    );
                    let delta = position - *cursor;
                    *cursor = position;

                    events.push(InputEvent::PointerMoved { position, delta });
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    events.push(InputEvent::PointerButton {
                        button: translate_button(button),
                        pressed: state == ElementState::Pressed,
                        position: *cursor,
                    });
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    events.push(InputEvent::Wheel {
                        delta: match delta {
                            MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
                            MouseScrollDelta::PixelDelta(position) => {
                                Vec2::new(position.x as f32, position.y as f32)
                            }
                        },
                    });
                }
                WindowEvent::Ime(Ime::Commit(text)) => {
                    events.push(InputEvent::TextInput { text });
                }
                WindowEvent::Resized(new_size) => {
                    let (width, height) = (new_size.width.max(1), new_size.height.max(1));
                    *surface_size = Extent2::new(width as f32, height as f32);

                    if let Err(err) = surface.pixels.resize_surface(width, height) {
                        log::warn!("Error resizing render surface: {err}");
                    }

                    let logical: LogicalSize<u32> =
                        new_size.to_logical(surface.window.scale_factor());
                    events.push(InputEvent::WindowResized {
                        size: Extent2::new(logical.width, logical.height),
                    });
                }
                WindowEvent::CloseRequested => events.push(InputEvent::WindowClose),
                WindowEvent::Destroyed => events.push(InputEvent::Quit),
                other => log::trace!("Dropping unhandled window event {other:?}"),
            }
        });

        events
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

        let Some(surface) = &mut self.surface else {
            return Err(PresentError::ShutDown);
        };

        // Unpack the packed pixels into the RGBA byte frame of the surface
        for (target, source) in surface
            .pixels
            .frame_mut()
            .chunks_exact_mut(4)
            .zip(self.graphics.canvas.buffer())
        {
            target[0] = (source >> 16) as u8;
            target[1] = (source >> 8) as u8;
            target[2] = *source as u8;
            target[3] = (source >> 24) as u8;
        }

        surface
            .pixels
            .render()
            .map_err(|err| PresentError::Display(Box::new(err)))?;
        self.presented = true;

        // Bounded frame pacing
        self.limiter.wait();

        Ok(())
    }

    fn shutdown(&mut self) {
        if self.phase == Phase::Shutdown {
            return;
        }

        log::debug!("Shutting down window backend");

        self.audio.shutdown();
        self.graphics.release();
        self.presented = false;
        // Drop the surface before the window it was created from
        self.surface = None;
        self.event_loop = None;
        self.phase = Phase::Shutdown;
    }

    fn set_title(&mut self, title: &str) {
        if let Some(surface) = &self.surface {
            surface.window.set_title(title);
        }
    }

    fn resize(&mut self, size: Extent2<u32>) {
        self.graphics.resize(size);

        if let Some(surface) = &mut self.surface {
            if let Err(err) = surface.pixels.resize_buffer(size.w, size.h) {
                log::warn!("Error resizing frame buffer: {err}");
            }

            let _ = surface
                .window
                .request_inner_size(LogicalSize::new(f64::from(size.w), f64::from(size.h)));
        }
    }

    fn set_viewport(&mut self, offset: Vec2<i32>, scale: f32) {
        self.graphics.viewport.set(offset, scale);
    }

    fn clear_viewport(&mut self) {
        self.graphics.viewport.clear();
    }
}

/// Upper bound for the blocking of `present`.
///
/// Sleeps away the remainder of the frame interval, a slow frame never causes
/// a catch-up burst of shortened intervals afterwards.
struct FrameLimiter {
    /// Targeted duration of one frame, zero disables pacing.
    interval: Duration,
    /// When the next frame may be presented.
    deadline: Instant,
}

impl FrameLimiter {
    /// Create a limiter for a frame rate, `0` disables pacing.
    fn new(frame_rate: u32) -> Self {
        let interval = if frame_rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / f64::from(frame_rate))
        };

        Self {
            interval,
            deadline: Instant::now(),
        }
    }

    /// Sleep until the current frame interval has passed.
    fn wait(&mut self) {
        if self.interval.is_zero() {
            return;
        }

        let now = Instant::now();
        if let Some(remaining) = self.deadline.checked_duration_since(now) {
            thread::sleep(remaining);
        }

        self.deadline = (self.deadline + self.interval).max(now);
    }
}

/// Map a native key code to the neutral vocabulary.
///
/// Returns `None` for keys an arcade core has no use for, those events are
/// dropped by the caller.
fn translate_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::Digit0 => Key::Num0,
        KeyCode::Digit1 => Key::Num1,
        KeyCode::Digit2 => Key::Num2,
        KeyCode::Digit3 => Key::Num3,
        KeyCode::Digit4 => Key::Num4,
        KeyCode::Digit5 => Key::Num5,
        KeyCode::Digit6 => Key::Num6,
        KeyCode::Digit7 => Key::Num7,
        KeyCode::Digit8 => Key::Num8,
        KeyCode::Digit9 => Key::Num9,
        _ => return None,
    })
}

/// Map a native mouse button to the neutral vocabulary.
fn translate_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Back => PointerButton::Back,
        MouseButton::Forward => PointerButton::Forward,
        MouseButton::Other(index) => PointerButton::Other(index),
    }
}
