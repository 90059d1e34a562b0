//! Minimal 2D arcade rendering and input layer behind a swappable backend.
//!
//! A game core talks to a [`Backend`] and never to a windowing or rendering
//! library directly. The trait covers the full per-frame cycle, polling
//! input, starting a frame, submitting [`DrawCommand`]s and presenting, plus
//! window management and a viewport transform for cameras.
//!
//! Two adapters are included:
//!
//! - [`WinitBackend`] opens a real window and presents the software-rendered
//!   frame surface to it, scaled to the window size.
//! - [`HeadlessBackend`] renders to memory only, for tests and CI where no
//!   display is available.
//!
//! Because both adapters rasterize through the same software surface, a scene
//! drawn headlessly is pixel-identical to the windowed one.
//!
//! # Example
//!
//! ```rust
//! use mini_arcade_backend::{
//!     Backend, Color, Config, DrawCommand, HeadlessBackend, InputEvent,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default().with_size(320, 240);
//! let mut backend = HeadlessBackend::new(&config)?;
//!
//! // A single frame of a tiny scene
//! for event in backend.poll_events() {
//!     if matches!(event, InputEvent::WindowClose) {
//!         backend.shutdown();
//!         return Ok(());
//!     }
//! }
//! backend.begin_frame()?;
//! backend.draw(&DrawCommand::rect(10.0, 10.0, 20.0, 20.0, Color::RED))?;
//! backend.present()?;
//!
//! backend.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! # Assets
//!
//! Sprites, fonts and sounds are addressed by dotted identifiers relative to
//! the configured asset directory, `"ui.cursor"` loads
//! `assets/ui/cursor.png`. Assets are loaded lazily on first use, cached for
//! the lifetime of the backend and released on shutdown.

pub mod assets;
pub mod audio;
pub mod backend;
pub mod canvas;
pub mod capture;
pub mod config;
pub mod draw;
pub mod error;
pub mod event;
pub mod viewport;

mod graphics;

pub use assets::LoadError;
pub use backend::{headless::HeadlessBackend, winit::WinitBackend, Backend};
pub use config::Config;
pub use draw::{Color, DrawCommand};
pub use error::{CaptureError, ConfigError, DrawError, InitError, PresentError};
pub use event::{InputEvent, Key, PointerButton};
