//! The backend capability contract and its adapters.
//!
//! A backend owns the window, input and presentation resources of the game.
//! The core drives it in a loop of poll events, update, draw, present. Every
//! adapter follows the same state machine:
//!
//! ```text
//! Ready ──begin_frame──▶ Drawing ──present──▶ Ready
//!   │                                           │
//!   └────────────────shutdown◀──────────────────┘
//! ```
//!
//! `Shutdown` is terminal, a fresh adapter must be constructed afterwards.

pub mod headless;
pub mod winit;

use vek::{Extent2, Vec2};

use crate::{
    config::Config,
    draw::DrawCommand,
    error::{DrawError, InitError, PresentError},
    event::InputEvent,
};

/// How the game interfaces with the platform it runs on.
///
/// One adapter instance owns one window or surface, constructed by
/// [`Backend::new`] and torn down by [`Backend::shutdown`].
pub trait Backend {
    /// Open the window and presentation surface for the configuration.
    ///
    /// # Errors
    ///
    /// - When the environment cannot provide a display, window or surface.
    fn new(config: &Config) -> Result<Self, InitError>
    where
        Self: Sized;

    /// Logical size of the frame surface in pixels.
    fn size(&self) -> Extent2<u32>;

    /// Drain all native events queued since the last call, in arrival order.
    ///
    /// Never blocks, an empty vector means nothing was pending. Native events
    /// with no neutral representation are dropped, not surfaced.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Start drawing a new frame.
    ///
    /// The frame surface is reset to the configured background color.
    ///
    /// # Errors
    ///
    /// - When a frame is already in progress or the backend was shut down.
    fn begin_frame(&mut self) -> Result<(), DrawError>;

    /// Apply one draw command to the current frame surface.
    ///
    /// # Errors
    ///
    /// - When called outside a `begin_frame`/`present` pair.
    /// - When a referenced sprite or font asset cannot be loaded.
    fn draw(&mut self, command: &DrawCommand) -> Result<(), DrawError>;

    /// Finish the current frame and publish it to the display.
    ///
    /// Blocks at most for the remainder of the configured frame interval.
    ///
    /// # Errors
    ///
    /// - When no frame was begun or the backend was shut down.
    /// - When the display subsystem rejects the frame.
    fn present(&mut self) -> Result<(), PresentError>;

    /// Release the window and every backend-owned resource.
    ///
    /// Never fails and is idempotent, calling it twice is a no-op. Safe to
    /// call in the middle of a frame.
    fn shutdown(&mut self);

    /// Change the window title.
    fn set_title(&mut self, title: &str);

    /// Resize the logical frame surface, and the window along with it.
    ///
    /// The surface content is reset.
    fn resize(&mut self, size: Extent2<u32>);

    /// Set the viewport transform applied to all draw command geometry.
    fn set_viewport(&mut self, offset: Vec2<i32>, scale: f32);

    /// Reset the viewport transform to identity.
    fn clear_viewport(&mut self);
}

/// Position of an adapter in the per-frame state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Between frames, drawing is not allowed.
    Ready,
    /// Inside a `begin_frame`/`present` pair.
    Drawing,
    /// Terminal, all resources are released.
    Shutdown,
}

impl Phase {
    /// Transition into `Drawing`.
    pub(crate) fn begin(&mut self) -> Result<(), DrawError> {
        match self {
            Self::Ready => {
                *self = Self::Drawing;

                Ok(())
            }
            Self::Drawing => Err(DrawError::FrameInProgress),
            Self::Shutdown => Err(DrawError::ShutDown),
        }
    }

    /// Verify a draw call is allowed.
    pub(crate) fn ensure_drawing(self) -> Result<(), DrawError> {
        match self {
            Self::Drawing => Ok(()),
            Self::Ready => Err(DrawError::FrameNotStarted),
            Self::Shutdown => Err(DrawError::ShutDown),
        }
    }

    /// Transition out of `Drawing` for presenting the frame.
    pub(crate) fn finish(&mut self) -> Result<(), PresentError> {
        match self {
            Self::Drawing => {
                *self = Self::Ready;

                Ok(())
            }
            Self::Ready => Err(PresentError::FrameNotStarted),
            Self::Shutdown => Err(PresentError::ShutDown),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{DrawError, PresentError};

    use super::Phase;

    #[test]
    fn frame_cycle() {
        let mut phase = Phase::Ready;

        assert!(matches!(phase.ensure_drawing(), Err(DrawError::FrameNotStarted)));

        phase.begin().unwrap();
        phase.ensure_drawing().unwrap();
        assert!(matches!(phase.begin(), Err(DrawError::FrameInProgress)));

        phase.finish().unwrap();
        assert!(matches!(phase.finish(), Err(PresentError::FrameNotStarted)));
    }

    #[test]
    fn shutdown_is_terminal() {
        let mut phase = Phase::Shutdown;

        assert!(matches!(phase.begin(), Err(DrawError::ShutDown)));
        assert!(matches!(phase.ensure_drawing(), Err(DrawError::ShutDown)));
        assert!(matches!(phase.finish(), Err(PresentError::ShutDown)));
    }
}
