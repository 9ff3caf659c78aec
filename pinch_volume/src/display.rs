//! On-screen window using `minifb`, plus the [`Presenter`] seam the main
//! loop talks to.
//!
//! ## Keys
//!
//! | Key | Action |
//! |---|---|
//! | `Q` | Quit |
//! | mouse | Move the simulated hand (simulation mode) |
//! | `Up` / hold | Open the simulated pinch |
//! | `Down` / hold | Close the simulated pinch |
//! | `H` | Show / hide the simulated hand |

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};
use tracing::info;

use hand_landmarks::SimInput;

use crate::app::StopReason;
use crate::error::DisplayError;
use crate::frame::Frame;

/// Where annotated frames go, and where the quit signal comes from.
pub trait Presenter {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError>;
    /// Poll input once; `Some` ends the run.
    fn poll(&mut self) -> Option<StopReason>;
}

pub struct Display {
    window:       Window,
    buf:          Vec<u32>,
    sim_tx:       Option<Sender<SimInput>>,
    last_pointer: Option<(i32, i32)>,
}

impl Display {
    /// Open a window of the given size.  With `sim_tx`, window input also
    /// steers the simulated hand.
    pub fn new(
        title:  &str,
        width:  usize,
        height: usize,
        sim_tx: Option<Sender<SimInput>>,
    ) -> Result<Self, DisplayError> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| DisplayError::Window(e.to_string()))?;

        // Camera reads pace the loop; this only caps the simulated backdrop.
        window.limit_update_rate(Some(Duration::from_millis(16)));
        info!(title, width, height, "window opened");

        Ok(Display {
            window,
            buf: Vec::with_capacity(width * height),
            sim_tx,
            last_pointer: None,
        })
    }

    fn forward_sim_input(&mut self) {
        let Some(tx) = &self.sim_tx else { return };

        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) {
            let p = (x as i32, y as i32);
            if self.last_pointer != Some(p) {
                self.last_pointer = Some(p);
                let _ = tx.send(SimInput::Pointer { x: p.0, y: p.1 });
            }
        }
        if self.window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            let _ = tx.send(SimInput::Widen);
        }
        if self.window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            let _ = tx.send(SimInput::Narrow);
        }
        if self.window.is_key_pressed(Key::H, KeyRepeat::No) {
            let _ = tx.send(SimInput::ToggleHand);
        }
    }
}

impl Presenter for Display {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        frame.to_rgb_u32(&mut self.buf);
        self.window
            .update_with_buffer(&self.buf, frame.width(), frame.height())
            .map_err(|e| DisplayError::Window(e.to_string()))
    }

    fn poll(&mut self) -> Option<StopReason> {
        if !self.window.is_open() {
            return Some(StopReason::WindowClosed);
        }
        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            return Some(StopReason::QuitKey);
        }
        self.forward_sim_input();
        None
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        info!("window closed");
    }
}
