//! Frame sources: a synthetic backdrop (default) or a real webcam
//! (feature = "camera").

use crate::error::CaptureError;
use crate::frame::{Bgr, Frame};

/// Anything that yields frames, one blocking read at a time.
///
/// An `Err` from `read` ends the run; sources are not retried.
pub trait FrameSource {
    fn read(&mut self) -> Result<Frame, CaptureError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> Result<Frame, CaptureError> { (**self).read() }
}

// ════════════════════════════════════════════════════════════════════════════
// SimFrameSource
// ════════════════════════════════════════════════════════════════════════════

/// Dark vertical gradient, identical every frame.
pub struct SimFrameSource {
    backdrop: Frame,
    served:   u64,
    limit:    Option<u64>,
}

impl SimFrameSource {
    pub fn new(width: usize, height: usize) -> Self {
        let mut backdrop = Frame::new(width, height);
        for y in 0..height {
            let shade = (24 + y * 40 / height.max(1)) as u8;
            backdrop.fill_rect(0, y as i32, width as i32 - 1, y as i32, Bgr(shade + 12, shade, shade));
        }
        SimFrameSource { backdrop, served: 0, limit: None }
    }

    /// Fail with [`CaptureError::Exhausted`] after `n` frames.
    pub fn with_limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn served(&self) -> u64 { self.served }
}

impl FrameSource for SimFrameSource {
    fn read(&mut self) -> Result<Frame, CaptureError> {
        if self.limit.is_some_and(|n| self.served >= n) {
            return Err(CaptureError::Exhausted);
        }
        self.served += 1;
        Ok(self.backdrop.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraSource — OpenCV VideoCapture (feature = "camera")
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "camera")]
pub use camera::CameraSource;

#[cfg(feature = "camera")]
mod camera {
    use opencv::core::{Mat, CV_8UC3};
    use opencv::prelude::*;
    use opencv::videoio::{VideoCapture, CAP_ANY, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH};
    use tracing::{info, warn};

    use super::FrameSource;
    use crate::error::CaptureError;
    use crate::frame::Frame;

    /// Default system camera, released on drop.
    pub struct CameraSource {
        capture: VideoCapture,
    }

    impl CameraSource {
        pub fn open(index: i32, width: usize, height: usize) -> Result<Self, CaptureError> {
            let open_err = |e: opencv::Error| CaptureError::Open(e.to_string());

            let mut capture = VideoCapture::new(index, CAP_ANY).map_err(open_err)?;
            if !capture.is_opened().map_err(open_err)? {
                return Err(CaptureError::Open(format!("camera {index} is not available")));
            }

            // Requests only; drivers may pick the nearest mode they support.
            capture.set(CAP_PROP_FRAME_WIDTH, width as f64).map_err(open_err)?;
            capture.set(CAP_PROP_FRAME_HEIGHT, height as f64).map_err(open_err)?;

            let actual_w = capture.get(CAP_PROP_FRAME_WIDTH).unwrap_or(0.0);
            let actual_h = capture.get(CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0);
            if actual_w as usize != width || actual_h as usize != height {
                warn!(requested = %format!("{width}x{height}"), actual = %format!("{actual_w}x{actual_h}"),
                      "camera did not accept requested resolution");
            }
            info!(index, "camera opened");

            Ok(CameraSource { capture })
        }
    }

    impl FrameSource for CameraSource {
        fn read(&mut self) -> Result<Frame, CaptureError> {
            let read_err = |e: opencv::Error| CaptureError::Read(e.to_string());

            let mut mat = Mat::default();
            let ok = self.capture.read(&mut mat).map_err(read_err)?;
            if !ok || mat.empty() {
                return Err(CaptureError::Read("empty frame".to_string()));
            }
            if mat.typ() != CV_8UC3 {
                return Err(CaptureError::Read(format!("unsupported pixel type {}", mat.typ())));
            }

            let (w, h) = (mat.cols() as usize, mat.rows() as usize);
            let mat = if mat.is_continuous() { mat } else { mat.try_clone().map_err(read_err)? };
            let data = mat.data_bytes().map_err(read_err)?.to_vec();
            Frame::from_bgr(w, h, data)
        }
    }

    impl Drop for CameraSource {
        fn drop(&mut self) {
            if let Err(e) = self.capture.release() {
                warn!(error = %e, "camera release failed");
            } else {
                info!("camera released");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_frames_have_requested_size() {
        let mut src = SimFrameSource::new(640, 480);
        let f = src.read().unwrap();
        assert_eq!((f.width(), f.height()), (640, 480));
        assert_eq!(src.served(), 1);
        // gradient: bottom row is brighter than top
        let top = f.pixel(0, 0).unwrap();
        let bottom = f.pixel(0, 479).unwrap();
        assert!(bottom.1 > top.1);
    }

    #[test]
    fn limit_ends_with_exhausted() {
        let mut src = SimFrameSource::new(8, 8).with_limit(2);
        assert!(src.read().is_ok());
        assert!(src.read().is_ok());
        assert!(matches!(src.read(), Err(CaptureError::Exhausted)));
        assert_eq!(src.served(), 2);
    }
}
