//! OS master volume of the default render endpoint.
//!
//! Windows only: `IAudioEndpointVolume` on the default console render
//! device, reached through COM.  On every other target [`EndpointVolume::open`]
//! fails with [`VolumeError::Unsupported`], which the app treats as fatal.

use crate::{VolumeError, VolumeRange, VolumeSink};

#[cfg(windows)]
mod imp {
    use tracing::{debug, info};
    use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
    use windows::Win32::Media::Audio::{eConsole, eRender, IMMDeviceEnumerator, MMDeviceEnumerator};
    use windows::Win32::System::Com::{
        CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_MULTITHREADED,
    };

    use crate::{VolumeError, VolumeRange};

    /// Pairs `CoInitializeEx` with `CoUninitialize` on this thread.
    struct ComGuard;

    impl ComGuard {
        fn init() -> Result<Self, VolumeError> {
            // S_FALSE (already initialised on this thread) still needs the
            // matching uninitialise.
            unsafe { CoInitializeEx(None, COINIT_MULTITHREADED).ok().map_err(acquire)? };
            Ok(ComGuard)
        }
    }

    impl Drop for ComGuard {
        fn drop(&mut self) {
            unsafe { CoUninitialize() };
        }
    }

    // Fields drop in order: `volume` is released before `_com` uninitialises.
    pub struct Endpoint {
        volume: IAudioEndpointVolume,
        range:  VolumeRange,
        _com:   ComGuard,
    }

    fn acquire(e: windows::core::Error) -> VolumeError {
        VolumeError::Acquire(e.to_string())
    }

    fn io(e: windows::core::Error) -> VolumeError {
        VolumeError::Io(e.to_string())
    }

    impl Endpoint {
        pub fn open() -> Result<Self, VolumeError> {
            let com = ComGuard::init()?;
            unsafe {
                let enumerator: IMMDeviceEnumerator =
                    CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL).map_err(acquire)?;
                let device = enumerator.GetDefaultAudioEndpoint(eRender, eConsole).map_err(acquire)?;
                let volume: IAudioEndpointVolume = device.Activate(CLSCTX_ALL, None).map_err(acquire)?;

                let (mut min_db, mut max_db, mut step_db) = (0.0f32, 0.0f32, 0.0f32);
                volume.GetVolumeRange(&mut min_db, &mut max_db, &mut step_db).map_err(acquire)?;
                info!(min_db, max_db, step_db, "default render endpoint opened");

                Ok(Endpoint { volume, range: VolumeRange::new(min_db, max_db), _com: com })
            }
        }

        pub fn range(&self) -> VolumeRange { self.range }

        pub fn get(&self) -> Result<f32, VolumeError> {
            unsafe { self.volume.GetMasterVolumeLevel().map_err(io) }
        }

        pub fn set(&mut self, db: f32) -> Result<(), VolumeError> {
            let db = self.range.clamp(db);
            debug!(db, "endpoint master volume");
            unsafe { self.volume.SetMasterVolumeLevel(db, std::ptr::null()).map_err(io) }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use windows::Win32::System::Com::COINIT_APARTMENTTHREADED;

        #[test]
        fn com_is_uninitialised_after_drop() {
            // Works with or without an audio device: both paths drop the guard.
            drop(Endpoint::open());
            // Still in the MTA, this would fail with RPC_E_CHANGED_MODE.
            let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
            assert!(hr.is_ok(), "COM left initialised: {hr:?}");
            unsafe { CoUninitialize() };
        }
    }
}

pub struct EndpointVolume {
    #[cfg(windows)]
    inner: imp::Endpoint,
}

impl EndpointVolume {
    #[cfg(windows)]
    pub fn open() -> Result<Self, VolumeError> {
        Ok(EndpointVolume { inner: imp::Endpoint::open()? })
    }

    #[cfg(not(windows))]
    pub fn open() -> Result<Self, VolumeError> {
        Err(VolumeError::Unsupported("endpoint"))
    }
}

#[cfg(windows)]
impl VolumeSink for EndpointVolume {
    fn get_volume(&self) -> Result<f32, VolumeError> { self.inner.get() }
    fn set_volume(&mut self, db: f32) -> Result<(), VolumeError> { self.inner.set(db) }
    fn range(&self) -> VolumeRange { self.inner.range() }
    fn name(&self) -> &str { "endpoint" }
}

// Never constructed off Windows; the impl keeps `open()` type-uniform.
#[cfg(not(windows))]
impl VolumeSink for EndpointVolume {
    fn get_volume(&self) -> Result<f32, VolumeError> { Err(VolumeError::Unsupported("endpoint")) }
    fn set_volume(&mut self, _db: f32) -> Result<(), VolumeError> { Err(VolumeError::Unsupported("endpoint")) }
    fn range(&self) -> VolumeRange { VolumeRange::new(0.0, 0.0) }
    fn name(&self) -> &str { "endpoint" }
}
