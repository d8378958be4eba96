//! Binding to the vendor SDK through the C-ABI shim in `shim/`.

use crate::engine::MrzEngine;
use crate::models::{DecodedImage, EngineResult};
use log::debug;
use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int, c_void};

// Mirrors mrzkit_result_t in shim/mrzkit_shim.h
#[repr(C)]
struct RawResult {
    code: c_int,
    phrase: *mut c_char,
    json: *mut c_char,
    num_zones: usize,
}

extern "C" {
    fn mrzkit_engine_init(json_config: *const c_char) -> RawResult;

    fn mrzkit_engine_process(
        image_type: c_int,
        data: *const c_void,
        width: usize,
        height: usize,
        stride: usize,
        exif_orientation: c_int,
    ) -> RawResult;

    fn mrzkit_engine_deinit() -> RawResult;

    fn mrzkit_engine_request_runtime_key(raw: c_int) -> RawResult;

    fn mrzkit_result_free(result: *mut RawResult);
}

/// The SDK engine. It is a process-wide singleton on the native side, so
/// this handle is neither `Send` nor `Sync`.
pub struct NativeEngine {
    _not_send: PhantomData<*const ()>,
}

impl NativeEngine {
    pub fn new() -> Self {
        NativeEngine {
            _not_send: PhantomData,
        }
    }
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MrzEngine for NativeEngine {
    fn init(&mut self, json_config: &str) -> EngineResult {
        let config = match CString::new(json_config) {
            Ok(config) => config,
            Err(_) => return EngineResult::bodyless(-1, "Configuration contains a NUL byte"),
        };
        unsafe { take(mrzkit_engine_init(config.as_ptr())) }
    }

    fn process(&mut self, image: &DecodedImage) -> EngineResult {
        debug!(
            "Native process: {} {}x{}",
            image.layout, image.width, image.height
        );
        unsafe {
            take(mrzkit_engine_process(
                image.layout.tag(),
                image.pixels.as_ptr() as *const c_void,
                image.width as usize,
                image.height as usize,
                image.stride_or_zero(),
                image.exif_orientation as c_int,
            ))
        }
    }

    fn deinit(&mut self) -> EngineResult {
        unsafe { take(mrzkit_engine_deinit()) }
    }

    fn request_runtime_license_key(&mut self, raw: bool) -> EngineResult {
        unsafe { take(mrzkit_engine_request_runtime_key(raw as c_int)) }
    }
}

/// Copy a shim result into owned Rust strings and free the native copy.
unsafe fn take(mut raw: RawResult) -> EngineResult {
    let result = EngineResult {
        code: raw.code,
        phrase: text(raw.phrase),
        json: text(raw.json),
        num_zones: raw.num_zones,
    };
    mrzkit_result_free(&mut raw);
    result
}

unsafe fn text(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}
