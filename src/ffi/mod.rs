// FFI (Foreign Function Interface) 모듈
// Host 애플리케이션에서 호출하는 C ABI 함수들

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{error, warn};

use crate::foreign::GreetingSource;
use crate::greetings::RustGreetings;
use types::ErrorCode;

#[cfg(unix)]
use crate::config::GreetingsConfig;
#[cfg(unix)]
use crate::foreign::DynamicGreetingSource;

/// Host에 넘겨주는 어댑터 핸들 (불투명 포인터)
pub struct GreetingsHandle {
    greeter: RustGreetings<Box<dyn GreetingSource + Send + Sync>>,
}

/// 로거 설치 (RUST_LOG)
#[no_mangle]
pub extern "C" fn greetings_init_logging() {
    crate::logging::init();
}

/// 어댑터 생성
/// - library_path: UTF-8 라이브러리 경로 (null이면 GREETINGS_LIBRARY 또는 기본값)
/// - out_handle: 핸들 (caller가 소유, greetings_destroy로 해제)
#[cfg(unix)]
#[no_mangle]
pub extern "C" fn greetings_create(
    library_path: *const c_char,
    out_handle: *mut *mut GreetingsHandle,
) -> i32 {
    if out_handle.is_null() {
        return ErrorCode::NullPointer as i32;
    }

    unsafe {
        *out_handle = std::ptr::null_mut();
    }

    let mut config = GreetingsConfig::from_env();
    if !library_path.is_null() {
        match unsafe { str_arg(library_path) } {
            Some(path) => config = config.with_library(path),
            None => return ErrorCode::InvalidParam as i32,
        }
    }

    open_handle(&config, out_handle)
}

/// 심볼 이름을 직접 지정하는 어댑터 생성
#[cfg(unix)]
#[no_mangle]
pub extern "C" fn greetings_create_with_symbols(
    library_path: *const c_char,
    greet_symbol: *const c_char,
    free_symbol: *const c_char,
    out_handle: *mut *mut GreetingsHandle,
) -> i32 {
    if library_path.is_null() || greet_symbol.is_null()
        || free_symbol.is_null() || out_handle.is_null()
    {
        return ErrorCode::NullPointer as i32;
    }

    unsafe {
        *out_handle = std::ptr::null_mut();

        let (path, greet, free) = match (
            str_arg(library_path),
            str_arg(greet_symbol),
            str_arg(free_symbol),
        ) {
            (Some(p), Some(g), Some(f)) => (p, g, f),
            _ => return ErrorCode::InvalidParam as i32,
        };

        let config = GreetingsConfig::default()
            .with_library(path)
            .with_symbols(greet, free);

        open_handle(&config, out_handle)
    }
}

/// 어댑터 파괴 (라이브러리 언로드)
#[no_mangle]
pub extern "C" fn greetings_destroy(handle: *mut GreetingsHandle) -> i32 {
    if handle.is_null() {
        return ErrorCode::NullPointer as i32;
    }

    unsafe {
        let _ = Box::from_raw(handle);
    }

    ErrorCode::Success as i32
}

/// 인사말 생성
/// - out_greeting: 성공 시 Rust 소유 문자열 (greetings_string_free로 해제), 실패 시 null
#[no_mangle]
pub extern "C" fn greetings_say_hello(
    handle: *const GreetingsHandle,
    name: *const c_char,
    out_greeting: *mut *mut c_char,
) -> i32 {
    if handle.is_null() || name.is_null() || out_greeting.is_null() {
        return ErrorCode::NullPointer as i32;
    }

    unsafe {
        *out_greeting = std::ptr::null_mut();

        let greeter = &(*handle).greeter;
        let name = match str_arg(name) {
            Some(s) => s,
            None => {
                warn!("greetings_say_hello: name is not valid UTF-8");
                return ErrorCode::InvalidParam as i32;
            }
        };

        let greeting = match greeter.say_hello(name) {
            Ok(g) => g,
            Err(e) => {
                error!("greetings_say_hello: {}", e);
                return ErrorCode::from(&e) as i32;
            }
        };

        // C 문자열에서 복사한 값이므로 NUL이 없음
        match CString::new(greeting) {
            Ok(c_string) => {
                *out_greeting = c_string.into_raw();
                ErrorCode::Success as i32
            }
            Err(_) => ErrorCode::Unknown as i32,
        }
    }
}

/// greetings_say_hello가 반환한 문자열 메모리 해제
#[no_mangle]
pub extern "C" fn greetings_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

#[cfg_attr(not(unix), allow(dead_code))]
pub(crate) fn into_handle<S>(source: S) -> *mut GreetingsHandle
where
    S: GreetingSource + Send + Sync + 'static,
{
    let handle = GreetingsHandle {
        greeter: RustGreetings::new(Box::new(source)),
    };
    Box::into_raw(Box::new(handle))
}

#[cfg(unix)]
fn open_handle(config: &GreetingsConfig, out_handle: *mut *mut GreetingsHandle) -> i32 {
    match DynamicGreetingSource::open(config) {
        Ok(source) => {
            unsafe {
                *out_handle = into_handle(source);
            }
            ErrorCode::Success as i32
        }
        Err(e) => {
            error!("greetings_create: {}", e);
            ErrorCode::from(&e) as i32
        }
    }
}

unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    CStr::from_ptr(ptr).to_str().ok()
}
