// 런타임 로딩 네이티브 라이브러리 (dlopen/dlsym)
// rust_greeting / rust_greeting_free 심볼을 찾아 GreetingSource로 노출

use std::ffi::{c_char, c_void, CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use log::{debug, error, info};

use super::GreetingSource;
use crate::config::GreetingsConfig;
use crate::error::{GreetingError, Result};

type GreetFn = unsafe extern "C" fn(*const c_char) -> *mut c_char;
type FreeFn = unsafe extern "C" fn(*mut c_char);

pub struct DynamicGreetingSource {
    handle: *mut c_void,
    greet: GreetFn,
    free: FreeFn,
    path: PathBuf,
}

// 핸들은 Drop에서만 사용, 함수 포인터는 불변
unsafe impl Send for DynamicGreetingSource {}
unsafe impl Sync for DynamicGreetingSource {}

impl DynamicGreetingSource {
    /// 라이브러리 로드 + 두 심볼 해석
    pub fn open(config: &GreetingsConfig) -> Result<Self> {
        let path = config.library_path.clone();
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
            GreetingError::InvalidConfig(format!("library path {:?} contains a NUL byte", path))
        })?;
        let greet_symbol = symbol_name(&config.greet_symbol)?;
        let free_symbol = symbol_name(&config.free_symbol)?;

        let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        if handle.is_null() {
            let reason = last_dl_error();
            error!("DynamicGreetingSource: failed to load {:?}: {}", path, reason);
            return Err(GreetingError::LibraryLoad { path, reason });
        }

        let resolved = unsafe {
            resolve(handle, &greet_symbol).and_then(|greet| {
                resolve(handle, &free_symbol).map(|free| (greet, free))
            })
        };

        let (greet, free) = match resolved {
            Ok(pair) => pair,
            Err(e) => {
                unsafe { libc::dlclose(handle) };
                error!("DynamicGreetingSource: {}", e);
                return Err(e);
            }
        };

        info!(
            "DynamicGreetingSource: loaded {:?} ({} / {})",
            path, config.greet_symbol, config.free_symbol
        );

        Ok(Self {
            handle,
            greet: unsafe { std::mem::transmute::<*mut c_void, GreetFn>(greet) },
            free: unsafe { std::mem::transmute::<*mut c_void, FreeFn>(free) },
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

unsafe impl GreetingSource for DynamicGreetingSource {
    fn produce(&self, name: &CStr) -> *mut c_char {
        unsafe { (self.greet)(name.as_ptr()) }
    }

    unsafe fn release(&self, buffer: NonNull<c_char>) {
        (self.free)(buffer.as_ptr())
    }
}

impl Drop for DynamicGreetingSource {
    fn drop(&mut self) {
        debug!("DynamicGreetingSource: unloading {:?}", self.path);
        unsafe {
            libc::dlclose(self.handle);
        }
    }
}

fn symbol_name(symbol: &str) -> Result<CString> {
    CString::new(symbol).map_err(|_| {
        GreetingError::InvalidConfig(format!("symbol name {:?} contains a NUL byte", symbol))
    })
}

unsafe fn resolve(handle: *mut c_void, symbol: &CStr) -> Result<*mut c_void> {
    // 이전 에러 상태 초기화
    libc::dlerror();
    let ptr = libc::dlsym(handle, symbol.as_ptr());
    if ptr.is_null() {
        // dlerror가 null이면 심볼은 존재하지만 값이 null (호출 불가)
        let msg = libc::dlerror();
        let reason = if msg.is_null() {
            "symbol resolves to a null address".to_string()
        } else {
            CStr::from_ptr(msg).to_string_lossy().into_owned()
        };
        return Err(GreetingError::MissingSymbol {
            symbol: symbol.to_string_lossy().into_owned(),
            reason,
        });
    }
    Ok(ptr)
}

fn last_dl_error() -> String {
    unsafe {
        let msg = libc::dlerror();
        if msg.is_null() {
            "unknown dlopen error".to_string()
        } else {
            CStr::from_ptr(msg).to_string_lossy().into_owned()
        }
    }
}
