// 네이티브 인사말 함수 계약
// produce(name) -> 버퍼 또는 null, release(버퍼)
// 반환된 버퍼는 ForeignBuffer가 소유하고 Drop에서 정확히 한 번 해제

#[cfg(unix)]
pub mod dynamic;
#[cfg(feature = "linked")]
pub mod linked;
#[cfg(test)]
pub(crate) mod stub;

#[cfg(unix)]
pub use dynamic::DynamicGreetingSource;
#[cfg(feature = "linked")]
pub use linked::LinkedGreetingSource;

use std::ffi::{c_char, CStr};
use std::ptr::NonNull;
use std::sync::Arc;

/// 인사말 문자열을 만들어 주는 외부(네이티브) 기능
///
/// # Safety
/// `produce`는 null 또는 NUL 종료 문자열 버퍼를 반환해야 하고,
/// 그 버퍼는 같은 source의 `release`가 호출될 때까지 유효해야 한다.
/// 어댑터는 이 계약을 믿고 버퍼를 읽으므로 구현은 `unsafe impl`이어야 한다.
///
/// ```
/// use std::ffi::{c_char, CStr};
/// use std::ptr::NonNull;
/// use rust_greetings::{GreetingError, GreetingSource, RustGreetings};
///
/// struct Unavailable;
///
/// // null만 반환하므로 계약을 만족
/// unsafe impl GreetingSource for Unavailable {
///     fn produce(&self, _name: &CStr) -> *mut c_char {
///         std::ptr::null_mut()
///     }
///
///     unsafe fn release(&self, _buffer: NonNull<c_char>) {}
/// }
///
/// let greetings = RustGreetings::new(Unavailable);
/// assert!(matches!(greetings.say_hello("Ferris"), Err(GreetingError::ForeignCallFailed)));
/// ```
///
/// 일반 `impl`은 컴파일되지 않음:
///
/// ```compile_fail
/// use std::ffi::{c_char, CStr};
/// use std::ptr::NonNull;
/// use rust_greetings::GreetingSource;
///
/// struct Dangling;
///
/// impl GreetingSource for Dangling {
///     fn produce(&self, _name: &CStr) -> *mut c_char {
///         NonNull::dangling().as_ptr()
///     }
///
///     unsafe fn release(&self, _buffer: NonNull<c_char>) {}
/// }
/// ```
pub unsafe trait GreetingSource {
    /// NUL 종료 문자열 버퍼를 반환. 실패 시 null
    fn produce(&self, name: &CStr) -> *mut c_char;

    /// produce가 반환한 버퍼 해제
    ///
    /// # Safety
    /// `buffer`는 같은 source의 `produce`가 반환한 값이어야 하며,
    /// 버퍼당 한 번만 호출해야 한다.
    unsafe fn release(&self, buffer: NonNull<c_char>);
}

unsafe impl<T: GreetingSource + ?Sized> GreetingSource for &T {
    fn produce(&self, name: &CStr) -> *mut c_char {
        (**self).produce(name)
    }

    unsafe fn release(&self, buffer: NonNull<c_char>) {
        (**self).release(buffer)
    }
}

unsafe impl<T: GreetingSource + ?Sized> GreetingSource for Box<T> {
    fn produce(&self, name: &CStr) -> *mut c_char {
        (**self).produce(name)
    }

    unsafe fn release(&self, buffer: NonNull<c_char>) {
        (**self).release(buffer)
    }
}

unsafe impl<T: GreetingSource + ?Sized> GreetingSource for Arc<T> {
    fn produce(&self, name: &CStr) -> *mut c_char {
        (**self).produce(name)
    }

    unsafe fn release(&self, buffer: NonNull<c_char>) {
        (**self).release(buffer)
    }
}

/// 외부 소유 버퍼 가드
/// 원시 포인터는 이 타입 밖으로 노출되지 않음
pub(crate) struct ForeignBuffer<'a, S: GreetingSource + ?Sized> {
    ptr: NonNull<c_char>,
    source: &'a S,
}

impl<'a, S: GreetingSource + ?Sized> ForeignBuffer<'a, S> {
    /// null이면 None (해제할 것이 없음)
    ///
    /// # Safety
    /// `ptr`은 `source.produce`가 방금 반환한 값이어야 하고,
    /// 다른 곳에서 해제되면 안 된다.
    pub(crate) unsafe fn acquire(source: &'a S, ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, source })
    }

    pub(crate) fn as_c_str(&self) -> &CStr {
        // acquire 계약상 유효한 NUL 종료 문자열
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    /// 내용 복사 (잘못된 UTF-8은 U+FFFD로 대체)
    pub(crate) fn to_string_lossy(&self) -> String {
        self.as_c_str().to_string_lossy().into_owned()
    }

    /// 복사 후 해제
    pub(crate) fn into_string(self) -> String {
        let copied = self.to_string_lossy();
        drop(self);
        copied
    }
}

impl<S: GreetingSource + ?Sized> Drop for ForeignBuffer<'_, S> {
    fn drop(&mut self) {
        unsafe { self.source.release(self.ptr) }
    }
}
