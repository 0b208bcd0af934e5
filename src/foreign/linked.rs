// 빌드 시점 링크 (feature = "linked")
// libgreetings가 링커 검색 경로에 있어야 함

use std::ffi::{c_char, CStr};
use std::ptr::NonNull;

use super::GreetingSource;

#[link(name = "greetings")]
extern "C" {
    fn rust_greeting(to: *const c_char) -> *mut c_char;
    fn rust_greeting_free(s: *mut c_char);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedGreetingSource;

unsafe impl GreetingSource for LinkedGreetingSource {
    fn produce(&self, name: &CStr) -> *mut c_char {
        unsafe { rust_greeting(name.as_ptr()) }
    }

    unsafe fn release(&self, buffer: NonNull<c_char>) {
        rust_greeting_free(buffer.as_ptr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_host_source<S: GreetingSource + Send + Sync + 'static>() {}

    // 링크 확인용: 네이티브 함수는 호출하지 않음
    #[test]
    fn test_linked_source_is_zero_sized_host_source() {
        assert_host_source::<LinkedGreetingSource>();
        assert_eq!(std::mem::size_of::<LinkedGreetingSource>(), 0);

        let source: Box<dyn GreetingSource + Send + Sync> = Box::new(LinkedGreetingSource);
        let greetings = crate::RustGreetings::new(source);
        let _ = greetings.source();
    }
}
