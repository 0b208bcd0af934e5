// 테스트용 GreetingSource
// libc malloc/free로 버퍼를 관리하고 produce/release 순서를 기록

use std::ffi::{c_char, c_int, c_void, CStr};
use std::ptr::{self, NonNull};
use std::sync::Mutex;

use super::GreetingSource;

type Reply = Box<dyn Fn(&str) -> Option<Vec<u8>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Produce(String),
    Release(String),
}

pub(crate) struct StubSource {
    reply: Reply,
    events: Mutex<Vec<Event>>,
}

impl StubSource {
    pub(crate) fn new<F>(reply: F) -> Self
    where
        F: Fn(&str) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(reply),
            events: Mutex::new(Vec::new()),
        }
    }

    /// 항상 같은 바이트열 반환
    pub(crate) fn fixed(bytes: &'static [u8]) -> Self {
        Self::new(move |_| Some(bytes.to_vec()))
    }

    /// 입력 이름을 장식해서 반환
    pub(crate) fn echo(prefix: &'static str) -> Self {
        Self::new(move |name| Some(format!("{prefix}{name}").into_bytes()))
    }

    /// 항상 null 반환
    pub(crate) fn absent() -> Self {
        Self::new(|_| None)
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn produce_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Produce(_)))
            .count()
    }

    pub(crate) fn release_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Release(_)))
            .count()
    }
}

unsafe impl GreetingSource for StubSource {
    fn produce(&self, name: &CStr) -> *mut c_char {
        let name = name.to_string_lossy().into_owned();
        let reply = (self.reply)(&name);
        self.events.lock().unwrap().push(Event::Produce(name));

        let Some(bytes) = reply else {
            return ptr::null_mut();
        };

        unsafe {
            let buf = libc::malloc(bytes.len() + 1) as *mut u8;
            if buf.is_null() {
                return ptr::null_mut();
            }
            ptr::copy_nonoverlapping(bytes.as_ptr(), buf, bytes.len());
            *buf.add(bytes.len()) = 0;
            buf as *mut c_char
        }
    }

    unsafe fn release(&self, buffer: NonNull<c_char>) {
        let raw = buffer.as_ptr();
        let content = CStr::from_ptr(raw).to_string_lossy().into_owned();

        // 해제 후 읽기가 있으면 드러나도록 내용을 덮어씀
        let len = libc::strlen(raw);
        libc::memset(raw as *mut c_void, b'#' as c_int, len);
        libc::free(raw as *mut c_void);

        self.events.lock().unwrap().push(Event::Release(content));
    }
}
