// 인사말 어댑터
// 네이티브 함수 호출 → 외부 버퍼를 String으로 복사 → 버퍼 해제

use std::ffi::CString;

use log::{debug, warn};

use crate::error::{GreetingError, Result};
use crate::foreign::{ForeignBuffer, GreetingSource};

#[cfg(unix)]
use crate::config::GreetingsConfig;
#[cfg(unix)]
use crate::foreign::DynamicGreetingSource;

pub struct RustGreetings<S> {
    source: S,
}

impl<S: GreetingSource> RustGreetings<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 이름에 대한 인사말 생성
    ///
    /// - 이름에 NUL 바이트가 있으면 `InvalidName` (네이티브 호출 없음)
    /// - 네이티브 함수가 null을 반환하면 `ForeignCallFailed` (해제 없음)
    /// - 그 외에는 버퍼를 복사한 뒤 정확히 한 번 해제
    pub fn say_hello(&self, to: &str) -> Result<String> {
        let name = CString::new(to).map_err(|e| GreetingError::InvalidName {
            position: e.nul_position(),
        })?;

        debug!("say_hello: calling native greeting ({} bytes)", to.len());
        let raw = self.source.produce(&name);

        let buffer = unsafe { ForeignBuffer::acquire(&self.source, raw) }.ok_or_else(|| {
            warn!("say_hello: native greeting returned null");
            GreetingError::ForeignCallFailed
        })?;

        Ok(buffer.into_string())
    }
}

#[cfg(unix)]
impl RustGreetings<DynamicGreetingSource> {
    /// 설정에 지정된 공유 라이브러리로 어댑터 생성
    pub fn open(config: &GreetingsConfig) -> Result<Self> {
        DynamicGreetingSource::open(config).map(Self::new)
    }
}
