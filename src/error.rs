// 에러 타입
// 인사말 어댑터와 네이티브 라이브러리 로딩 실패를 표현

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GreetingError {
    /// 이름에 NUL 바이트가 포함되어 C 문자열로 넘길 수 없음
    #[error("name contains an interior NUL byte at position {position}")]
    InvalidName { position: usize },

    /// 네이티브 함수가 버퍼 대신 null을 반환
    #[error("foreign greeting call returned no buffer")]
    ForeignCallFailed,

    #[error("failed to load native library {path:?}: {reason}")]
    LibraryLoad { path: PathBuf, reason: String },

    #[error("native library does not export symbol '{symbol}': {reason}")]
    MissingSymbol { symbol: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GreetingError>;
