// Rust Greetings 어댑터
// 네이티브 인사말 라이브러리 호출 + 외부 버퍼 소유권 관리

pub mod config;
pub mod error;
pub mod ffi;
pub mod foreign;
pub mod greetings;
pub mod logging;

pub use config::GreetingsConfig;
pub use error::{GreetingError, Result};
pub use foreign::GreetingSource;
pub use greetings::RustGreetings;

// FFI 함수들을 최상위에서 재export
pub use ffi::*;
