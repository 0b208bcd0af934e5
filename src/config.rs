// 네이티브 인사말 라이브러리 설정
// 라이브러리 경로와 심볼 이름 (환경 변수로 덮어쓰기 가능)

use std::env;
use std::path::PathBuf;

pub const ENV_LIBRARY: &str = "GREETINGS_LIBRARY";
pub const ENV_GREET_SYMBOL: &str = "GREETINGS_GREET_SYMBOL";
pub const ENV_FREE_SYMBOL: &str = "GREETINGS_FREE_SYMBOL";

pub const DEFAULT_GREET_SYMBOL: &str = "rust_greeting";
pub const DEFAULT_FREE_SYMBOL: &str = "rust_greeting_free";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingsConfig {
    pub library_path: PathBuf,
    pub greet_symbol: String,
    pub free_symbol: String,
}

impl Default for GreetingsConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(default_library_name()),
            greet_symbol: DEFAULT_GREET_SYMBOL.to_string(),
            free_symbol: DEFAULT_FREE_SYMBOL.to_string(),
        }
    }
}

impl GreetingsConfig {
    /// 프로세스 환경 변수에서 설정 읽기
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정 구성 (비어있는 값은 무시)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_LIBRARY) {
            config.library_path = PathBuf::from(path);
        }
        if let Some(symbol) = get(ENV_GREET_SYMBOL) {
            config.greet_symbol = symbol;
        }
        if let Some(symbol) = get(ENV_FREE_SYMBOL) {
            config.free_symbol = symbol;
        }

        config
    }

    pub fn with_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = path.into();
        self
    }

    pub fn with_symbols(mut self, greet: impl Into<String>, free: impl Into<String>) -> Self {
        self.greet_symbol = greet.into();
        self.free_symbol = free.into();
        self
    }
}

/// 플랫폼별 라이브러리 파일명 (libgreetings.so, libgreetings.dylib, greetings.dll)
fn default_library_name() -> String {
    format!("{}greetings{}", env::consts::DLL_PREFIX, env::consts::DLL_SUFFIX)
}
