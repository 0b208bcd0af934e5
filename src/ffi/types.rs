// C-compatible 타입 정의
// Host 애플리케이션과 공유되는 상태 코드

use crate::error::GreetingError;

/// 에러 코드
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    NullPointer = 1,
    InvalidParam = 2,
    ForeignCallFailed = 3,
    LibraryLoad = 4,
    Unknown = 99,
}

impl From<&GreetingError> for ErrorCode {
    fn from(err: &GreetingError) -> Self {
        match err {
            GreetingError::InvalidName { .. } => ErrorCode::InvalidParam,
            GreetingError::ForeignCallFailed => ErrorCode::ForeignCallFailed,
            GreetingError::LibraryLoad { .. } | GreetingError::MissingSymbol { .. } => {
                ErrorCode::LibraryLoad
            }
            GreetingError::InvalidConfig(_) => ErrorCode::InvalidParam,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ErrorCode::from(&GreetingError::ForeignCallFailed) as i32,
            3
        );
        assert_eq!(
            ErrorCode::from(&GreetingError::InvalidName { position: 0 }),
            ErrorCode::InvalidParam
        );
        assert_eq!(
            ErrorCode::from(&GreetingError::MissingSymbol {
                symbol: "x".into(),
                reason: "y".into(),
            }),
            ErrorCode::LibraryLoad
        );
        assert_eq!(
            ErrorCode::from(&GreetingError::LibraryLoad {
                path: PathBuf::from("x"),
                reason: "y".into(),
            }) as i32,
            4
        );
    }
}
