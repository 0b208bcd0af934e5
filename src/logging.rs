// 로깅 초기화 (env_logger, RUST_LOG 미지정 시 info)

use env_logger::Env;

/// 여러 번 호출해도 안전 (이미 설치되어 있으면 무시)
pub fn init() {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    if result.is_err() {
        log::debug!("logging::init: logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();

        // 두 번째 호출 이후에도 로거가 살아있음
        assert_ne!(log::max_level(), log::LevelFilter::Off);
        log::info!("logging::tests: still logging after repeated init");
    }
}
