//! 配置值验证

use super::EngineConfig;

/// Longest short code the engine accepts
pub const MAX_SHORT_CODE_LENGTH: usize = 64;

/// 验证引擎配置是否合法
pub fn validate_engine_config(config: &EngineConfig) -> Result<(), String> {
    if config.short_code_length == 0 {
        return Err("engine.short_code_length must be at least 1".to_string());
    }
    if config.short_code_length > MAX_SHORT_CODE_LENGTH {
        return Err(format!(
            "engine.short_code_length must not exceed {}, got {}",
            MAX_SHORT_CODE_LENGTH, config.short_code_length
        ));
    }
    if config.max_url_length == 0 {
        return Err("engine.max_url_length must be at least 1".to_string());
    }
    if config.cleanup_interval_minutes == 0 {
        return Err("engine.cleanup_interval_minutes must be at least 1".to_string());
    }
    if config.max_code_attempts == 0 {
        return Err("engine.max_code_attempts must be at least 1".to_string());
    }
    Ok(())
}
