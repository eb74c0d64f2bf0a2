//! URL 验证模块
//!
//! 创建短链接前的目标地址检查：非空、http/https 协议、长度上限

use crate::errors::InvalidInput;

const ALLOWED_SCHEMES: &[&str] = &["http://", "https://"];

/// 验证目标 URL
///
/// 检查项目：
/// 1. 去除空白后不为空
/// 2. 以 http:// 或 https:// 开头（区分大小写）
/// 3. 字符数不超过 `max_length`
pub fn validate_url(url: &str, max_length: usize) -> Result<(), InvalidInput> {
    if url.trim().is_empty() {
        return Err(InvalidInput::EmptyUrl);
    }

    if !ALLOWED_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        let proto = url
            .split_once(':')
            .map(|(scheme, _)| format!("{}:", scheme))
            .unwrap_or_default();
        return Err(InvalidInput::InvalidProtocol(proto));
    }

    let length = url.chars().count();
    if length > max_length {
        return Err(InvalidInput::UrlTooLong {
            length,
            max: max_length,
        });
    }

    Ok(())
}
