use actix_web::{http::header, HttpRequest};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::AuthConfig;
use crate::error::ResponseError;
use crate::util::jwt::parse_access_token;

pub fn get_access_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// 检查 Authorization 头部和必填参数, 缺少的项合并成一条错误信息.
/// 配置了密钥时还要校验 token
pub fn check_request_inputs(
    req: &HttpRequest,
    auth: &AuthConfig,
    missing_params: &[&str],
) -> Result<(), ResponseError> {
    let has_authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map_or(false, |v| !v.is_empty());

    let mut problems = Vec::new();
    if !has_authorization {
        problems.push("missing header(s) 'authorization'".to_string());
    }
    if !missing_params.is_empty() {
        problems.push(format!(
            "missing parameter(s) '{}'",
            missing_params.join(",")
        ));
    }
    if !problems.is_empty() {
        let message = problems.join(" and ");
        return Err(ResponseError::input_err(&message, &message));
    }

    if let Some(secret) = auth.token_secret.as_deref().filter(|s| !s.is_empty()) {
        let token = get_access_token(req).ok_or_else(|| {
            ResponseError::access_token_err(
                "invalid authorization token",
                "无法从头部获取access_token",
            )
        })?;
        let claims = parse_access_token(token, secret)?;
        tracing::Span::current().record("client_id", claims.sub.as_str());
    }
    Ok(())
}

/// 用于调试日志的请求描述, Authorization 头部的内容会被隐藏
pub fn describe_request<T: Serialize>(req: &HttpRequest, params: &T) -> String {
    let mut headers = Map::new();
    for (name, value) in req.headers() {
        let shown = if *name == header::AUTHORIZATION {
            "<hidden>".to_string()
        } else {
            value.to_str().unwrap_or("<binary>").to_string()
        };
        headers.insert(name.as_str().to_string(), Value::String(shown));
    }
    json!({
        "path": req.path(),
        "query": req.query_string(),
        "headers": headers,
        "params": params,
    })
    .to_string()
}
