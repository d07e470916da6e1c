use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{http::StatusCode, HttpRequest, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};
use serde_json::json;

use crate::service::NotificationError;
use crate::store::StoreError;

#[derive(Debug, Display, Error)]
#[display(
    fmt = "{{err_code: {}, err_message: {}, internal_message: {}}}",
    err_code,
    err_message,
    internal_message
)]
pub struct ResponseError {
    pub err_code: u16,
    pub err_message: String,
    pub internal_message: String,
    pub status_code: StatusCode,
}

// 服务器内部错误对外只返回这一句, 细节写入日志
const SERVER_ERROR_MESSAGE: &str = "server error";

impl ResponseError {
    // 通用错误
    pub fn input_err(err_message: &str, internal_message: &str) -> Self {
        Self {
            err_code: 1,
            err_message: err_message.to_string(),
            internal_message: internal_message.to_string(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    pub fn access_token_err(err_message: &str, internal_message: &str) -> Self {
        Self {
            err_code: 3,
            err_message: err_message.to_string(),
            internal_message: internal_message.to_string(),
            status_code: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn resource_not_found_err(err_message: &str, internal_message: &str) -> Self {
        Self {
            err_code: 7,
            err_message: err_message.to_string(),
            internal_message: internal_message.to_string(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    pub fn conflict_err(err_message: &str, internal_message: &str) -> Self {
        Self {
            err_code: 8,
            err_message: err_message.to_string(),
            internal_message: internal_message.to_string(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    pub fn unexpected_err(internal_message: &str) -> Self {
        Self {
            err_code: 0,
            err_message: SERVER_ERROR_MESSAGE.to_string(),
            internal_message: internal_message.to_string(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::error::ResponseError for ResponseError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code())
            .json(json!({"err_code": self.err_code, "error": self.err_message}))
    }
}

impl From<NotificationError> for ResponseError {
    fn from(error: NotificationError) -> Self {
        let message = error.to_string();
        match &error {
            NotificationError::NotFound(id) => {
                Self::resource_not_found_err(&message, &format!("通知不存在, id: {}", id))
            }
            NotificationError::EmptyCollection => {
                Self::resource_not_found_err(&message, "存储中没有任何通知")
            }
            NotificationError::DuplicateId(id) => {
                Self::conflict_err(&message, &format!("通知id重复: {}", id))
            }
            NotificationError::Overlap {
                position,
                conflicting_id,
            } => Self::conflict_err(
                &message,
                &format!("位置 {} 上的时间与通知 {} 重叠", position, conflicting_id),
            ),
            NotificationError::InvalidTimezone(tz) => {
                Self::input_err(&message, &format!("无法识别的时区: {}", tz))
            }
            NotificationError::CorruptState(detail) => {
                Self::unexpected_err(&format!("存储的通知列表已损坏: {}", detail))
            }
            NotificationError::Store(e) => Self::from_store_error(e),
            _ => Self::input_err(&message, &message),
        }
    }
}

impl ResponseError {
    fn from_store_error(error: &StoreError) -> Self {
        let err_code = match error {
            StoreError::Pool(_) => 501,
            StoreError::Query(_) => 502,
            StoreError::Config(_) => 500,
        };
        Self {
            err_code,
            ..Self::unexpected_err(&error.to_string())
        }
    }
}

impl From<jsonwebtoken::errors::Error> for ResponseError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        Self::access_token_err(
            "invalid authorization token",
            &format!("解析access_token错误, 详细信息: {}", error),
        )
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ResponseError::input_err("invalid JSON payload", &err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ResponseError::input_err("invalid query parameters", &err.to_string()).into()
}
