use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, ResponseError};
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

/// 在默认字段之外记录通知位置和调用方, 调用方在通过 token 校验后写入
pub struct CustomRootSpanBuilder;

impl RootSpanBuilder for CustomRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        let position = request
            .query_string()
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == "position" || *k == "location")
            .map(|(_, v)| v.to_string())
            .unwrap_or_default();
        tracing_actix_web::root_span!(
            request,
            notification.position = %position,
            client_id = tracing::field::Empty
        )
    }

    fn on_request_end<B: MessageBody>(span: Span, outcome: &Result<ServiceResponse<B>, Error>) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
        emit_event_on_error(outcome);
    }
}

fn emit_event_on_error<B: MessageBody>(outcome: &Result<ServiceResponse<B>, Error>) {
    match outcome {
        Ok(response) => {
            if let Some(err) = response.response().error() {
                emit_error_event(err.as_response_error(), err)
            }
        }
        Err(error) => emit_error_event(error.as_response_error(), error),
    }
}

fn emit_error_event(response_error: &dyn ResponseError, error: &Error) {
    let status_code = response_error.status_code();
    if status_code.is_client_error() {
        tracing::info!("处理请求失败: 客户端错误 {}, {}", status_code.as_u16(), error);
    } else {
        tracing::error!("处理请求失败: 服务器错误 {}, {}", status_code.as_u16(), error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_service, init_service, TestRequest};
    use actix_web::{get, App, HttpResponse};
    use tracing_actix_web::TracingLogger;

    use crate::error::ResponseError as AppError;

    #[get("/fail")]
    async fn fail() -> Result<HttpResponse, AppError> {
        Err(AppError::unexpected_err("boom"))
    }

    #[get("/ok")]
    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn middleware_keeps_status_codes() {
        let app = init_service(
            App::new()
                .wrap(TracingLogger::<CustomRootSpanBuilder>::new())
                .service(fail)
                .service(ok),
        )
        .await;
        let resp = call_service(&app, TestRequest::get().uri("/fail").to_request()).await;
        assert_eq!(resp.status().as_u16(), 500);
        let resp = call_service(
            &app,
            TestRequest::get().uri("/ok?position=Header").to_request(),
        )
        .await;
        assert!(resp.status().is_success());
    }
}
