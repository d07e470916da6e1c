use actix_web::{
    delete, get, http::header, patch, post, web, HttpRequest, HttpResponse, HttpResponseBuilder,
};
use chrono::Utc;
use serde_json::json;

use crate::config::AuthConfig;
use crate::error::ResponseError;
use crate::model::notification::{
    CreateNotificationInput, DeleteNotificationInput, GetAllNotificationsQuery,
    GetWindowNotificationsQuery, UpdateNotificationInput,
};
use crate::service::notification::{NotificationService, WindowFilter};
use crate::util::req_parse::{check_request_inputs, describe_request};

fn no_store() -> HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder.insert_header((header::CACHE_CONTROL, "no-store"));
    builder
}

impl From<GetWindowNotificationsQuery> for WindowFilter {
    fn from(query: GetWindowNotificationsQuery) -> Self {
        Self {
            position: query.position,
            tz: query.tz,
            tzaware: query.tzaware,
        }
    }
}

// 获取全部通知, 包含id, 供管理后台使用
#[get("/notifications")]
pub async fn get_notifications(
    req: HttpRequest,
    service: web::Data<NotificationService>,
    auth: web::Data<AuthConfig>,
) -> Result<HttpResponse, ResponseError> {
    tracing::info!("调用获取通知接口");
    check_request_inputs(&req, &auth, &[])?;

    let notifications = service.list().await?;
    Ok(no_store().json(json!({ "data": notifications })))
}

// 创建通知
#[post("/notification")]
pub async fn post_notification(
    req: HttpRequest,
    service: web::Data<NotificationService>,
    auth: web::Data<AuthConfig>,
    input: web::Json<CreateNotificationInput>,
) -> Result<HttpResponse, ResponseError> {
    tracing::info!("调用创建通知接口");
    tracing::debug!("请求参数: {}", describe_request(&req, &*input));
    check_request_inputs(&req, &auth, &input.missing_fields())?;

    let draft = input.into_inner().data.unwrap_or_default();
    let notification = service.create(draft).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "notification": notification,
    })))
}

// 更新通知, 只覆盖提交的字段
#[patch("/notification")]
pub async fn patch_notification(
    req: HttpRequest,
    service: web::Data<NotificationService>,
    auth: web::Data<AuthConfig>,
    input: web::Json<UpdateNotificationInput>,
) -> Result<HttpResponse, ResponseError> {
    tracing::info!("调用更新通知接口");
    tracing::debug!("请求参数: {}", describe_request(&req, &*input));
    check_request_inputs(&req, &auth, &[])?;

    let data = input.into_inner().data.unwrap_or_default();
    let patch = data.patch();
    let notification = service.update(data.id, patch).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "notification": notification,
    })))
}

// 删除单个通知
#[delete("/notification")]
pub async fn delete_notification(
    req: HttpRequest,
    service: web::Data<NotificationService>,
    auth: web::Data<AuthConfig>,
    input: web::Json<DeleteNotificationInput>,
) -> Result<HttpResponse, ResponseError> {
    tracing::info!("调用删除通知接口");
    tracing::debug!("请求参数: {}", describe_request(&req, &*input));
    check_request_inputs(&req, &auth, &input.missing_fields())?;

    let id = input
        .into_inner()
        .data
        .and_then(|d| d.id)
        .unwrap_or_default();
    service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "id": id,
    })))
}

// 清空全部通知
#[delete("/notifications")]
pub async fn delete_all_notifications(
    req: HttpRequest,
    service: web::Data<NotificationService>,
    auth: web::Data<AuthConfig>,
) -> Result<HttpResponse, ResponseError> {
    tracing::info!("调用清空通知接口");
    check_request_inputs(&req, &auth, &[])?;

    service.delete_all().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

// 按位置获取全部通知, 不返回id
#[get("/notifications/all")]
pub async fn get_all_notifications(
    req: HttpRequest,
    service: web::Data<NotificationService>,
    auth: web::Data<AuthConfig>,
    query: web::Query<GetAllNotificationsQuery>,
) -> Result<HttpResponse, ResponseError> {
    tracing::info!("调用获取全部通知接口");
    tracing::debug!("请求参数: {}", describe_request(&req, &*query));
    check_request_inputs(&req, &auth, &[])?;

    let position = query.position.as_deref().filter(|p| !p.is_empty());
    let notifications = service.list_all(position).await?;
    Ok(no_store().json(json!({ "data": notifications })))
}

// 获取当前正在生效的通知
#[get("/notifications/active")]
pub async fn get_active_notifications(
    req: HttpRequest,
    service: web::Data<NotificationService>,
    auth: web::Data<AuthConfig>,
    query: web::Query<GetWindowNotificationsQuery>,
) -> Result<HttpResponse, ResponseError> {
    tracing::info!("调用获取生效通知接口");
    tracing::debug!("请求参数: {}", describe_request(&req, &*query));
    check_request_inputs(&req, &auth, &[])?;

    let filter = WindowFilter::from(query.into_inner());
    let notifications = service.list_active(&filter, Utc::now()).await?;
    Ok(no_store().json(json!({ "data": notifications })))
}

// 获取尚未结束的通知, 包括还没开始的
#[get("/notifications/live")]
pub async fn get_live_notifications(
    req: HttpRequest,
    service: web::Data<NotificationService>,
    auth: web::Data<AuthConfig>,
    query: web::Query<GetWindowNotificationsQuery>,
) -> Result<HttpResponse, ResponseError> {
    tracing::info!("调用获取未结束通知接口");
    tracing::debug!("请求参数: {}", describe_request(&req, &*query));
    check_request_inputs(&req, &auth, &[])?;

    let filter = WindowFilter::from(query.into_inner());
    let notifications = service.list_live(&filter, Utc::now()).await?;
    Ok(no_store().json(json!({ "data": notifications })))
}
