use actix_web::web;

use crate::error::{json_error_handler, query_error_handler};

mod notification;
mod registration;

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler));
    cfg.service(registration::get_registration);
    cfg.service((
        notification::get_all_notifications,
        notification::get_active_notifications,
        notification::get_live_notifications,
        notification::get_notifications,
        notification::post_notification,
        notification::patch_notification,
        notification::delete_notification,
        notification::delete_all_notifications,
    ));
}
