use actix_web::{get, web, HttpResponse};

use crate::config::ExtensionConfig;
use crate::model::registration::RegistrationOutput;

// 管理后台扩展注册信息
#[get("/registration")]
pub async fn get_registration(extension: web::Data<ExtensionConfig>) -> HttpResponse {
    HttpResponse::Ok().json(RegistrationOutput::for_extension(&extension))
}
