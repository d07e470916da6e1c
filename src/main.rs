use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use time::macros::format_description;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{filter::LevelFilter, fmt::time::LocalTime, EnvFilter};

use crate::config::{StoreBackend, GLOBAL_CONFIG};
use crate::repository::NotificationRepository;
use crate::service::NotificationService;
use crate::store::{MemoryStateStore, PgStateStore, SharedStateStore, StoreError};
use crate::tracing_middleware::CustomRootSpanBuilder;

mod config;
mod db;
mod error;
mod model;
mod repository;
mod router;
mod schedule;
mod service;
mod store;
mod tracing_middleware;
mod util;

fn main() -> std::io::Result<()> {
    actix_web::rt::System::with_tokio_rt(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(GLOBAL_CONFIG.app.thread)
            .enable_all()
            .build()
            .expect("不能创建tokio运行时")
    })
    .block_on(async_main())
}

async fn async_main() -> std::io::Result<()> {
    // 设置日志
    tracing_log::LogTracer::init().map_err(std::io::Error::other)?;
    let log_level = match GLOBAL_CONFIG.app.log_level.as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };
    let env_filter = EnvFilter::from_default_env()
        .add_directive("rustls=info".parse().map_err(std::io::Error::other)?)
        .add_directive("tokio_postgres=info".parse().map_err(std::io::Error::other)?)
        .add_directive(log_level.into());
    let (stderr, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let subscriber_builder = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(stderr)
        .with_env_filter(env_filter)
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
        )));
    let installed = match GLOBAL_CONFIG.app.log_format.as_str() {
        "pretty" => tracing::subscriber::set_global_default(subscriber_builder.pretty().finish()),
        "json" => tracing::subscriber::set_global_default(subscriber_builder.json().finish()),
        _ => tracing::subscriber::set_global_default(subscriber_builder.finish()),
    };
    installed.map_err(std::io::Error::other)?;

    run_server().await
}

async fn new_state_store() -> Result<SharedStateStore, StoreError> {
    match GLOBAL_CONFIG.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("使用内存存储, 重启后通知数据会丢失");
            Ok(Arc::new(MemoryStateStore::new()))
        }
        StoreBackend::Pgsql => {
            let pgsql = GLOBAL_CONFIG
                .pgsql
                .as_ref()
                .ok_or_else(|| StoreError::Config("缺少 [pgsql] 配置".to_string()))?;
            let store = PgStateStore::new(db::new_db_pool(pgsql)?);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
    }
}

async fn run_server() -> std::io::Result<()> {
    // 初始化状态存储
    let store = new_state_store().await.map_err(std::io::Error::other)?;
    let repository = NotificationRepository::new(store, &GLOBAL_CONFIG.store);
    tracing::info!(
        "通知存储已就绪, 后端: {}, 键: {}",
        GLOBAL_CONFIG.store.backend,
        repository.key()
    );
    let service = web::Data::new(NotificationService::new(repository));
    let auth = web::Data::new(GLOBAL_CONFIG.auth.clone());
    let extension = web::Data::new(GLOBAL_CONFIG.extension.clone());

    let temp_server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(auth.clone())
            .app_data(extension.clone())
            .wrap(middleware::Compress::default())
            .wrap(TracingLogger::<CustomRootSpanBuilder>::new())
            .configure(router::register)
            .default_service(web::route().to(|| async { HttpResponse::NotFound().finish() }))
    })
    .max_connection_rate(1024)
    .workers(GLOBAL_CONFIG.app.thread);

    #[cfg(target_family = "unix")]
    if GLOBAL_CONFIG.app.mode == "uds" {
        return temp_server.bind_uds(&GLOBAL_CONFIG.app.addr)?.run().await;
    }
    temp_server.bind(&GLOBAL_CONFIG.app.addr)?.run().await
}
