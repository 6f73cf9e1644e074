use actix_web::{App, HttpServer, middleware::Compress, web};
use tracing::{info, warn};

use studycurve::api::services::{AnalyzeService, AppStartTime, FrontendService, HealthService};
use studycurve::config;
use studycurve::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 记录程序启动时间
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();

    let app_config = config::init_config();
    let _log_guard = init_logging(app_config);

    info!("studycurve v{} starting", env!("CARGO_PKG_VERSION"));

    let bind_address = format!("{}:{}", app_config.server.host, app_config.server.port);
    warn!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(app_config.upload.max_size))
            .service(
                web::scope("/api")
                    .route("/analyze/upload", web::post().to(AnalyzeService::upload))
                    .route("/analyze/manual", web::post().to(AnalyzeService::manual)),
            )
            .route("/health", web::get().to(HealthService::health_check))
            .route("/", web::get().to(FrontendService::handle_index))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(app_config.server.workers)
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
