use actix_web::{HttpResponse, Result};
use rust_embed::Embed;
use tracing::trace;

// 使用 RustEmbed 自动嵌入静态文件
#[derive(Embed)]
#[folder = "static/"]
struct FrontendAssets;

pub struct FrontendService;

impl FrontendService {
    /// 处理前端首页 - 服务嵌入的 index.html
    pub async fn handle_index() -> Result<HttpResponse> {
        trace!("Serving frontend index page");

        match FrontendAssets::get("index.html") {
            Some(content) => {
                // 替换版本占位符
                let html_content = String::from_utf8_lossy(&content.data);
                let processed_html =
                    html_content.replace("%STUDYCURVE_VERSION%", env!("CARGO_PKG_VERSION"));

                Ok(HttpResponse::Ok()
                    .content_type("text/html; charset=utf-8")
                    .body(processed_html))
            }
            None => {
                // 使用编译时包含作为后备
                let fallback_html =
                    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html"));
                let processed_html =
                    fallback_html.replace("%STUDYCURVE_VERSION%", env!("CARGO_PKG_VERSION"));
                Ok(HttpResponse::Ok()
                    .content_type("text/html; charset=utf-8")
                    .body(processed_html))
            }
        }
    }
}
