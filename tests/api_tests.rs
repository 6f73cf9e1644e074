//! HTTP API integration tests
//!
//! End-to-end tests for the analyze endpoints, health check and the
//! embedded frontend page.

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use studycurve::api::services::{AnalyzeService, AppStartTime, FrontendService, HealthService};

// =============================================================================
// Test Setup
// =============================================================================

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .service(
                    web::scope("/api")
                        .route("/analyze/upload", web::post().to(AnalyzeService::upload))
                        .route("/analyze/manual", web::post().to(AnalyzeService::manual)),
                )
                .route("/health", web::get().to(HealthService::health_check))
                .route("/", web::get().to(FrontendService::handle_index)),
        )
        .await
    };
}

/// 构造 multipart/form-data 请求体
fn multipart_body(boundary: &str, csv: Option<&str>, model: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(csv) = csv {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"file\"; filename=\"data.csv\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
        body.extend_from_slice(csv.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some(model) = model {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"model\"\r\n\r\n");
        body.extend_from_slice(model.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

fn upload_request(csv: Option<&str>, model: Option<&str>) -> TestRequest {
    let boundary = "testboundary";
    TestRequest::post()
        .uri("/api/analyze/upload")
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        ))
        .set_payload(multipart_body(boundary, csv, model))
}

// =============================================================================
// Manual entry endpoint
// =============================================================================

#[actix_rt::test]
async fn test_manual_analyze_quadratic() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/analyze/manual")
        .set_json(json!({
            "model": "quadratic",
            "rows": [
                {"study_time": 2.0, "gpa": 3.0},
                {"study_time": 6.0, "gpa": 3.4, "name": "Zain"},
                {"study_time": 10.0, "gpa": 3.8}
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);

    let report = &body["data"]["report"];
    assert_eq!(report["model"], "quadratic");
    assert_eq!(report["start_time"], 2.0);
    assert_eq!(report["end_time"], 10.0);

    // 数值积分与闭式结果一致
    let total = report["total_effect"].as_f64().unwrap();
    let closed = report["closed_form"].as_f64().unwrap();
    assert!((total - closed).abs() < 1e-6);

    // 回显的观测表保留档案字段
    assert_eq!(body["data"]["rows"][1]["name"], "Zain");
    assert!(report["plot_svg"].as_str().unwrap().starts_with("<svg"));
}

#[actix_rt::test]
async fn test_manual_analyze_logistic() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/analyze/manual")
        .set_json(json!({
            "model": "logistic",
            "rows": [
                {"study_time": 5.0, "gpa": 2.0},
                {"study_time": 15.0, "gpa": 3.7}
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["report"]["model"], "logistic");
    let total = body["data"]["report"]["total_effect"].as_f64().unwrap();
    let closed = body["data"]["report"]["closed_form"].as_f64().unwrap();
    assert!((total - closed).abs() < 1e-6);
}

#[actix_rt::test]
async fn test_manual_analyze_unknown_model() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/analyze/manual")
        .set_json(json!({ "model": "cubic", "rows": [{"study_time": 1.0, "gpa": 3.0}] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);
    assert!(body.get("data").is_none());
}

#[actix_rt::test]
async fn test_manual_analyze_empty_rows() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/analyze/manual")
        .set_json(json!({ "model": "quadratic", "rows": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3002);
    assert_eq!(body["message"], "dataset contains no observations");
}

#[actix_rt::test]
async fn test_manual_analyze_invalid_row() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/analyze/manual")
        .set_json(json!({ "model": "quadratic", "rows": [{"study_time": 2.0, "gpa": 5.0}] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
}

// =============================================================================
// Upload endpoint
// =============================================================================

#[actix_rt::test]
async fn test_upload_analyze_csv() {
    let app = test_app!();

    let csv = "Nama,NPM,Waktu Belajar,IPK\nZain,2021001,3,3.1\nNaila,2021002,9,3.7\n";
    let req = upload_request(Some(csv), Some("quadratic")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["rows"][0]["npm"], "2021001");
    assert_eq!(body["data"]["report"]["start_time"], 3.0);
    assert_eq!(body["data"]["report"]["end_time"], 9.0);
}

#[actix_rt::test]
async fn test_upload_missing_required_column_suppresses_results() {
    let app = test_app!();

    // 缺列走指定错误路径，响应不含任何分析结果
    let csv = "Jam,Nilai\n3,3.1\n";
    let req = upload_request(Some(csv), Some("quadratic")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4006);
    assert_eq!(
        body["message"],
        "required column 'Waktu Belajar' or 'IPK' not found in uploaded file"
    );
    assert!(body.get("data").is_none());
}

#[actix_rt::test]
async fn test_upload_oversized_file_rejected() {
    let app = test_app!();

    // 默认上传上限 2MB，超过后应拒绝而不是继续累积
    let mut csv = String::from("Waktu Belajar,IPK\n");
    while csv.len() <= 2 * 1024 * 1024 {
        csv.push_str("1,3.0\n");
    }
    let req = upload_request(Some(&csv), Some("quadratic")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1011);
    assert!(
        body["message"].as_str().unwrap().contains("exceeds maximum"),
        "message: {}",
        body["message"]
    );
    assert!(body.get("data").is_none());
}

#[actix_rt::test]
async fn test_upload_without_file_field() {
    let app = test_app!();

    let req = upload_request(None, Some("quadratic")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4004);
}

#[actix_rt::test]
async fn test_upload_logistic_negative_bounds_yields_message() {
    let app = test_app!();

    // 上传数据不做取值范围校验，负学习时长会走到 logistic 的边界检查，
    // 返回指定消息而不是数值结果
    let csv = "Waktu Belajar,IPK\n-2,3.0\n8,3.5\n";
    let req = upload_request(Some(csv), Some("logistic")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
    assert_eq!(body["message"], "integration bounds must be non-negative");
    assert!(body.get("data").is_none());
}

#[actix_rt::test]
async fn test_upload_defaults_to_quadratic_model() {
    let app = test_app!();

    let csv = "Waktu Belajar,IPK\n1,2.0\n5,3.0\n";
    let req = upload_request(Some(csv), None).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["report"]["model"], "quadratic");
}

// =============================================================================
// Health + frontend
// =============================================================================

#[actix_rt::test]
async fn test_health_check() {
    let app = test_app!();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "healthy");
    assert!(body["data"]["uptime"].as_u64().is_some());
}

#[actix_rt::test]
async fn test_frontend_index() {
    let app = test_app!();

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.starts_with("text/html"));

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("Learning Effect"));
    // 版本占位符已被替换
    assert!(!html.contains("%STUDYCURVE_VERSION%"));
}
