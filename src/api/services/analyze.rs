//! Analysis API 上传与手动输入操作

use actix_multipart::Multipart;
use actix_web::{Responder, Result as ActixResult, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::analysis::{AnalysisReport, LearningModel, analyze};
use crate::api::error_code::ErrorCode;
use crate::api::helpers::{api_result, error_from_studycurve, error_response};
use crate::config::get_config;
use crate::errors::{Result, StudycurveError};
use crate::ingest::{Dataset, Observation};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualAnalyzeRequest {
    pub model: String,
    pub rows: Vec<Observation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// 本次请求使用的观测表，前端用来回显
    pub rows: Vec<Observation>,
    pub report: AnalysisReport,
}

pub struct AnalyzeService;

impl AnalyzeService {
    /// 上传 CSV 分析：multipart 字段 `file`（CSV 字节）与 `model`（模型名）
    pub async fn upload(mut payload: Multipart) -> ActixResult<impl Responder> {
        info!("Analyze API: upload request");

        let max_size = get_config().upload.max_size;
        let mut csv_data: Option<Vec<u8>> = None;
        let mut model_name = "quadratic".to_string(); // 默认模型

        // 解析 multipart form data
        while let Some(item) = payload.next().await {
            let mut field = match item {
                Ok(f) => f,
                Err(e) => {
                    error!("Failed to parse multipart field: {}", e);
                    return Ok(error_from_studycurve(&StudycurveError::multipart_data(
                        format!("Invalid multipart data: {}", e),
                    )));
                }
            };

            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "file" => {
                    // 读取文件内容（带大小限制）
                    let mut data = Vec::new();
                    while let Some(chunk) = field.next().await {
                        match chunk {
                            Ok(bytes) => {
                                if data.len() + bytes.len() > max_size {
                                    return Ok(error_from_studycurve(
                                        &StudycurveError::file_too_large(format!(
                                            "File size exceeds maximum {} KB",
                                            max_size / 1024
                                        )),
                                    ));
                                }
                                data.extend_from_slice(&bytes);
                            }
                            Err(e) => {
                                error!("Failed to read file chunk: {}", e);
                                return Ok(error_from_studycurve(
                                    &StudycurveError::file_operation(format!(
                                        "Failed to read file: {}",
                                        e
                                    )),
                                ));
                            }
                        }
                    }
                    csv_data = Some(data);
                }
                "model" => {
                    let mut data = Vec::new();
                    while let Some(chunk) = field.next().await {
                        if let Ok(bytes) = chunk {
                            data.extend_from_slice(&bytes);
                        }
                    }
                    model_name = String::from_utf8_lossy(&data).to_string();
                }
                _ => {
                    // 忽略未知字段
                }
            }
        }

        let Some(csv_data) = csv_data else {
            return Ok(error_response(
                actix_web::http::StatusCode::BAD_REQUEST,
                ErrorCode::CsvFileMissing,
                "no CSV file in upload",
            ));
        };

        Ok(api_result(run_analysis_from_csv(&csv_data, &model_name)))
    }

    /// 手动输入分析：JSON 行数据 + 模型名
    pub async fn manual(request: web::Json<ManualAnalyzeRequest>) -> ActixResult<impl Responder> {
        info!(
            "Analyze API: manual request with {} rows",
            request.rows.len()
        );
        let request = request.into_inner();
        Ok(api_result(run_analysis_from_rows(request.rows, &request.model)))
    }
}

fn run_analysis_from_csv(csv_data: &[u8], model_name: &str) -> Result<AnalysisResponse> {
    let model = LearningModel::parse(model_name)?;
    let dataset = Dataset::from_csv_bytes(csv_data)?;
    finish(dataset, model)
}

fn run_analysis_from_rows(rows: Vec<Observation>, model_name: &str) -> Result<AnalysisResponse> {
    let model = LearningModel::parse(model_name)?;
    let dataset = Dataset::from_rows(rows)?;
    finish(dataset, model)
}

fn finish(dataset: Dataset, model: LearningModel) -> Result<AnalysisResponse> {
    let report = analyze(&dataset, model)?;
    info!(
        "Analysis complete: model={} bounds=[{:.2}, {:.2}] total_effect={:.4}",
        report.model, report.start_time, report.end_time, report.total_effect
    );
    Ok(AnalysisResponse {
        rows: dataset.rows().to_vec(),
        report,
    })
}
