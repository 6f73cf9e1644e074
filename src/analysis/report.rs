//! The analysis operation: dataset + model -> report
//!
//! 积分上下界取观测样本学习时长的最小 / 最大值，
//! 与原始产品的行为一致。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::model::LearningModel;
use crate::analysis::quadrature;
use crate::errors::{Result, StudycurveError};
use crate::ingest::Dataset;
use crate::render::plot;

pub const ERR_EMPTY_DATASET: &str = "dataset contains no observations";

/// 数值积分容差
const QUAD_TOL: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub model: String,
    pub start_time: f64,
    pub end_time: f64,
    /// 定积分数值结果（自适应 Simpson）
    pub total_effect: f64,
    /// 闭式校验值 F(b) − F(a)
    pub closed_form: f64,
    pub error_estimate: f64,
    pub evaluations: u32,
    pub model_latex: String,
    pub antiderivative_latex: String,
    pub integral_latex: String,
    pub plot_svg: String,
}

/// Run the full analysis for one request.
pub fn analyze(dataset: &Dataset, model: LearningModel) -> Result<AnalysisReport> {
    let (start_time, end_time) = dataset
        .bounds()
        .ok_or_else(|| StudycurveError::empty_dataset(ERR_EMPTY_DATASET))?;

    model.validate_bounds(start_time, end_time)?;

    let result = quadrature::integrate(|t| model.value(t), start_time, end_time, QUAD_TOL);
    let closed_form = model.antiderivative(end_time) - model.antiderivative(start_time);

    debug!(
        "analysis: model={} bounds=[{}, {}] quadrature={} closed_form={} evals={}",
        model.name(),
        start_time,
        end_time,
        result.value,
        closed_form,
        result.evaluations
    );

    let model_latex = format!("f(t) = {}", model.latex());
    let antiderivative_latex = format!("F(t) = {} + C", model.antiderivative_latex());
    let integral_latex = format!(
        "\\int_{{{:.2}}}^{{{:.2}}} \\left( {} \\right) \\, dt = {:.4}",
        start_time,
        end_time,
        model.latex(),
        result.value
    );

    let plot_svg = plot::render_plot(dataset, &model, start_time, end_time);

    Ok(AnalysisReport {
        model: model.name().to_string(),
        start_time,
        end_time,
        total_effect: result.value,
        closed_form,
        error_estimate: result.error_estimate,
        evaluations: result.evaluations,
        model_latex,
        antiderivative_latex,
        integral_latex,
        plot_svg,
    })
}
