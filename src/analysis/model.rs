//! Learning-effect models
//!
//! 固定的学习效应模型：二次多项式与 logistic 增长曲线。
//! 每个模型都有闭式原函数，用于与数值积分结果互相校验，
//! 以及渲染为 LaTeX 供前端展示。

use crate::errors::{Result, StudycurveError};

pub const ERR_NEGATIVE_BOUNDS: &str = "integration bounds must be non-negative";
pub const ERR_UNORDERED_BOUNDS: &str = "integration start bound exceeds end bound";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LearningModel {
    /// f(t) = a·t² + b·t + c
    Quadratic { a: f64, b: f64, c: f64 },
    /// f(t) = ceiling / (1 + e^(−k(t − t0)))
    Logistic { ceiling: f64, k: f64, t0: f64 },
}

impl LearningModel {
    pub fn quadratic_default() -> Self {
        LearningModel::Quadratic {
            a: 0.05,
            b: -0.3,
            c: 2.0,
        }
    }

    pub fn logistic_default() -> Self {
        LearningModel::Logistic {
            ceiling: 4.0,
            k: 0.5,
            t0: 10.0,
        }
    }

    /// 从请求参数解析模型名称
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "quadratic" => Ok(Self::quadratic_default()),
            "logistic" => Ok(Self::logistic_default()),
            other => Err(StudycurveError::invalid_model(format!(
                "unknown model '{}', expected 'quadratic' or 'logistic'",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LearningModel::Quadratic { .. } => "quadratic",
            LearningModel::Logistic { .. } => "logistic",
        }
    }

    pub fn value(&self, t: f64) -> f64 {
        match *self {
            LearningModel::Quadratic { a, b, c } => a * t * t + b * t + c,
            LearningModel::Logistic { ceiling, k, t0 } => {
                ceiling / (1.0 + (-k * (t - t0)).exp())
            }
        }
    }

    /// 闭式原函数 F(t)（积分常数取 0）
    ///
    /// 二次：F(t) = a/3·t³ + b/2·t² + c·t
    /// logistic：F(t) = (ceiling/k)·ln(1 + e^(k(t − t0)))
    pub fn antiderivative(&self, t: f64) -> f64 {
        match *self {
            LearningModel::Quadratic { a, b, c } => {
                t * (c + t * (b / 2.0 + t * a / 3.0))
            }
            LearningModel::Logistic { ceiling, k, t0 } => {
                (ceiling / k) * softplus(k * (t - t0))
            }
        }
    }

    /// 积分上下界校验
    ///
    /// 原始产品只对 logistic 变体做边界检查，二次模型不限制。
    pub fn validate_bounds(&self, start: f64, end: f64) -> Result<()> {
        if let LearningModel::Logistic { .. } = self {
            if start < 0.0 || end < 0.0 {
                return Err(StudycurveError::validation(ERR_NEGATIVE_BOUNDS));
            }
            if start > end {
                return Err(StudycurveError::validation(ERR_UNORDERED_BOUNDS));
            }
        }
        Ok(())
    }

    /// f(t) 的 LaTeX 表示
    pub fn latex(&self) -> String {
        match *self {
            LearningModel::Quadratic { a, b, c } => {
                let mut out = String::new();
                push_term(&mut out, a, "t^{2}");
                push_term(&mut out, b, "t");
                push_term(&mut out, c, "");
                out
            }
            LearningModel::Logistic { ceiling, k, t0 } => format!(
                "\\frac{{{}}}{{1 + e^{{-{} ({})}}}}",
                fmt_num(ceiling),
                fmt_num(k),
                shifted_t(t0)
            ),
        }
    }

    /// F(t) 的 LaTeX 表示（不含积分常数）
    pub fn antiderivative_latex(&self) -> String {
        match *self {
            LearningModel::Quadratic { a, b, c } => {
                let mut out = String::new();
                push_term(&mut out, a / 3.0, "t^{3}");
                push_term(&mut out, b / 2.0, "t^{2}");
                push_term(&mut out, c, "t");
                out
            }
            LearningModel::Logistic { ceiling, k, t0 } => format!(
                "{} \\ln\\left(1 + e^{{{} ({})}}\\right)",
                fmt_num(ceiling / k),
                fmt_num(k),
                shifted_t(t0)
            ),
        }
    }
}

/// 数值稳定的 ln(1 + e^x)
fn softplus(x: f64) -> f64 {
    if x > 30.0 {
        // e^x 占绝对主导，ln(1 + e^x) ≈ x
        x
    } else {
        x.exp().ln_1p()
    }
}

/// 把系数格式化为不带多余小数位的字符串
fn fmt_num(x: f64) -> String {
    if x == x.trunc() && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        let s = format!("{:.6}", x);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// "t - t0" 字面量，t0 为负时翻转符号
fn shifted_t(t0: f64) -> String {
    if t0 >= 0.0 {
        format!("t - {}", fmt_num(t0))
    } else {
        format!("t + {}", fmt_num(-t0))
    }
}

/// 追加一个带符号的多项式项，零系数跳过
fn push_term(out: &mut String, coef: f64, suffix: &str) {
    if coef == 0.0 {
        return;
    }
    if out.is_empty() {
        if coef < 0.0 {
            out.push('-');
        }
    } else if coef < 0.0 {
        out.push_str(" - ");
    } else {
        out.push_str(" + ");
    }
    let mag = coef.abs();
    if suffix.is_empty() {
        out.push_str(&fmt_num(mag));
    } else if mag == 1.0 {
        out.push_str(suffix);
    } else {
        out.push_str(&fmt_num(mag));
        out.push(' ');
        out.push_str(suffix);
    }
}
