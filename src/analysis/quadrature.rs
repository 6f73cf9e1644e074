//! Adaptive quadrature
//!
//! 自适应 Simpson 法：区间二分直到局部误差满足容差，
//! 收敛时做一次 Richardson 外推（误差除以 15）。

/// 递归深度上限，防止病态被积函数导致栈溢出
const MAX_DEPTH: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    pub value: f64,
    /// 各收敛区间局部误差估计的累加
    pub error_estimate: f64,
    /// 被积函数求值次数
    pub evaluations: u32,
}

/// 计算 ∫ₐᵇ f(t) dt
///
/// 退化区间（a == b）直接返回 0。a > b 时按积分方向约定返回相反数。
pub fn integrate<F>(f: F, a: f64, b: f64, tol: f64) -> QuadratureResult
where
    F: Fn(f64) -> f64,
{
    if a == b {
        return QuadratureResult {
            value: 0.0,
            error_estimate: 0.0,
            evaluations: 0,
        };
    }
    if a > b {
        let mut result = integrate(f, b, a, tol);
        result.value = -result.value;
        return result;
    }

    let mut evaluations = 0u32;
    let mut error_estimate = 0.0f64;

    let fa = eval(&f, a, &mut evaluations);
    let fb = eval(&f, b, &mut evaluations);
    let m = 0.5 * (a + b);
    let fm = eval(&f, m, &mut evaluations);
    let whole = simpson(a, b, fa, fm, fb);

    let value = adaptive(
        &f,
        a,
        b,
        fa,
        fm,
        fb,
        whole,
        tol,
        0,
        &mut evaluations,
        &mut error_estimate,
    );

    QuadratureResult {
        value,
        error_estimate,
        evaluations,
    }
}

fn eval<F: Fn(f64) -> f64>(f: &F, x: f64, evaluations: &mut u32) -> f64 {
    *evaluations += 1;
    f(x)
}

/// 单个 Simpson 面板
fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn adaptive<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tol: f64,
    depth: u32,
    evaluations: &mut u32,
    error_estimate: &mut f64,
) -> f64 {
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = eval(f, lm, evaluations);
    let frm = eval(f, rm, evaluations);

    let left = simpson(a, m, fa, flm, fm);
    let right = simpson(m, b, fm, frm, fb);
    let delta = left + right - whole;

    if depth >= MAX_DEPTH || delta.abs() <= 15.0 * tol {
        *error_estimate += delta.abs() / 15.0;
        return left + right + delta / 15.0;
    }

    let half_tol = 0.5 * tol;
    adaptive(
        f,
        a,
        m,
        fa,
        flm,
        fm,
        left,
        half_tol,
        depth + 1,
        evaluations,
        error_estimate,
    ) + adaptive(
        f,
        m,
        b,
        fm,
        frm,
        fb,
        right,
        half_tol,
        depth + 1,
        evaluations,
        error_estimate,
    )
}
