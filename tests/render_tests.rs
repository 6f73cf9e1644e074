//! SVG plot rendering tests

use studycurve::analysis::LearningModel;
use studycurve::ingest::{Dataset, Observation};
use studycurve::render::plot::render_plot;

fn dataset(rows: &[(f64, f64)]) -> Dataset {
    let rows = rows
        .iter()
        .map(|&(t, g)| Observation::new(t, g))
        .collect::<Vec<_>>();
    Dataset::from_rows(rows).expect("valid rows")
}

#[test]
fn test_plot_contains_expected_elements() {
    let data = dataset(&[(2.0, 3.0), (5.0, 3.4), (9.0, 3.8)]);
    let model = LearningModel::quadratic_default();
    let svg = render_plot(&data, &model, 2.0, 9.0);

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    // 模型曲线
    assert!(svg.contains("<polyline"));
    // 积分区域阴影
    assert!(svg.contains("fill-opacity=\"0.2\""));
    // 每个观测一个散点
    assert_eq!(svg.matches("r=\"4\"").count(), 3 + 1, "3 scatter + 1 legend dot");
    // 轴标签
    assert!(svg.contains("Waktu Belajar (jam)"));
    assert!(svg.contains("IPK"));
    // 模型名称出现在标题里
    assert!(svg.contains("quadratic"));
}

#[test]
fn test_plot_deterministic() {
    let data = dataset(&[(1.0, 2.5), (6.0, 3.5)]);
    let model = LearningModel::logistic_default();
    let a = render_plot(&data, &model, 1.0, 6.0);
    let b = render_plot(&data, &model, 1.0, 6.0);
    assert_eq!(a, b);
}

#[test]
fn test_plot_single_point_degenerate_range() {
    // a == b：区间退化仍要渲染出合法 SVG
    let data = dataset(&[(4.0, 3.0)]);
    let model = LearningModel::quadratic_default();
    let svg = render_plot(&data, &model, 4.0, 4.0);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<polyline"));
    assert!(!svg.contains("NaN"));
    assert!(!svg.contains("inf"));
}

#[test]
fn test_plot_no_observations_still_renders_curve() {
    let data = dataset(&[]);
    let model = LearningModel::logistic_default();
    let svg = render_plot(&data, &model, 0.0, 20.0);
    assert!(svg.contains("<polyline"));
    // 只有图例里的一个圆点
    assert_eq!(svg.matches("<circle").count(), 1);
}
