//! SVG plot rendering
//!
//! 散点（观测数据）+ 模型曲线 + 积分区域阴影，纯字符串拼接生成 SVG，
//! 输出对同一输入完全确定。

use std::fmt::Write;

use crate::analysis::model::LearningModel;
use crate::ingest::Dataset;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// 模型曲线采样点数
const CURVE_SAMPLES: usize = 100;

const COLOR_SCATTER: &str = "#d62728";
const COLOR_CURVE: &str = "#1f77b4";
const COLOR_AREA: &str = "#17becf";
const COLOR_AXIS: &str = "#333333";
const COLOR_GRID: &str = "#dddddd";

/// Render the scatter + model curve + shaded integral area plot.
pub fn render_plot(dataset: &Dataset, model: &LearningModel, start: f64, end: f64) -> String {
    // 退化区间（单一观测值）仍要可画，左右各扩半小时
    let (x_min, x_max) = if (end - start).abs() < f64::EPSILON {
        (start - 0.5, end + 0.5)
    } else {
        (start, end)
    };

    let samples: Vec<(f64, f64)> = (0..=CURVE_SAMPLES)
        .map(|i| {
            let t = x_min + (x_max - x_min) * (i as f64) / (CURVE_SAMPLES as f64);
            (t, model.value(t))
        })
        .collect();

    let mut y_max = samples.iter().map(|&(_, v)| v).fold(0.0f64, f64::max);
    for row in dataset.rows() {
        y_max = y_max.max(row.gpa);
    }
    // 顶端留白
    let y_max = (y_max * 1.1).max(1.0);

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x_px = |t: f64| MARGIN_LEFT + (t - x_min) / (x_max - x_min) * plot_w;
    let y_px = |v: f64| MARGIN_TOP + plot_h - (v.max(0.0) / y_max * plot_h);
    let y_base = MARGIN_TOP + plot_h;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         width=\"{WIDTH}\" height=\"{HEIGHT}\" font-family=\"Roboto, sans-serif\">"
    );
    let _ = write!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");

    // 网格与刻度
    for i in 0..=5 {
        let frac = i as f64 / 5.0;

        let gx = MARGIN_LEFT + frac * plot_w;
        let _ = write!(
            svg,
            "<line x1=\"{gx:.2}\" y1=\"{MARGIN_TOP:.2}\" x2=\"{gx:.2}\" y2=\"{y_base:.2}\" \
             stroke=\"{COLOR_GRID}\" stroke-width=\"1\"/>"
        );
        let tick_x = x_min + frac * (x_max - x_min);
        let _ = write!(
            svg,
            "<text x=\"{gx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"11\" \
             fill=\"{COLOR_AXIS}\">{tick_x:.1}</text>",
            y_base + 16.0
        );

        let gy = MARGIN_TOP + plot_h - frac * plot_h;
        let _ = write!(
            svg,
            "<line x1=\"{MARGIN_LEFT:.2}\" y1=\"{gy:.2}\" x2=\"{:.2}\" y2=\"{gy:.2}\" \
             stroke=\"{COLOR_GRID}\" stroke-width=\"1\"/>",
            MARGIN_LEFT + plot_w
        );
        let tick_y = frac * y_max;
        let _ = write!(
            svg,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-size=\"11\" \
             fill=\"{COLOR_AXIS}\">{tick_y:.1}</text>",
            MARGIN_LEFT - 8.0,
            gy + 4.0
        );
    }

    // 积分区域阴影（曲线与 y = 0 之间）
    let mut area_path = format!("M {:.2} {:.2}", x_px(samples[0].0), y_base);
    for &(t, v) in &samples {
        let _ = write!(area_path, " L {:.2} {:.2}", x_px(t), y_px(v));
    }
    let _ = write!(area_path, " L {:.2} {:.2} Z", x_px(samples[samples.len() - 1].0), y_base);
    let _ = write!(
        svg,
        "<path d=\"{area_path}\" fill=\"{COLOR_AREA}\" fill-opacity=\"0.2\" stroke=\"none\"/>"
    );

    // 模型曲线
    let mut points = String::new();
    for &(t, v) in &samples {
        let _ = write!(points, "{:.2},{:.2} ", x_px(t), y_px(v));
    }
    let _ = write!(
        svg,
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{COLOR_CURVE}\" stroke-width=\"2\"/>",
        points.trim_end()
    );

    // 观测散点
    for row in dataset.rows() {
        let _ = write!(
            svg,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{COLOR_SCATTER}\"/>",
            x_px(row.study_time),
            y_px(row.gpa)
        );
    }

    // 坐标轴
    let _ = write!(
        svg,
        "<line x1=\"{MARGIN_LEFT:.2}\" y1=\"{MARGIN_TOP:.2}\" x2=\"{MARGIN_LEFT:.2}\" \
         y2=\"{y_base:.2}\" stroke=\"{COLOR_AXIS}\" stroke-width=\"1.5\"/>"
    );
    let _ = write!(
        svg,
        "<line x1=\"{MARGIN_LEFT:.2}\" y1=\"{y_base:.2}\" x2=\"{:.2}\" y2=\"{y_base:.2}\" \
         stroke=\"{COLOR_AXIS}\" stroke-width=\"1.5\"/>",
        MARGIN_LEFT + plot_w
    );

    // 标题与轴标签
    let _ = write!(
        svg,
        "<text x=\"{:.2}\" y=\"24\" text-anchor=\"middle\" font-size=\"15\" \
         fill=\"{COLOR_AXIS}\">Learning Effect of Study Time on GPA ({})</text>",
        WIDTH / 2.0,
        model.name()
    );
    let _ = write!(
        svg,
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"12\" \
         fill=\"{COLOR_AXIS}\">Waktu Belajar (jam)</text>",
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 12.0
    );
    let _ = write!(
        svg,
        "<text x=\"16\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"12\" \
         fill=\"{COLOR_AXIS}\" transform=\"rotate(-90 16 {:.2})\">IPK</text>",
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    );

    // 图例
    let legend_x = MARGIN_LEFT + plot_w - 150.0;
    let legend_y = MARGIN_TOP + 10.0;
    let _ = write!(
        svg,
        "<circle cx=\"{legend_x:.2}\" cy=\"{legend_y:.2}\" r=\"4\" fill=\"{COLOR_SCATTER}\"/>\
         <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"11\" fill=\"{COLOR_AXIS}\">Observed data</text>",
        legend_x + 10.0,
        legend_y + 4.0
    );
    let _ = write!(
        svg,
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{COLOR_CURVE}\" \
         stroke-width=\"2\"/>\
         <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"11\" fill=\"{COLOR_AXIS}\">Model curve</text>",
        legend_x - 6.0,
        legend_y + 18.0,
        legend_x + 6.0,
        legend_y + 18.0,
        legend_x + 10.0,
        legend_y + 22.0
    );
    let _ = write!(
        svg,
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"12\" height=\"8\" fill=\"{COLOR_AREA}\" \
         fill-opacity=\"0.4\"/>\
         <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"11\" fill=\"{COLOR_AXIS}\">Integral area</text>",
        legend_x - 6.0,
        legend_y + 30.0,
        legend_x + 10.0,
        legend_y + 38.0
    );

    svg.push_str("</svg>");
    svg
}
