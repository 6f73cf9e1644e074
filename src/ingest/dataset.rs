//! Dataset construction
//!
//! 观测数据表：每行一个 (学习时长, IPK) 观测，可带学生档案字段。
//! 上传文件的列名契约沿用上游数据源：必需列 "Waktu Belajar" 与 "IPK"，
//! 档案列按文本读取。表只存活于单次请求，没有任何持久化。

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, StudycurveError};

pub const COL_STUDY_TIME: &str = "Waktu Belajar";
pub const COL_GPA: &str = "IPK";
pub const COL_NAME: &str = "Nama";
pub const COL_NPM: &str = "NPM";
pub const COL_COHORT: &str = "Angkatan";
pub const COL_PROGRAM: &str = "Program Studi";
pub const COL_UNIVERSITY: &str = "Universitas";

pub const ERR_MISSING_COLUMN: &str =
    "required column 'Waktu Belajar' or 'IPK' not found in uploaded file";

/// 单行观测
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub study_time: f64,
    pub gpa: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
}

impl Observation {
    pub fn new(study_time: f64, gpa: f64) -> Self {
        Observation {
            study_time,
            gpa,
            name: None,
            npm: None,
            cohort: None,
            program: None,
            university: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Observation>,
}

/// 上传文件中各列的索引位置
struct ColumnLayout {
    study_time: usize,
    gpa: usize,
    name: Option<usize>,
    npm: Option<usize>,
    cohort: Option<usize>,
    program: Option<usize>,
    university: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |col: &str| headers.iter().position(|h| h.trim() == col);

        let (Some(study_time), Some(gpa)) = (find(COL_STUDY_TIME), find(COL_GPA)) else {
            return Err(StudycurveError::missing_column(ERR_MISSING_COLUMN));
        };

        Ok(ColumnLayout {
            study_time,
            gpa,
            name: find(COL_NAME),
            npm: find(COL_NPM),
            cohort: find(COL_COHORT),
            program: find(COL_PROGRAM),
            university: find(COL_UNIVERSITY),
        })
    }
}

impl Dataset {
    /// 从上传的 CSV 字节构建数据表
    ///
    /// 必需列缺失时返回指定的列错误，不产生任何行。
    /// 数值单元格解析失败按行号（1-based，含表头）报告。
    pub fn from_csv_bytes(data: &[u8]) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let headers = reader.headers().map_err(StudycurveError::from)?.clone();
        let layout = ColumnLayout::from_headers(&headers)?;

        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let row_num = row_idx + 2; // 跳过表头
            let record = record.map_err(|e| {
                StudycurveError::csv_parse(format!("row {}: {}", row_num, e))
            })?;

            let study_time = parse_cell(&record, layout.study_time, COL_STUDY_TIME, row_num)?;
            let gpa = parse_cell(&record, layout.gpa, COL_GPA, row_num)?;

            rows.push(Observation {
                study_time,
                gpa,
                name: text_cell(&record, layout.name),
                npm: text_cell(&record, layout.npm),
                cohort: text_cell(&record, layout.cohort),
                program: text_cell(&record, layout.program),
                university: text_cell(&record, layout.university),
            });
        }

        debug!("parsed {} observation rows from uploaded CSV", rows.len());
        Ok(Dataset { rows })
    }

    /// 从手动输入的行构建数据表，逐行校验取值范围
    pub fn from_rows(rows: Vec<Observation>) -> Result<Dataset> {
        for (idx, row) in rows.iter().enumerate() {
            let row_num = idx + 1;
            if !row.study_time.is_finite() || row.study_time < 0.0 {
                return Err(StudycurveError::validation(format!(
                    "row {}: study time must be non-negative",
                    row_num
                )));
            }
            if !row.gpa.is_finite() || !(0.0..=4.0).contains(&row.gpa) {
                return Err(StudycurveError::validation(format!(
                    "row {}: GPA must be within [0, 4]",
                    row_num
                )));
            }
        }
        Ok(Dataset { rows })
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 学习时长的 (min, max)，空表返回 None
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.rows.iter().map(|r| r.study_time);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some((min, max))
    }
}

fn parse_cell(
    record: &csv::StringRecord,
    idx: usize,
    col: &str,
    row_num: usize,
) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("");
    // NaN/inf 能通过 f64 解析，但对积分边界没有意义，一并拒绝
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            StudycurveError::csv_parse(format!(
                "row {}: invalid number '{}' in column '{}'",
                row_num, raw, col
            ))
        })
}

fn text_cell(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
