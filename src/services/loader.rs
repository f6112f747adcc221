//! # CSV 数据加载服务
//!
//! 读取上游生成的 `processed_tweets.csv`，解析为内存中的 `Dataset`。
//!
//! ## 解析策略
//! - 使用 `tokio::fs::read` 一次性读取文件到字节缓冲区，再交给 `csv` 解析
//! - 按表头列名定位字段，多余的列忽略
//! - `CreatedAt` 解析为 UTC 时间，支持上游常见的几种格式
//! - 任何一行不合法都直接报错，不跳过：
//!   情感标签和分数是页面指标的基础，不能静默丢行

use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::errors::DashboardError;
use crate::models::tweet::{Dataset, Sentiment, TweetRecord};

/// 必需的列
const REQUIRED_COLUMNS: &[&str] = &["CreatedAt", "Text", "Sentiment", "SentimentScore"];

/// 带时区偏移的时间格式
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%a %b %d %H:%M:%S %z %Y",
];

/// 不带时区的时间格式（按 UTC 处理）
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

/// CSV 中的一行原始数据
///
/// 字段先按字符串读取，再在 `into_record` 中逐项校验，
/// 这样错误信息可以带上具体的列名和原始值。
#[derive(Debug, Deserialize)]
struct RawTweetRow {
    #[serde(rename = "CreatedAt")]
    created_at: String,
    #[serde(rename = "Text")]
    text: String,
    /// 上游清洗后为空的文本会写成空单元格，整列缺失也按空处理
    #[serde(rename = "CleanedText", default)]
    cleaned_text: Option<String>,
    #[serde(rename = "Sentiment")]
    sentiment: String,
    #[serde(rename = "SentimentScore")]
    sentiment_score: String,
}

impl RawTweetRow {
    fn into_record(self, line: u64) -> Result<TweetRecord, DashboardError> {
        let parse_error = |reason: String| DashboardError::Parse { line, reason };

        let created_at = parse_created_at(&self.created_at)
            .ok_or_else(|| parse_error(format!("无法解析 CreatedAt: {}", self.created_at)))?;

        let sentiment: Sentiment = self.sentiment.parse().map_err(parse_error)?;

        let sentiment_score = self
            .sentiment_score
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|score| score.is_finite())
            .ok_or_else(|| {
                parse_error(format!("无法解析 SentimentScore: {}", self.sentiment_score))
            })?;

        Ok(TweetRecord {
            created_at,
            text: self.text,
            cleaned_text: self.cleaned_text.unwrap_or_default(),
            sentiment,
            sentiment_score,
        })
    }
}

/// 读取并解析推文 CSV 文件
///
/// # 参数
/// - `path` - CSV 文件路径
///
/// # 返回值
/// 按文件顺序排列的完整数据集
///
/// # 错误
/// - 文件不存在：`DashboardError::MissingData`
/// - 文件无法读取：`DashboardError::Io`
/// - 缺少必需列或任意一行不合法：`DashboardError::Parse`
/// - 只有表头没有数据：`DashboardError::EmptyDataset`
pub async fn load_tweets(path: &Path) -> Result<Dataset, DashboardError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => DashboardError::MissingData {
            path: path.to_path_buf(),
        },
        _ => DashboardError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let records = parse_tweets(&bytes)?;
    if records.is_empty() {
        return Err(DashboardError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    log::info!("已加载 {} 条推文: {}", records.len(), path.display());

    Ok(Dataset {
        source: path.to_path_buf(),
        records,
    })
}

/// 解析 CSV 字节内容为推文记录列表
fn parse_tweets(bytes: &[u8]) -> Result<Vec<TweetRecord>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(&e, 1))?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(DashboardError::Parse {
                line: 1,
                reason: format!("缺少必需的列: {}", column),
            });
        }
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| csv_error(&e, 0))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw: RawTweetRow = row
            .deserialize(Some(&headers))
            .map_err(|e| DashboardError::Parse {
                line,
                reason: e.to_string(),
            })?;

        records.push(raw.into_record(line)?);
    }

    Ok(records)
}

fn csv_error(err: &csv::Error, fallback_line: u64) -> DashboardError {
    DashboardError::Parse {
        line: err.position().map(|p| p.line()).unwrap_or(fallback_line),
        reason: err.to_string(),
    }
}

/// 解析 `CreatedAt` 列
///
/// 依次尝试 RFC 3339、带偏移格式、无时区格式和纯日期；
/// 无时区的时间按 UTC 处理，纯日期取当天零点。
///
/// # 返回值
/// 所有格式都不匹配时返回 `None`
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "CreatedAt,Text,CleanedText,Sentiment,SentimentScore\n";

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_row_count_and_labels() {
        let file = write_csv(&format!(
            "{HEADER}\
             2025-10-20 10:00:00+00:00,Great deals!,great deals,Positive,0.66\n\
             2025-10-20 11:00:00+00:00,\"Late, again\",late,Negative,-0.4\n\
             2025-10-21 09:30:00+05:30,Order placed,order placed,Neutral,0.0\n"
        ));

        let dataset = load_tweets(file.path()).await.unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records[1].text, "Late, again");
        assert_eq!(
            dataset.records.iter().map(|r| r.sentiment).collect::<Vec<_>>(),
            vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
        );
        // +05:30 换算为 UTC
        assert_eq!(dataset.records[2].created_at.hour(), 4);
        assert_eq!(dataset.source.as_path(), file.path());
    }

    #[tokio::test]
    async fn test_extra_columns_and_missing_cleaned_text() {
        let file = write_csv(
            "Id,CreatedAt,Text,Sentiment,SentimentScore,User\n\
             1,2025-10-20,hello,Positive,0.5,someone\n",
        );

        let dataset = load_tweets(file.path()).await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].cleaned_text, "");
        assert_eq!(
            dataset.records[0].created_at,
            Utc.with_ymd_and_hms(2025, 10, 20, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_empty_cleaned_text_cell() {
        let file = write_csv(&format!("{HEADER}2025-10-20 10:00:00,!!!,,Neutral,0\n"));
        let dataset = load_tweets(file.path()).await.unwrap();
        assert_eq!(dataset.records[0].cleaned_text, "");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_tweets.csv");

        let err = load_tweets(&path).await.unwrap_err();
        assert_eq!(err, DashboardError::MissingData { path });
    }

    #[tokio::test]
    async fn test_unknown_label_is_rejected() {
        let file = write_csv(&format!(
            "{HEADER}\
             2025-10-20 10:00:00,ok,ok,Positive,0.1\n\
             2025-10-20 10:00:00,meh,meh,Mixed,0.1\n"
        ));

        match load_tweets(file.path()).await.unwrap_err() {
            DashboardError::Parse { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("Mixed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_finite_score_is_rejected() {
        let file = write_csv(&format!("{HEADER}2025-10-20 10:00:00,a,a,Positive,NaN\n"));
        assert!(matches!(
            load_tweets(file.path()).await.unwrap_err(),
            DashboardError::Parse { line: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_column_is_rejected() {
        let file = write_csv("CreatedAt,Text,SentimentScore\n2025-10-20,a,0.1\n");
        match load_tweets(file.path()).await.unwrap_err() {
            DashboardError::Parse { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains("Sentiment"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_header_only_file() {
        let file = write_csv(HEADER);
        assert!(matches!(
            load_tweets(file.path()).await.unwrap_err(),
            DashboardError::EmptyDataset { .. }
        ));
    }

    #[test]
    fn test_parse_created_at_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 10, 20, 10, 15, 0).unwrap();
        assert_eq!(parse_created_at("2025-10-20T10:15:00Z"), Some(expected));
        assert_eq!(parse_created_at("2025-10-20 10:15:00+00:00"), Some(expected));
        assert_eq!(parse_created_at("2025-10-20 12:15:00+0200"), Some(expected));
        assert_eq!(parse_created_at("2025-10-20 10:15:00"), Some(expected));
        assert_eq!(parse_created_at("2025-10-20 10:15:00.000"), Some(expected));
        assert_eq!(parse_created_at("Mon Oct 20 10:15:00 +0000 2025"), Some(expected));
        assert_eq!(parse_created_at("yesterday"), None);
        assert_eq!(parse_created_at("  "), None);
    }
}
