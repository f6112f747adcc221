//! # 错误类型
//!
//! 数据加载阶段的终止性错误。任何一种错误出现后，页面只渲染错误面板，
//! 不再继续执行筛选、指标和可视化阶段。
//!
//! 注意：“未选择任何情感类别”不是错误，而是流水线的一个正常状态
//! （见 `models::dashboard::Evaluation::EmptySelection`）。

use std::path::{Path, PathBuf};

use thiserror::Error;

/// 运行上游数据预处理的提示
const PREPARE_DATA_HINT: &str =
    "Please run the notebook '2_data_processing_and_eda.ipynb' first.";

/// 数据加载错误
///
/// 派生 `Clone` 是因为加载结果（包括失败）会被缓存，
/// 之后每次请求都直接返回缓存的副本。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// 数据文件不存在
    #[error("数据文件不存在: {}", path.display())]
    MissingData { path: PathBuf },

    /// 文件存在但无法读取
    #[error("读取数据文件失败: {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    /// CSV 内容不符合约定（缺列、非法标签、非法时间或分数）
    #[error("数据文件第 {line} 行解析失败: {reason}")]
    Parse { line: u64, reason: String },

    /// 文件只有表头，没有任何推文
    #[error("数据文件中没有任何推文: {}", path.display())]
    EmptyDataset { path: PathBuf },
}

impl DashboardError {
    /// 在页面上展示给用户的错误文本（逐行）
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            DashboardError::MissingData { path } => vec![
                format!("ERROR: '{}' not found.", file_name(path)),
                PREPARE_DATA_HINT.to_string(),
            ],
            DashboardError::Io { path, reason } => vec![
                format!("ERROR: could not read '{}': {}", file_name(path), reason),
            ],
            DashboardError::Parse { line, reason } => vec![
                format!("ERROR: malformed data on line {}: {}", line, reason),
                PREPARE_DATA_HINT.to_string(),
            ],
            DashboardError::EmptyDataset { path } => vec![
                format!("ERROR: '{}' contains no tweets.", file_name(path)),
                PREPARE_DATA_HINT.to_string(),
            ],
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
