//! # 路径工具函数
//!
//! 数据文件路径约定为相对于运行目录；启动时解析为绝对路径，
//! 既作为缓存 key，也用于日志输出。

use std::path::{Path, PathBuf};

/// 将数据文件路径解析为绝对路径
///
/// 相对路径基于当前工作目录（即运行目录）拼接；
/// 无法获取当前目录时（极端情况）原样返回。
///
/// # 示例
/// - 运行目录 `/srv/pulse`，参数 `data/processed_tweets.csv`
///   → `/srv/pulse/data/processed_tweets.csv`
/// - 绝对路径原样返回
pub fn resolve_data_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(e) => {
            log::warn!("无法获取当前工作目录，使用相对路径: {}", e);
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_is_kept() {
        let path = std::env::temp_dir().join("processed_tweets.csv");
        assert_eq!(resolve_data_path(&path), path);
    }

    #[test]
    fn test_relative_path_joins_run_directory() {
        let resolved = resolve_data_path(Path::new("data/processed_tweets.csv"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("data/processed_tweets.csv"));
    }
}
