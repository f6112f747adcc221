//! # 数据集缓存服务
//!
//! 进程级的记忆化加载器：以数据文件路径为 key，首次访问时加载，之后所有请求
//! 直接复用内存中的结果，不再读取文件。
//!
//! ## 缓存策略
//! - 没有 TTL，也不检测文件 mtime：数据在整个进程生命周期内不可变，
//!   只有重启进程才会重新加载
//! - 数据文件不存在（`MissingData`）同样会被缓存：本次会话内不重试，
//!   页面始终显示同一条错误信息
//! - 其他失败（读取错误、格式错误、空文件）不缓存，下一次请求重新读取文件
//!
//! ## 线程安全
//! 使用 `std::sync::RwLock` 保护映射表，锁不会跨越 `.await` 持有。
//! 命中缓存只需读锁；加载完成后短暂获取写锁写入结果。

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::errors::DashboardError;
use crate::models::tweet::Dataset;
use crate::services::loader;

/// 一次加载的结果
pub type LoadOutcome = Result<Arc<Dataset>, DashboardError>;

/// 应用全局缓存状态
///
/// 由 `server::AppState` 持有，所有请求处理函数共享同一个实例。
pub struct AppCache {
    /// 数据文件路径 → 加载结果
    datasets: RwLock<HashMap<PathBuf, LoadOutcome>>,
}

impl AppCache {
    /// 创建新的空缓存实例
    pub fn new() -> Self {
        Self {
            datasets: RwLock::new(HashMap::new()),
        }
    }

    /// 获取数据集：命中缓存直接返回，否则从文件加载并写入缓存
    ///
    /// # 参数
    /// - `path` - 数据文件路径（同时作为缓存 key）
    ///
    /// # 返回值
    /// - `Ok(dataset)` - 共享的只读数据集
    /// - `Err(MissingData)` - 首次加载时文件不存在（之后每次调用都返回同一错误）
    /// - `Err(e)` - 本次加载失败，未缓存
    pub async fn dataset(&self, path: &Path) -> LoadOutcome {
        if let Some(cached) = self.get_dataset(path) {
            return cached;
        }

        match loader::load_tweets(path).await.map(Arc::new) {
            Err(e @ DashboardError::MissingData { .. }) => {
                log::warn!("数据加载失败，本次会话不再重试: {}", e);
                self.set_dataset(path, Err(e))
            }
            Err(e) => {
                log::warn!("数据加载失败: {}", e);
                Err(e)
            }
            Ok(dataset) => self.set_dataset(path, Ok(dataset)),
        }
    }

    /// 读取缓存的加载结果
    ///
    /// # 返回值
    /// - `Some(outcome)` - 该路径已加载过
    /// - `None` - 尚未加载
    pub fn get_dataset(&self, path: &Path) -> Option<LoadOutcome> {
        let cache = self.datasets.read().ok()?;
        cache.get(path).cloned()
    }

    /// 写入加载结果
    ///
    /// 如果该路径已经有结果（并发请求先一步完成了加载），保留先写入的结果，
    /// 保证同一路径在进程内只对应一份数据。
    ///
    /// # 返回值
    /// 缓存中最终保存的结果
    pub fn set_dataset(&self, path: &Path, outcome: LoadOutcome) -> LoadOutcome {
        match self.datasets.write() {
            Ok(mut cache) => cache
                .entry(path.to_path_buf())
                .or_insert(outcome)
                .clone(),
            // 锁中毒时不缓存，直接返回本次结果
            Err(_) => outcome,
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}
