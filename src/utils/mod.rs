//! # 通用工具函数
//! - `path` - 数据文件路径解析
//! - `query` - URL 查询字符串解析

pub mod path;
pub mod query;
