//! # 数据模型模块
//!
//! 定义了仪表盘使用的 Rust 数据结构。
//! 需要输出到前端的结构体均派生 `Serialize`，用于 JSON 接口和页面内嵌的图表数据。
//! - `tweet` - 推文记录、情感标签和数据集
//! - `dashboard` - 一次流水线执行产出的显示层数据
//! - `settings` - 命令行启动配置

pub mod dashboard;
pub mod settings;
pub mod tweet;
