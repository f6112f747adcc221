//! # 业务逻辑服务模块
//!
//! 包含仪表盘数据流的全部实现，与 HTTP 层解耦：
//! - `loader` - CSV 文件解析为内存数据集
//! - `cache` - 进程级数据集缓存（记忆化加载器）
//! - `filter` - 按情感标签筛选
//! - `metrics` - 指标卡片计算
//! - `visualization` - 饼图与词云数据派生
//! - `table` - 数据表排序
//! - `pipeline` - 把以上阶段串成一次完整执行

pub mod cache;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod table;
pub mod visualization;
