//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量论文处理器
//! - 管理应用生命周期（初始化、运行）
//! - 检索论文（关键词 或 id 列表）
//! - 控制并发数量（Semaphore）
//! - 按输入顺序收集成功结果
//! - 持久化报告、选择渲染对象
//! - 输出全局统计信息
//!
//! ### `paper_processor` - 单篇论文处理器
//! - 串联单篇论文的完整流水线（下载 → 提取 → 摘要）
//! - 任何阶段失败只记录日志并丢弃该篇，不影响其他论文
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PaperRef>)
//!     ↓
//! paper_processor (处理单篇 PaperRef)
//!     ↓
//! services (能力层：search / fetch / extract / summarize / report / render)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，paper_processor 管单篇
//! 2. **失败隔离**：单篇论文的失败在单元边界吸收为 `None`
//! 3. **向下依赖**：编排层 → services
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod batch_processor;
pub mod paper_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use paper_processor::process_paper;
