//! exodus-import - 合并 Exodus 追踪器列表与 Blocker 基线规则，生成通用规则文件

// 导出全局错误类型
pub use self::error::{ErrorKind, ExodusError, ExodusResult};

// 导出配置模块
pub use self::config::{
    ConfigManager, CustomConfigBuilder, ExclusionList, GlobalConfig, DEFAULT_EXCLUDED_NAMES,
    EXODUS_TRACKERS_URL,
};

// 导出规则模块核心接口
pub use self::rule::{
    reconcile, ReconcileOptions, ReconcileOutcome, ReconcileStats, Reconciler, RegistryLoader,
    Rule, RuleFileManager, TrackerRecord,
};

// 导出工具模块核心接口
pub use self::utils::KeywordExtractor;

// 导出流程接口
pub use self::pipeline::{ImportPipeline, ImportSummary};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod utils;
pub mod pipeline;
