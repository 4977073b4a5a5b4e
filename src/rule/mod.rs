//! 规则模块：负责追踪器列表加载、基线规则读写、规则合并
pub mod model;
pub mod loader;
pub mod store;
pub mod reconciler;

// 导出核心接口
pub use self::model::{Rule, TrackerRecord};
pub use self::loader::RegistryLoader;
pub use self::store::RuleFileManager;
pub use self::reconciler::{
    reconcile, ReconcileOptions, ReconcileOutcome, ReconcileStats, Reconciler,
};
