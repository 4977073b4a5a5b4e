//! 导入流程
//! 拉取远程列表 -> 读取基线 -> 合并 -> 写出

use std::fmt;

use tracing::info;

use crate::config::GlobalConfig;
use crate::error::ExodusResult;
use crate::rule::{
    ReconcileOptions, ReconcileStats, Reconciler, RegistryLoader, Rule, RuleFileManager,
    TrackerRecord,
};

/// 单次运行摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub remote_trackers: usize,
    pub baseline_rules: usize,
    pub output_rules: usize,
    pub stats: ReconcileStats,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "远程 {} / 基线 {} -> 输出 {}（替换 {}，保留 {}，丢弃 {}，补充 {}，过滤 {}）",
            self.remote_trackers,
            self.baseline_rules,
            self.output_rules,
            self.stats.replaced,
            self.stats.kept,
            self.stats.dropped,
            self.stats.supplemental,
            self.stats.filtered,
        )
    }
}

/// 导入流程
pub struct ImportPipeline {
    config: GlobalConfig,
    reconciler: Reconciler,
}

impl ImportPipeline {
    pub fn new(config: GlobalConfig) -> Self {
        let reconciler = Reconciler::new(ReconcileOptions::from(&config));
        Self { config, reconciler }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// 完整运行一次，任一步失败即终止
    pub async fn run(&self) -> ExodusResult<ImportSummary> {
        let trackers = RegistryLoader::fetch(&self.config).await?;
        let baseline = RuleFileManager::load_baseline(&self.config).await?;
        info!(
            "基线规则数：{}（{}）",
            baseline.len(),
            self.config.baseline_path.display()
        );

        let (rules, summary) = self.merge(&baseline, &trackers);

        RuleFileManager::save_output(&self.config, &rules).await?;
        info!("输出已写入 {}", self.config.output_path.display());
        Ok(summary)
    }

    /// 合并已加载的数据，不做任何 IO
    pub fn merge(&self, baseline: &[Rule], trackers: &[TrackerRecord]) -> (Vec<Rule>, ImportSummary) {
        if self.config.reindex_output {
            info!("输出前过滤空关键字规则并重排 id");
        } else {
            info!("保留合并顺序与原始 id，不做过滤重排");
        }

        let outcome = self.reconciler.reconcile(baseline, trackers);
        let summary = ImportSummary {
            remote_trackers: trackers.len(),
            baseline_rules: baseline.len(),
            output_rules: outcome.rules.len(),
            stats: outcome.stats,
        };
        info!("{}", summary);
        (outcome.rules, summary)
    }
}
