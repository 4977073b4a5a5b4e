//! 规则合并器
//! 将本地基线规则与 Exodus 追踪器列表合并为最终规则列表，纯数据转换，无 IO

use tracing::{debug, warn};

use super::model::{Rule, TrackerRecord};
use crate::config::{ExclusionList, GlobalConfig};

/// 合并选项
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// 补充阶段排除名单
    pub excluded_names: ExclusionList,
    /// 单次运行最多补充的追踪器数量
    pub supplemental_limit: usize,
    /// 过滤空关键字规则并从 0 重排 id
    pub reindex_output: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            excluded_names: ExclusionList::empty(),
            supplemental_limit: 1,
            reindex_output: true,
        }
    }
}

impl From<&GlobalConfig> for ReconcileOptions {
    fn from(config: &GlobalConfig) -> Self {
        Self {
            excluded_names: config.excluded_names.clone(),
            supplemental_limit: config.supplemental_limit,
            reindex_output: config.reindex_output,
        }
    }
}

/// 合并统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// 被远程追踪器替换的基线规则
    pub replaced: usize,
    /// 原样保留的基线规则
    pub kept: usize,
    /// 无关键字且无远程匹配而丢弃的基线规则
    pub dropped: usize,
    /// 补充阶段新增的追踪器
    pub supplemental: usize,
    /// 重排阶段因关键字为空被过滤的规则
    pub filtered: usize,
}

/// 合并结果
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    pub rules: Vec<Rule>,
    pub stats: ReconcileStats,
}

/// 规则合并器
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// 执行合并
    pub fn reconcile(&self, baseline: &[Rule], remote: &[TrackerRecord]) -> ReconcileOutcome {
        let (merged, stats) = Self::merge_baseline(baseline, remote);
        let (merged, stats) = self.supplement(merged, remote, stats);

        if !self.options.reindex_output {
            return ReconcileOutcome { rules: merged, stats };
        }

        let before = merged.len();
        let rules = Self::reindex(merged);
        let stats = ReconcileStats {
            filtered: before - rules.len(),
            ..stats
        };
        ReconcileOutcome { rules, stats }
    }

    /// 基线阶段：同名追踪器覆盖基线规则，无关键字的基线规则丢弃
    fn merge_baseline(baseline: &[Rule], remote: &[TrackerRecord]) -> (Vec<Rule>, ReconcileStats) {
        baseline.iter().fold(
            (Vec::with_capacity(baseline.len() + 1), ReconcileStats::default()),
            |(mut rules, mut stats), rule| {
                match remote.iter().find(|tracker| tracker.name == rule.name) {
                    Some(tracker) => {
                        let converted = tracker.to_rule(position_id(rules.len()));
                        debug!("规则 [{}] 由远程追踪器替换，关键字数：{}", rule.name, converted.search_keyword.len());
                        rules.push(converted);
                        stats.replaced += 1;
                    }
                    None if !rule.has_keywords() => {
                        warn!("规则 [{}] 无搜索关键字且无远程匹配，已丢弃", rule.name);
                        stats.dropped += 1;
                    }
                    None => {
                        rules.push(rule.clone());
                        stats.kept += 1;
                    }
                }
                (rules, stats)
            },
        )
    }

    /// 补充阶段：按远程顺序取前 N 个未排除且名称（忽略大小写）未出现的追踪器
    fn supplement(
        &self,
        merged: Vec<Rule>,
        remote: &[TrackerRecord],
        stats: ReconcileStats,
    ) -> (Vec<Rule>, ReconcileStats) {
        let limit = self.options.supplemental_limit;
        let excluded = &self.options.excluded_names;

        remote
            .iter()
            .filter(|tracker| !excluded.contains(&tracker.name))
            .fold((merged, stats), |(mut rules, mut stats), tracker| {
                if stats.supplemental >= limit
                    || rules.iter().any(|rule| rule.name_eq_ignore_case(&tracker.name))
                {
                    return (rules, stats);
                }
                let converted = tracker.to_rule(position_id(rules.len()));
                debug!("补充远程追踪器 [{}]，id：{}", tracker.name, converted.id);
                rules.push(converted);
                stats.supplemental += 1;
                (rules, stats)
            })
    }

    /// 过滤空关键字规则并从 0 开始重排 id
    fn reindex(rules: Vec<Rule>) -> Vec<Rule> {
        rules
            .into_iter()
            .filter(Rule::has_keywords)
            .enumerate()
            .map(|(index, rule)| Rule {
                id: position_id(index),
                ..rule
            })
            .collect()
    }
}

/// 使用给定排除名单和默认选项合并
pub fn reconcile(baseline: &[Rule], remote: &[TrackerRecord], excluded: &ExclusionList) -> Vec<Rule> {
    Reconciler::new(ReconcileOptions {
        excluded_names: excluded.clone(),
        ..ReconcileOptions::default()
    })
    .reconcile(baseline, remote)
    .rules
}

fn position_id(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}
