//! 全局配置管理,存储所有可配置项

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Exodus 追踪器列表接口
pub const EXODUS_TRACKERS_URL: &str = "https://reports.exodus-privacy.eu.org/api/trackers";

/// 补充阶段永不自动添加的广告 SDK
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "Pangle",
    "Supersonic Ads",
    "Sensors Analytics",
    "Bugly",
    "JiGuang Aurora Mobile JPush",
    "Baidu Mobile Ads",
    "Facebook Ads",
    "Amazon Advertisement",
    "Google AdMob",
    "Unity3d Ads",
    "Twitter MoPub",
];

/// 排除名单（精确匹配，区分大小写）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    names: BTreeSet<String>,
}

impl ExclusionList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// 空名单
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 远程追踪器列表地址
    pub registry_url: String,
    // 本地基线规则文件
    pub baseline_path: PathBuf,
    // 输出规则文件
    pub output_path: PathBuf,
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    pub user_agent: String,
    // 补充阶段排除名单
    pub excluded_names: ExclusionList,
    // 单次运行最多补充的追踪器数量
    pub supplemental_limit: usize,
    // 输出前过滤空关键字规则并重排 id
    pub reindex_output: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            registry_url: EXODUS_TRACKERS_URL.to_string(),
            baseline_path: PathBuf::from("blocker-rules.json"),
            output_path: PathBuf::from("general.json"),
            http_timeout: 30,
            user_agent: format!("ExodusImport/{}", env!("CARGO_PKG_VERSION")),
            excluded_names: ExclusionList::new(DEFAULT_EXCLUDED_NAMES.iter().copied()),
            supplemental_limit: 1,
            reindex_output: true,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn registry_url(mut self, url: impl Into<String>) -> Self {
        self.config.registry_url = url.into();
        self
    }

    pub fn baseline_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.baseline_path = path.into();
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn excluded_names(mut self, names: ExclusionList) -> Self {
        self.config.excluded_names = names;
        self
    }

    pub fn supplemental_limit(mut self, limit: usize) -> Self {
        self.config.supplemental_limit = limit;
        self
    }

    pub fn reindex_output(mut self, reindex: bool) -> Self {
        self.config.reindex_output = reindex;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
