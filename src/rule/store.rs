//! 本地规则文件读写
//! 读取基线规则文件，写出最终的通用规则文件（格式化 JSON）

use std::path::Path;

use tracing::debug;

use super::model::Rule;
use crate::config::GlobalConfig;
use crate::error::{ExodusError, ExodusResult};

/// 规则文件管理器
pub struct RuleFileManager;

impl RuleFileManager {
    /// 读取基线规则
    pub async fn load_baseline(config: &GlobalConfig) -> ExodusResult<Vec<Rule>> {
        Self::load_rules(&config.baseline_path).await
    }

    /// 从指定路径读取规则数组
    pub async fn load_rules(path: &Path) -> ExodusResult<Vec<Rule>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExodusError::file(path, e))?;
        let rules = Self::parse_baseline(&content)?;
        debug!("从 {} 读取规则数：{}", path.display(), rules.len());
        Ok(rules)
    }

    pub fn parse_baseline(content: &str) -> ExodusResult<Vec<Rule>> {
        Ok(serde_json::from_str(content)?)
    }

    /// 写出最终规则
    pub async fn save_output(config: &GlobalConfig, rules: &[Rule]) -> ExodusResult<()> {
        let path = config.output_path.as_path();
        let content = Self::render_output(rules)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ExodusError::file(parent, e))?;
        }

        tokio::fs::write(path, &content)
            .await
            .map_err(|e| ExodusError::file(path, e))?;
        debug!("规则已写入 {}，大小：{} 字节", path.display(), content.len());
        Ok(())
    }

    pub fn render_output(rules: &[Rule]) -> ExodusResult<String> {
        Ok(serde_json::to_string_pretty(rules)?)
    }
}
