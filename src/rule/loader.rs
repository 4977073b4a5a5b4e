//! 远程追踪器列表加载
//! 负责从 Exodus 拉取追踪器列表并解析为 TrackerRecord

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};
use url::Url;

use super::model::TrackerRecord;
use crate::config::GlobalConfig;
use crate::error::{ExodusError, ExodusResult};

/// Exodus 接口响应外层结构
#[derive(Debug, Deserialize)]
struct ExodusTrackerList {
    // 键为来源编号，值为追踪器对象，保持文档顺序
    #[serde(default)]
    trackers: Option<Map<String, Value>>,
}

/// 远程追踪器列表加载器
pub struct RegistryLoader;

impl RegistryLoader {
    /// 拉取并解析远程追踪器列表，不重试
    pub async fn fetch(config: &GlobalConfig) -> ExodusResult<Vec<TrackerRecord>> {
        let url = Url::parse(&config.registry_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        debug!("开始拉取追踪器列表，URL：{}", url);
        let response = client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExodusError::RemoteStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("追踪器列表下载完成，大小：{} 字节", bytes.len());

        let trackers = Self::parse_registry(&bytes)?;
        info!("远程追踪器数：{}", trackers.len());
        Ok(trackers)
    }

    /// 解析 `{"trackers": {...}}` 响应体
    pub fn parse_registry(bytes: &[u8]) -> ExodusResult<Vec<TrackerRecord>> {
        let list: ExodusTrackerList = serde_json::from_slice(bytes)?;
        let trackers = list
            .trackers
            .ok_or_else(|| ExodusError::RegistryFormat("缺少 trackers 字段".to_string()))?;

        trackers
            .into_iter()
            .map(|(key, value)| {
                let tracker: TrackerRecord = serde_json::from_value(value).map_err(|e| {
                    ExodusError::RegistryFormat(format!("追踪器 [{}] 解析失败：{}", key, e))
                })?;
                debug!("{}", tracker);
                Ok(tracker)
            })
            .collect()
    }
}
