//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::utils::KeywordExtractor;

/// Exodus 追踪器记录（远程列表中 `trackers` 的单个条目）
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TrackerRecord {
    // 来源分配的编号，下游不使用
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code_signature: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub network_signature: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub creation_date: String,
}

impl TrackerRecord {
    /// 以名称快速创建（测试与手工补录使用）
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_code_signature(mut self, signature: impl Into<String>) -> Self {
        self.code_signature = signature.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 转换为通用规则，`id` 为其在输出中的位置
    pub fn to_rule(&self, id: i32) -> Rule {
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Rule {
            id,
            name: self.name.clone(),
            search_keyword: KeywordExtractor::from_code_signature(&self.code_signature),
            description,
            ..Rule::default()
        }
    }
}

// 远程字段可能为 null
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for TrackerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.code_signature)
    }
}

/// 通用规则（基线文件与输出文件共用的结构）
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub search_keyword: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_regex_search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_to_block: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effect: Option<String>,
    #[serde(default)]
    pub contributors: Vec<String>,

    // 其余描述字段原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rule {
    pub fn new(id: i32, name: impl Into<String>, search_keyword: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            search_keyword,
            ..Self::default()
        }
    }

    /// 是否具备拦截能力
    pub fn has_keywords(&self) -> bool {
        !self.search_keyword.is_empty()
    }

    /// 名称忽略大小写比较
    pub fn name_eq_ignore_case(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}
