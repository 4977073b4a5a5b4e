//! 搜索关键字提取工具
//! 负责把 Exodus 的 code_signature 拆分为下游包名匹配使用的关键字

/// 关键字提取工具
pub struct KeywordExtractor;

impl KeywordExtractor {
    /// code_signature 中多个签名的分隔符
    pub const SIGNATURE_SEPARATOR: char = '|';

    /// 从 code_signature 提取关键字
    /// 按 `|` 拆分，去除首尾空白和空片段，保持首次出现顺序去重
    pub fn from_code_signature(signature: &str) -> Vec<String> {
        signature
            .split(Self::SIGNATURE_SEPARATOR)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .fold(Vec::new(), |mut keywords, piece| {
                if !keywords.iter().any(|k: &String| k == piece) {
                    keywords.push(piece.to_string());
                }
                keywords
            })
    }
}
