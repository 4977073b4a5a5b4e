//! 工具模块
pub mod keyword;

pub use self::keyword::KeywordExtractor;
