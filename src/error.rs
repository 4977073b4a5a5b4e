//! 全局错误类型定义
//! 三类错误均为致命错误：传输失败、解析失败、本地文件读写失败

use std::fmt;
use std::io::Error as IoError;
use std::path::PathBuf;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum ExodusError {
    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),
    #[error("远程规则源 {url} 返回状态码 {status}")]
    RemoteStatus { url: String, status: u16 },
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("追踪器列表格式错误：{0}")]
    RegistryFormat(String),

    // 本地文件错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("文件 {} 读写失败：{source}", .path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 远程拉取无法完成（网络/DNS/HTTP）
    Transport,
    /// 远程或本地 JSON 不符合预期结构
    Parse,
    /// 本地文件缺失或不可写
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::Io => write!(f, "io"),
        }
    }
}

impl ExodusError {
    /// 包装带路径上下文的 IO 错误
    pub fn file(path: impl Into<PathBuf>, source: IoError) -> Self {
        ExodusError::FileError {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExodusError::HttpError(e) if e.is_decode() => ErrorKind::Parse,
            ExodusError::HttpError(_) | ExodusError::RemoteStatus { .. } | ExodusError::UrlError(_) => {
                ErrorKind::Transport
            }
            ExodusError::JsonError(_) | ExodusError::RegistryFormat(_) => ErrorKind::Parse,
            ExodusError::IoError(_) | ExodusError::FileError { .. } => ErrorKind::Io,
        }
    }
}

// 全局Result类型
pub type ExodusResult<T> = Result<T, ExodusError>;
