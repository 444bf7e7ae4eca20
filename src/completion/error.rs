//! 补全模块错误类型

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type HistoryResult<T> = Result<T, HistoryError>;

/// 历史记录持久化错误
///
/// 所有变体都是可恢复的：内存中的历史在出错后依然可用。
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error while {context} ({}): {source}", .path.display())]
    Io {
        context: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HistoryError {
    pub fn io(context: impl Into<String>, path: &Path, source: std::io::Error) -> Self {
        HistoryError::Io {
            context: context.into(),
            path: path.to_path_buf(),
            source,
        }
    }

    /// 出错的历史文件路径
    pub fn path(&self) -> &Path {
        match self {
            HistoryError::Io { path, .. } => path,
        }
    }
}
