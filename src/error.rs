//! エラーハンドリングシステム
//!
//! tallypad 全体で使用される統一されたエラー型を定義。
//! コア操作は致命的エラーを持たない方針（ファイル欠落はログして継続）。

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum TallypadError {
    /// ファイル操作エラー
    #[error("File operation failed")]
    File(#[from] FileError),

    /// バッファ操作エラー
    #[error("Buffer operation failed")]
    Buffer(#[from] BufferError),

    /// 拡張プロバイダのエラー
    #[error("Provider error")]
    Transform(#[from] TransformError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(String),

    /// パスエラー
    #[error("Path error: {0}")]
    Path(String),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// バッファ操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum BufferError {
    #[error("Invalid position: line {line}, column {column}")]
    InvalidPosition { line: usize, column: usize },

    #[error("Empty buffer")]
    Empty,
}

/// 拡張プロバイダ固有のエラー
///
/// プロバイダが文字列以外を返した場合もここに落とし、
/// 診断用に値の表示を保持する（バッファは変更しない）。
#[derive(Error, Debug, Clone)]
pub enum TransformError {
    #[error("Provider not found: {name}")]
    NotFound { name: String },

    #[error("Provider produced a non-textual result: {shown}")]
    NonTextual { shown: String },

    #[error("Provider failed: {message}")]
    Failed { message: String },
}

// std::io::Error から FileError 経由での変換
impl From<std::io::Error> for TallypadError {
    fn from(error: std::io::Error) -> Self {
        TallypadError::File(FileError::from(error))
    }
}

impl From<std::io::Error> for FileError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound {
                path: String::new(),
            },
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied {
                path: String::new(),
            },
            _ => FileError::Io {
                message: error.to_string(),
            },
        }
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, TallypadError>;
