//! ファイルI/O操作
//!
//! UTF-8テキストファイルの全読み・全書き。対象は小さな
//! ユーザファイルなので同期I/Oで足りる。

use crate::error::{FileError, Result, TallypadError};
use std::fs;
use std::path::Path;

/// ファイルからテキストを全読みする
///
/// 欠落ファイルは `FileError::NotFound` を返す。呼び出し側は
/// これを致命的エラーにせず、ログして既存バッファを維持する。
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TallypadError::File(FileError::NotFound {
            path: path.display().to_string(),
        }));
    }

    if path.is_dir() {
        return Err(TallypadError::File(FileError::InvalidPath {
            path: path.display().to_string(),
        }));
    }

    let content = fs::read_to_string(path)?;

    if content.contains('\r') {
        log::warn!("Non-LF line endings detected in {}", path.display());
    }

    Ok(content)
}

/// テキストをファイルに全書きする
///
/// 一時ファイルに書いてからリネームする（書き込み途中の
/// 保存先を観測させない）。
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FileError, TallypadError};
    use tempfile::tempdir;

    #[test]
    fn write_and_read_round_trip() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        let content = "Hello, World!\nこんにちは！";

        write_file(&file_path, content).unwrap();
        assert_eq!(read_file(&file_path).unwrap(), content);
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("absent.txt");

        match read_file(&file_path) {
            Err(TallypadError::File(FileError::NotFound { path })) => {
                assert!(path.contains("absent.txt"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn directory_is_invalid_path() {
        let temp_dir = tempdir().unwrap();

        assert!(matches!(
            read_file(temp_dir.path()),
            Err(TallypadError::File(FileError::InvalidPath { .. }))
        ));
    }

    #[test]
    fn write_creates_parent_directories() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("file.txt");

        write_file(&nested, "data").unwrap();
        assert_eq!(read_file(&nested).unwrap(), "data");
    }
}
