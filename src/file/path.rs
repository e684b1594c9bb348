//! パス処理ユーティリティ
//!
//! ミニバッファで入力されたパスの展開（`~`、環境変数）と正規化。

use crate::error::{Result, TallypadError};
use std::env;
use std::path::{Component, Path, PathBuf};

/// ホームディレクトリを展開（`~` → `/home/user`）
fn expand_home<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home_dir = dirs::home_dir().ok_or_else(|| {
        TallypadError::Path("ホームディレクトリが取得できません".to_string())
    })?;

    if path_str == "~" {
        Ok(home_dir)
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home_dir.join(rest))
    } else {
        // ~user形式は未サポート
        Err(TallypadError::Path(
            "~user形式のパス展開は未サポートです".to_string(),
        ))
    }
}

/// 環境変数を展開（`$VAR` → 値）
fn expand_env<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path_str = path.as_ref().to_string_lossy().to_string();

    match shellexpand::env(&path_str) {
        Ok(expanded) => Ok(PathBuf::from(expanded.as_ref())),
        Err(e) => Err(TallypadError::Path(format!("環境変数展開エラー: {}", e))),
    }
}

/// パスを正規化（`.` や `..` を解決）
fn normalize<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let mut components = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => {
                if components.is_empty() {
                    return Err(TallypadError::Path(
                        "パスが不正です: ルートを超えた親ディレクトリ参照".to_string(),
                    ));
                }
                components.pop();
            }
            _ => components.push(component),
        }
    }

    let mut result = PathBuf::new();
    for component in components {
        result.push(component);
    }
    Ok(result)
}

/// 入力パスを展開して絶対パスにする
pub fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let expanded = expand_home(path)?;
    let expanded = expand_env(expanded)?;
    let normalized = normalize(expanded)?;

    if normalized.is_absolute() {
        Ok(normalized)
    } else {
        let current_dir = env::current_dir().map_err(|e| {
            TallypadError::Path(format!("現在のディレクトリが取得できません: {}", e))
        })?;
        Ok(current_dir.join(normalized))
    }
}
