//! 棋譜ファイルの列挙

use std::path::{Path, PathBuf};

/// `root` 以下の `.kif` ファイルを列挙する（拡張子の大文字小文字は区別しない、パス順）
pub fn collect_kif_files(root: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    collect_files(root, &["kif"])
}

/// `root` 以下で拡張子が `extensions` のいずれかに一致するファイルを列挙する
pub fn collect_files<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let p = entry.path();
        let matched = p
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want.as_ref())));
        if matched {
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
