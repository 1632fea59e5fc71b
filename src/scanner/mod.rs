use crate::error::{CostReportError, Result};
use crate::loader::is_supported_extension;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct WorkbookInfo {
    pub path: PathBuf,
    pub file_name: String,
    /// 拡張子を除いたファイル名（一括変換時の品番）
    pub stem: String,
}

/// フォルダ直下のワークブックを列挙
///
/// `~$` で始まるExcelのロックファイルは除外する。
pub fn scan_folder(folder: &Path) -> Result<Vec<WorkbookInfo>> {
    if !folder.is_dir() {
        return Err(CostReportError::FolderNotFound(folder.display().to_string()));
    }

    let mut workbooks = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let supported = path
            .extension()
            .map(|ext| is_supported_extension(&ext.to_string_lossy()))
            .unwrap_or(false);
        if !supported {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if file_name.starts_with("~$") {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        workbooks.push(WorkbookInfo {
            path: path.to_path_buf(),
            file_name,
            stem,
        });
    }

    // ファイル名でソート
    workbooks.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(workbooks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(CostReportError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_empty() {
        let dir = tempdir().unwrap();
        let result = scan_folder(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c-003.xlsx")).unwrap();
        File::create(dir.path().join("a-001.CSV")).unwrap();
        File::create(dir.path().join("b-002.ods")).unwrap();
        File::create(dir.path().join("~$c-003.xlsx")).unwrap();
        File::create(dir.path().join("readme.txt")).unwrap();
        std::fs::create_dir(dir.path().join("sub.xlsx")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        let names: Vec<&str> = result.iter().map(|w| w.file_name.as_str()).collect();
        assert_eq!(names, vec!["a-001.CSV", "b-002.ods", "c-003.xlsx"]);
        assert_eq!(result[0].stem, "a-001");
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("inner.xlsx")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert!(result.is_empty());
    }
}
