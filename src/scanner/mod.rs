use crate::error::{PrintCheckError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(PrintCheckError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 하위 폴더는 보지 않음
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_image = path
            .extension()
            .map(|ext| is_image_extension(&ext.to_string_lossy()))
            .unwrap_or(false);

        if is_image {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            images.push(ImageInfo {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // 파일명 순 정렬
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

fn is_image_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&lower.as_str())
}
