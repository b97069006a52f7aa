//! Native photo importer: turns local image files into inline photo
//! records for a pin's photo list.

use std::fs;
use std::path::Path;

use base64::Engine as _;
use chrono::Utc;

use model::pin::Photo;
use store::contracts::PhotoSource;

/// Reads image files from disk and embeds them as `data:` URLs.
///
/// Per the photo-import contract:
/// - the photo id is derived from the file content (stable across re-imports
///   of the same bytes);
/// - the caption defaults to the file stem;
/// - the date taken defaults to today;
/// - unreadable files are skipped silently.
#[derive(Debug, Default)]
pub struct FilePhotoSource;

impl FilePhotoSource {
    pub fn new() -> Self {
        Self
    }
}

impl PhotoSource for FilePhotoSource {
    fn import(&self, files: &[&Path]) -> Vec<Photo> {
        files.iter().filter_map(|path| read_photo(path)).collect()
    }
}

fn read_photo(path: &Path) -> Option<Photo> {
    let bytes = fs::read(path).ok()?;
    let id = photo_id(&bytes);
    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
    let url = format!("data:{};base64,{b64}", mime_for(path));
    let caption = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());
    Some(Photo {
        id,
        url,
        caption,
        date_taken: Some(Utc::now().date_naive()),
    })
}

/// Content-derived id. Photo ids only need to be unique within their
/// parent pin, so a truncated content hash is plenty.
pub fn photo_id(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex()[..16].to_string()
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::{FilePhotoSource, photo_id};
    use chrono::Utc;
    use std::path::PathBuf;
    use store::contracts::PhotoSource;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("pinpoint-import-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn imports_caption_from_file_stem_and_dates_today() {
        let path = scratch_file("golden-pavilion.jpg", b"not really a jpeg");
        let photos = FilePhotoSource::new().import(&[&path]);
        assert_eq!(photos.len(), 1);
        let photo = &photos[0];
        assert!(photo.url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(
            photo.caption.as_deref(),
            path.file_stem().map(|s| s.to_str().unwrap())
        );
        assert_eq!(photo.date_taken, Some(Utc::now().date_naive()));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unreadable_files_are_skipped_not_errors() {
        let missing = PathBuf::from("/definitely/not/here.png");
        let real = scratch_file("real.png", b"pixels");
        let photos = FilePhotoSource::new().import(&[missing.as_path(), real.as_path()]);
        assert_eq!(photos.len(), 1);
        std::fs::remove_file(&real).unwrap();
    }

    #[test]
    fn photo_ids_are_stable_for_identical_content() {
        assert_eq!(photo_id(b"same"), photo_id(b"same"));
        assert_ne!(photo_id(b"same"), photo_id(b"different"));
        assert_eq!(photo_id(b"same").len(), 16);
    }
}
