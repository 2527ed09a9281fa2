use crate::core::Storage;
use crate::domain::model::{DuplicatePolicy, PhotoFile};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Picks the directory entries whose stem contains at least one barcode.
///
/// Entries are not filtered by type, so a subdirectory named after a barcode
/// is collected too.
pub fn locate_photos(
    entries: &[PathBuf],
    barcodes: &[String],
    policy: DuplicatePolicy,
) -> Vec<PhotoFile> {
    let mut photos = Vec::new();

    for photo in entries.iter().filter_map(|p| PhotoFile::from_path(p.clone())) {
        let matches = barcodes
            .iter()
            .filter(|barcode| photo.stem.contains(barcode.as_str()))
            .count();

        let copies = match policy {
            DuplicatePolicy::Unique => matches.min(1),
            DuplicatePolicy::PerMatch => matches,
        };

        if matches > 1 {
            tracing::debug!("{} matched {} barcodes", photo.name, matches);
        }
        photos.extend(std::iter::repeat(photo).take(copies));
    }

    photos
}

pub async fn scan_photo_directory<S: Storage>(
    storage: &S,
    directory: &Path,
    barcodes: &[String],
    policy: DuplicatePolicy,
) -> Result<Vec<PhotoFile>> {
    let entries = storage.list_dir(directory).await?;
    let photos = locate_photos(&entries, barcodes, policy);
    tracing::info!(
        "🔍 {} of {} entries in {} match a barcode",
        photos.len(),
        entries.len(),
        directory.display()
    );
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| Path::new("photos").join(n)).collect()
    }

    fn barcodes(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn names(photos: &[PhotoFile]) -> Vec<&str> {
        photos.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_only_matching_entries_collected() {
        let photos = locate_photos(
            &entries(&["123_front.jpg", "999_back.jpg", "notes.txt"]),
            &barcodes(&["123"]),
            DuplicatePolicy::Unique,
        );
        assert_eq!(names(&photos), vec!["123_front.jpg"]);
    }

    #[test]
    fn test_extension_is_not_a_match_surface() {
        let photos = locate_photos(
            &entries(&["front.123"]),
            &barcodes(&["123"]),
            DuplicatePolicy::Unique,
        );
        assert!(photos.is_empty());
    }

    #[test]
    fn test_directories_named_after_barcodes_are_included() {
        let photos = locate_photos(
            &entries(&["123_set"]),
            &barcodes(&["123"]),
            DuplicatePolicy::Unique,
        );
        assert_eq!(names(&photos), vec!["123_set"]);
    }

    #[test]
    fn test_overlapping_barcodes_unique_policy() {
        let photos = locate_photos(
            &entries(&["12345.jpg"]),
            &barcodes(&["123", "12345", "123"]),
            DuplicatePolicy::Unique,
        );
        assert_eq!(names(&photos), vec!["12345.jpg"]);
    }

    #[test]
    fn test_overlapping_barcodes_per_match_policy() {
        let photos = locate_photos(
            &entries(&["12345.jpg", "777.jpg"]),
            &barcodes(&["123", "12345", "123"]),
            DuplicatePolicy::PerMatch,
        );
        assert_eq!(names(&photos), vec!["12345.jpg", "12345.jpg", "12345.jpg"]);
    }

    #[test]
    fn test_no_barcodes_no_photos() {
        let photos = locate_photos(&entries(&["123.jpg"]), &[], DuplicatePolicy::PerMatch);
        assert!(photos.is_empty());
    }
}
