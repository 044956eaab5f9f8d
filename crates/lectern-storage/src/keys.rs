//! Object-store key layout.
//!
//! All binary assets live under fixed prefixes keyed by the owning record's
//! opaque storage key:
//!
//! - `book-page/{material}/...`   converted page images of a book
//! - `temp/{material}/{file}`     raw PDF awaiting conversion (temp bucket)
//! - `audio/{page}/{audio}/{file}` narration clips
//! - `html-layer/{page}/layer.html` per-page HTML overlay

use uuid::Uuid;

/// Prefix under which all of a book's page images live. Deleting this
/// prefix removes the book's entire object-store folder.
pub fn material_prefix(storage_key: Uuid) -> String {
    format!("book-page/{storage_key}/")
}

/// Temp-bucket key for a raw PDF awaiting conversion.
pub fn temp_pdf_key(storage_key: Uuid, file_name: &str) -> String {
    format!("temp/{storage_key}/{file_name}")
}

/// Key for an audio clip attached to a page.
pub fn audio_key(page_key: Uuid, audio_key: Uuid, file_name: &str) -> String {
    format!("audio/{page_key}/{audio_key}/{file_name}")
}

/// Key for a page's HTML overlay.
pub fn html_layer_key(page_key: Uuid) -> String {
    format!("html-layer/{page_key}/layer.html")
}

/// Guess a Content-Type from a file name extension.
pub fn mime_from_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "aac" => "audio/aac",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_prefix_ends_with_slash() {
        let key = Uuid::new_v4();
        let prefix = material_prefix(key);
        assert!(prefix.starts_with("book-page/"));
        assert!(prefix.ends_with('/'));
        assert!(prefix.contains(&key.to_string()));
    }

    #[test]
    fn audio_key_nests_page_and_clip() {
        let page = Uuid::new_v4();
        let clip = Uuid::new_v4();
        let key = audio_key(page, clip, "intro.mp3");
        assert_eq!(key, format!("audio/{page}/{clip}/intro.mp3"));
    }

    #[test]
    fn html_layer_key_is_fixed_per_page() {
        let page = Uuid::new_v4();
        assert_eq!(html_layer_key(page), format!("html-layer/{page}/layer.html"));
    }

    #[test]
    fn mime_guessing() {
        assert_eq!(mime_from_file_name("scan.PDF"), "application/pdf");
        assert_eq!(mime_from_file_name("page-001.webp"), "image/webp");
        assert_eq!(mime_from_file_name("clip.m4a"), "audio/mp4");
        assert_eq!(mime_from_file_name("unknown.bin"), "application/octet-stream");
        assert_eq!(mime_from_file_name("noextension"), "application/octet-stream");
    }
}
