//! Preview generation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::UploadConfig;

use super::{FileMeta, Preview};

/// Builds the client-side preview for a file's bytes.
///
/// Images within the configured preview ceiling become inline
/// `data:<mime>;base64,...` URLs; everything else gets the generic
/// placeholder. Preview generation never fails: unreadable files are the
/// read path's problem, not this one's.
pub fn build_preview(meta: &FileMeta, bytes: &[u8], config: &UploadConfig) -> Preview {
    if meta.is_image() && bytes.len() as u64 <= config.max_preview_bytes {
        Preview::DataUrl(format!("data:{};base64,{}", meta.mime, STANDARD.encode(bytes)))
    } else {
        Preview::Placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_becomes_data_url() {
        let meta = FileMeta::new("dot.png", 3, "image/png");
        let preview = build_preview(&meta, &[1, 2, 3], &UploadConfig::default());

        match preview {
            Preview::DataUrl(url) => {
                assert!(url.starts_with("data:image/png;base64,"));
                assert!(url.ends_with(&STANDARD.encode([1u8, 2, 3])));
            }
            Preview::Placeholder => panic!("expected a data URL"),
        }
    }

    #[test]
    fn test_non_image_gets_placeholder() {
        let meta = FileMeta::new("doc.pdf", 3, "application/pdf");
        let preview = build_preview(&meta, &[1, 2, 3], &UploadConfig::default());
        assert_eq!(preview, Preview::Placeholder);
    }

    #[test]
    fn test_oversized_image_gets_placeholder() {
        let config = UploadConfig::default().max_preview_bytes(2);
        let meta = FileMeta::new("big.png", 3, "image/png");
        let preview = build_preview(&meta, &[1, 2, 3], &config);
        assert_eq!(preview, Preview::Placeholder);
    }
}
