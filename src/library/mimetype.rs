//! Mimetype descriptors: a bundle key for the human label and an icon URL.
//!
//! Lookups try the exact mimetype first, then the `major/*` wildcard, then the
//! `other` descriptor, so every record resolves to something displayable.

use std::collections::HashMap;

/// Descriptor used when a mimetype is unknown or absent.
const FALLBACK_KEY: &str = "other";

/// Label key and icon for one mimetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTypeDescriptor {
    /// Key into the general message bundle.
    pub description: String,
    /// Icon URL relative to the portal root.
    pub icon_url: String,
}

impl MimeTypeDescriptor {
    fn new(description: &str, icon: &str) -> Self {
        Self {
            description: description.to_string(),
            icon_url: format!("/dev/images/mimetypes/{icon}"),
        }
    }
}

/// Table of known mimetypes.
#[derive(Debug, Clone)]
pub struct MimeTypeRegistry {
    descriptors: HashMap<String, MimeTypeDescriptor>,
}

impl Default for MimeTypeRegistry {
    fn default() -> Self {
        let entries = [
            ("application/pdf", "PDF_DOCUMENT", "pdf.png"),
            ("application/x-pdf", "PDF_DOCUMENT", "pdf.png"),
            ("application/msword", "WORD_DOCUMENT", "doc.png"),
            (
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "WORD_DOCUMENT",
                "doc.png",
            ),
            ("application/vnd.oasis.opendocument.text", "WORD_DOCUMENT", "doc.png"),
            ("application/vnd.ms-excel", "SPREADSHEET_DOCUMENT", "spreadsheet.png"),
            (
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                "SPREADSHEET_DOCUMENT",
                "spreadsheet.png",
            ),
            ("application/vnd.ms-powerpoint", "PRESENTATION_DOCUMENT", "presentation.png"),
            (
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                "PRESENTATION_DOCUMENT",
                "presentation.png",
            ),
            ("application/zip", "ARCHIVE_FILE", "zip.png"),
            ("application/x-gzip", "ARCHIVE_FILE", "zip.png"),
            ("text/plain", "TEXT_DOCUMENT", "txt.png"),
            ("text/html", "HTML_DOCUMENT", "html.png"),
            ("image/*", "IMAGE_FILE", "images.png"),
            ("video/*", "VIDEO_FILE", "video.png"),
            ("audio/*", "AUDIO_FILE", "sound.png"),
            ("x-sakai/link", "URL_LINK", "url.png"),
            ("x-sakai/document", "SAKAI_DOCUMENT", "sakaidoc.png"),
            (FALLBACK_KEY, "OTHER_DOCUMENT", "unknown.png"),
        ];

        let descriptors = entries
            .into_iter()
            .map(|(mime, description, icon)| (mime.to_string(), MimeTypeDescriptor::new(description, icon)))
            .collect();

        Self { descriptors }
    }
}

impl MimeTypeRegistry {
    /// Resolves the descriptor for a mimetype.
    ///
    /// ```
    /// use mylibrary::library::MimeTypeRegistry;
    ///
    /// let registry = MimeTypeRegistry::default();
    /// assert_eq!(registry.lookup(Some("image/png")).description, "IMAGE_FILE");
    /// assert_eq!(registry.lookup(None).description, "OTHER_DOCUMENT");
    /// ```
    #[must_use]
    pub fn lookup(&self, mime_type: Option<&str>) -> &MimeTypeDescriptor {
        mime_type
            .map(str::to_ascii_lowercase)
            .and_then(|mime| {
                self.descriptors.get(&mime).or_else(|| {
                    let major = mime.split('/').next().unwrap_or_default();
                    self.descriptors.get(&format!("{major}/*"))
                })
            })
            .unwrap_or_else(|| self.fallback())
    }

    fn fallback(&self) -> &MimeTypeDescriptor {
        // Always present: inserted by `Default`.
        &self.descriptors[FALLBACK_KEY]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_before_wildcard() {
        let registry = MimeTypeRegistry::default();
        let pdf = registry.lookup(Some("application/pdf"));
        assert_eq!(pdf.description, "PDF_DOCUMENT");
        assert_eq!(pdf.icon_url, "/dev/images/mimetypes/pdf.png");
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = MimeTypeRegistry::default();
        assert_eq!(registry.lookup(Some("Text/HTML")).description, "HTML_DOCUMENT");
    }

    #[test]
    fn unknown_types_use_fallback() {
        let registry = MimeTypeRegistry::default();
        assert_eq!(registry.lookup(Some("application/x-unknown")).description, "OTHER_DOCUMENT");
        assert_eq!(registry.lookup(Some("")).description, "OTHER_DOCUMENT");
    }
}
