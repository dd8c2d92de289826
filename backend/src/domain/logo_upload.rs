//! Transient payload of a logo upload request.

use bytes::Bytes;

use super::{BitstreamFormat, Error};

/// File name recorded when the client omits one.
pub const DEFAULT_LOGO_NAME: &str = "logo";

/// Validated file payload destined to become a community logo.
///
/// ## Invariants
/// - `content` is non-empty.
/// - `file_name` is trimmed and non-empty; a missing or blank name becomes
///   [`DEFAULT_LOGO_NAME`].
///
/// # Examples
/// ```
/// use backend::domain::LogoUpload;
/// use bytes::Bytes;
///
/// let upload = LogoUpload::try_new(None, Some("image/png".into()), Bytes::from_static(b"png"))
///     .unwrap();
/// assert_eq!(upload.file_name(), "logo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoUpload {
    file_name: String,
    content_type: Option<String>,
    content: Bytes,
}

impl LogoUpload {
    /// Build an upload from decoded multipart parts.
    pub fn try_new(
        file_name: Option<String>,
        content_type: Option<String>,
        content: Bytes,
    ) -> Result<Self, Error> {
        if content.is_empty() {
            return Err(Error::unprocessable_entity("The uploaded file is empty"));
        }
        let file_name = file_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_LOGO_NAME.to_owned());
        Ok(Self {
            file_name,
            content_type,
            content,
        })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Content type declared by the client, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Resolve the logo format from the declared type and file name.
    pub fn format(&self) -> Result<BitstreamFormat, Error> {
        BitstreamFormat::detect(self.content_type(), self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn empty_content_is_rejected() {
        let err = LogoUpload::try_new(Some("test.png".into()), None, Bytes::new())
            .expect_err("empty upload");
        assert_eq!(err.code(), ErrorCode::UnprocessableEntity);
        assert_eq!(err.message(), "The uploaded file is empty");
    }

    #[rstest]
    #[case(None, "logo")]
    #[case(Some("   "), "logo")]
    #[case(Some(" test.png "), "test.png")]
    fn file_name_is_normalised(#[case] raw: Option<&str>, #[case] expected: &str) {
        let upload = LogoUpload::try_new(raw.map(str::to_owned), None, Bytes::from_static(b"x"))
            .expect("valid upload");
        assert_eq!(upload.file_name(), expected);
    }

    #[rstest]
    fn format_uses_file_name_when_type_missing() {
        let upload = LogoUpload::try_new(Some("test.png".into()), None, Bytes::from_static(b"x"))
            .expect("valid upload");
        assert_eq!(upload.format().expect("png"), BitstreamFormat::Png);
    }
}
