//! Stored-file handles and the logo formats the repository accepts.
//!
//! A [`Bitstream`] is created only by a storage adapter once the bytes have
//! been written; the domain never fabricates one from request input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::Error;

/// MIME type used when neither the client nor the file name says otherwise.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Bitstream identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitstreamId(Uuid);

impl BitstreamId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BitstreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BitstreamId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Opaque key a blob store assigns to written bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Wrap a key produced by a blob store.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content digest recorded alongside stored bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    algorithm: &'static str,
    value: String,
}

impl Checksum {
    /// Compute the SHA-256 digest of `content`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Checksum;
    ///
    /// let checksum = Checksum::sha256(b"");
    /// assert_eq!(checksum.algorithm(), "SHA-256");
    /// assert!(checksum.value().starts_with("e3b0c442"));
    /// ```
    #[must_use]
    pub fn sha256(content: &[u8]) -> Self {
        Self {
            algorithm: "SHA-256",
            value: hex::encode(Sha256::digest(content)),
        }
    }

    /// Digest algorithm label.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        self.algorithm
    }

    /// Lower-case hexadecimal digest.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// Image formats accepted as community logos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitstreamFormat {
    Png,
    Jpeg,
    Gif,
    Svg,
    Webp,
    Bmp,
    Tiff,
}

impl BitstreamFormat {
    const ALL: [Self; 7] = [
        Self::Png,
        Self::Jpeg,
        Self::Gif,
        Self::Svg,
        Self::Webp,
        Self::Bmp,
        Self::Tiff,
    ];

    /// Canonical MIME type.
    #[must_use]
    pub const fn mimetype(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Svg => "image/svg+xml",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Short label shown in the format registry.
    #[must_use]
    pub const fn short_description(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Gif => "GIF",
            Self::Svg => "SVG",
            Self::Webp => "WebP",
            Self::Bmp => "BMP",
            Self::Tiff => "TIFF",
        }
    }

    /// Longer human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Png => "Portable Network Graphics",
            Self::Jpeg => "Joint Photographic Experts Group/JPEG File Interchange Format (JFIF)",
            Self::Gif => "Graphics Interchange Format",
            Self::Svg => "Scalable Vector Graphics",
            Self::Webp => "WebP image",
            Self::Bmp => "Microsoft Windows bitmap",
            Self::Tiff => "Tag Image File Format",
        }
    }

    /// Stable registry identifier used in hypermedia links.
    #[must_use]
    pub const fn registry_id(self) -> u32 {
        match self {
            Self::Png => 13,
            Self::Jpeg => 12,
            Self::Gif => 11,
            Self::Svg => 27,
            Self::Webp => 28,
            Self::Bmp => 15,
            Self::Tiff => 14,
        }
    }

    /// Look up a format by MIME type, ignoring parameters and case.
    #[must_use]
    pub fn from_mimetype(raw: &str) -> Option<Self> {
        let essence = raw.split(';').next().unwrap_or_default().trim();
        let canonical = match essence.to_ascii_lowercase().as_str() {
            "image/jpg" | "image/pjpeg" => "image/jpeg".to_owned(),
            "image/x-ms-bmp" => "image/bmp".to_owned(),
            other => other.to_owned(),
        };
        Self::ALL.into_iter().find(|format| format.mimetype() == canonical)
    }

    /// Decide the format of an upload.
    ///
    /// The declared content type wins unless it is absent or the generic
    /// `application/octet-stream`, in which case the file extension decides.
    pub fn detect(declared: Option<&str>, file_name: &str) -> Result<Self, Error> {
        let explicit = declared
            .map(str::trim)
            .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(OCTET_STREAM));
        let effective = match explicit {
            Some(value) => value.to_owned(),
            None => mime_guess::from_path(file_name)
                .first()
                .map_or_else(|| OCTET_STREAM.to_owned(), |mime| mime.essence_str().to_owned()),
        };
        Self::from_mimetype(&effective).ok_or_else(|| {
            Error::unprocessable_entity(format!(
                "The uploaded file is not a supported logo format: {effective}"
            ))
        })
    }
}

impl fmt::Display for BitstreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mimetype())
    }
}

/// A stored file and its technical metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    id: BitstreamId,
    name: String,
    format: BitstreamFormat,
    size_bytes: u64,
    checksum: Checksum,
    storage_key: StorageKey,
    sequence_id: u32,
    created_at: DateTime<Utc>,
}

/// Field bag used to construct a [`Bitstream`].
#[derive(Debug, Clone)]
pub struct BitstreamDraft {
    pub id: BitstreamId,
    pub name: String,
    pub format: BitstreamFormat,
    pub size_bytes: u64,
    pub checksum: Checksum,
    pub storage_key: StorageKey,
    pub sequence_id: u32,
    pub created_at: DateTime<Utc>,
}

impl From<BitstreamDraft> for Bitstream {
    fn from(draft: BitstreamDraft) -> Self {
        let BitstreamDraft {
            id,
            name,
            format,
            size_bytes,
            checksum,
            storage_key,
            sequence_id,
            created_at,
        } = draft;
        Self {
            id,
            name,
            format,
            size_bytes,
            checksum,
            storage_key,
            sequence_id,
            created_at,
        }
    }
}

impl Bitstream {
    #[must_use]
    pub fn id(&self) -> &BitstreamId {
        &self.id
    }

    /// Original file name supplied by the uploader.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn format(&self) -> BitstreamFormat {
        self.format
    }

    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    #[must_use]
    pub fn checksum(&self) -> &Checksum {
        &self.checksum
    }

    /// Where the bytes live in the blob store.
    #[must_use]
    pub fn storage_key(&self) -> &StorageKey {
        &self.storage_key
    }

    /// Position of the bitstream within its owner; logos always use 1.
    #[must_use]
    pub fn sequence_id(&self) -> u32 {
        self.sequence_id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
