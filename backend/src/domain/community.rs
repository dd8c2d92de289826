//! Community content-organization entity.
//!
//! Only the pieces the logo workflow touches live here: the identifier, a
//! display name and the optional logo reference.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::BitstreamId;

/// Positions of the hyphens in the canonical 8-4-4-4-12 UUID form.
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];
const CANONICAL_LEN: usize = 36;

/// Raised when a community identifier is not a canonical UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("community id must be a canonical UUID: {raw}")]
pub struct CommunityIdError {
    raw: String,
}

/// Globally unique community identifier.
///
/// Only the canonical hyphenated form is accepted; hex digits may be upper or
/// lower case. Simple, braced and URN encodings are rejected.
///
/// # Examples
/// ```
/// use backend::domain::CommunityId;
///
/// let id: CommunityId = "1C11F3F1-BA1F-4F36-908A-3F1EA9A557EB".parse().unwrap();
/// assert_eq!(id.to_string(), "1c11f3f1-ba1f-4f36-908a-3f1ea9a557eb");
/// assert!("1c11f3f1ba1f4f36908a3f1ea9a557eb".parse::<CommunityId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommunityId(Uuid);

impl CommunityId {
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

    /// Whether `raw` has the canonical 8-4-4-4-12 hexadecimal shape.
    #[must_use]
    pub fn is_canonical(raw: &str) -> bool {
        raw.len() == CANONICAL_LEN
            && raw.char_indices().all(|(index, ch)| {
                if HYPHEN_POSITIONS.contains(&index) {
                    ch == '-'
                } else {
                    ch.is_ascii_hexdigit()
                }
            })
    }
}

impl FromStr for CommunityId {
    type Err = CommunityIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !Self::is_canonical(raw) {
            return Err(CommunityIdError { raw: raw.to_owned() });
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| CommunityIdError { raw: raw.to_owned() })
    }
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A community as seen by the logo workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    id: CommunityId,
    name: String,
    logo: Option<BitstreamId>,
}

impl Community {
    /// Build a community without a logo.
    #[must_use]
    pub fn new(id: CommunityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            logo: None,
        }
    }

    /// Attach an existing logo reference.
    #[must_use]
    pub fn with_logo(mut self, logo: BitstreamId) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Community identifier.
    #[must_use]
    pub fn id(&self) -> &CommunityId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current logo bitstream, if one is set.
    #[must_use]
    pub fn logo(&self) -> Option<&BitstreamId> {
        self.logo.as_ref()
    }

    /// Replace the logo reference, returning the previous one.
    pub fn replace_logo(&mut self, logo: BitstreamId) -> Option<BitstreamId> {
        self.logo.replace(logo)
    }
}
