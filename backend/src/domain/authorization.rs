//! Permission vocabulary shared by the authorization guard and policy ports.
//!
//! A permission question is always `(subject, target, capability)`: may this
//! caller exercise this capability on this object?

use std::fmt;

use uuid::Uuid;

/// Named scope an object identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityDomain {
    /// Community content-organization entities.
    Community,
    /// Stored bitstreams.
    Bitstream,
}

impl CapabilityDomain {
    /// Upper-case label used in logs and policy tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Community => "COMMUNITY",
            Self::Bitstream => "BITSTREAM",
        }
    }

    /// Lower-case noun used in client-facing messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::Bitstream => "bitstream",
        }
    }
}

impl fmt::Display for CapabilityDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action a subject wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Read,
    Write,
    Delete,
}

impl Capability {
    /// Upper-case label used in logs and policy tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object a permission is evaluated against.
///
/// # Examples
/// ```
/// use backend::domain::{CapabilityDomain, PermissionTarget};
/// use uuid::Uuid;
///
/// let target = PermissionTarget::new(CapabilityDomain::Community, Uuid::nil());
/// assert_eq!(target.to_string(), "COMMUNITY/00000000-0000-0000-0000-000000000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionTarget {
    domain: CapabilityDomain,
    id: Uuid,
}

impl PermissionTarget {
    /// Build a target from its scope and identifier.
    #[must_use]
    pub const fn new(domain: CapabilityDomain, id: Uuid) -> Self {
        Self { domain, id }
    }

    /// Scope of the target.
    #[must_use]
    pub const fn domain(&self) -> CapabilityDomain {
        self.domain
    }

    /// Identifier of the target.
    #[must_use]
    pub const fn id(&self) -> &Uuid {
        &self.id
    }
}

impl fmt::Display for PermissionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.id)
    }
}
