//! Hypermedia (HAL) representations of bitstreams.
//!
//! Wrapping turns a domain [`Bitstream`] into the JSON document clients see:
//! plain properties, a `metadata` map, `_links` pointing back at the REST API
//! and the bitstream format embedded under `_embedded`.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use crate::domain::{Bitstream, BitstreamFormat, BitstreamId};

/// Path segments of bitstream resources below the REST base URL.
const BITSTREAMS_PATH: [&str; 3] = ["api", "core", "bitstreams"];

/// Base URL that cannot anchor hierarchical links, such as a `mailto:` URL.
#[derive(Debug, thiserror::Error)]
#[error("'{0}' cannot be used as the base of resource links")]
pub struct InvalidLinkBase(Url);

/// Builds absolute links below the configured REST base URL.
#[derive(Debug, Clone)]
pub struct ResourceLinks {
    base: Url,
}

impl ResourceLinks {
    /// Use `base` as the root of every generated link.
    ///
    /// A base without a trailing slash is treated as a directory so a
    /// deployment path such as `/server` is kept. Query and fragment are
    /// dropped.
    ///
    /// # Errors
    /// Returns [`InvalidLinkBase`] when `base` cannot carry path segments.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::hal::ResourceLinks;
    ///
    /// let links = ResourceLinks::new("https://repo.example/server".parse().unwrap()).unwrap();
    /// assert_eq!(links.base().as_str(), "https://repo.example/server/");
    /// ```
    pub fn new(mut base: Url) -> Result<Self, InvalidLinkBase> {
        if base.cannot_be_a_base() {
            return Err(InvalidLinkBase(base));
        }
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// Root all links are built from.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn bitstream_link(&self, id: &BitstreamId, tail: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // `new` rejects bases without path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(BITSTREAMS_PATH)
                .push(&id.to_string());
            if let Some(last) = tail {
                segments.push(last);
            }
        }
        url
    }

    /// Link to the bitstream resource.
    #[must_use]
    pub fn bitstream(&self, id: &BitstreamId) -> Url {
        self.bitstream_link(id, None)
    }

    /// Link to the raw bitstream bytes.
    #[must_use]
    pub fn bitstream_content(&self, id: &BitstreamId) -> Url {
        self.bitstream_link(id, Some("content"))
    }

    /// Link to the bitstream's format.
    #[must_use]
    pub fn bitstream_format(&self, id: &BitstreamId) -> Url {
        self.bitstream_link(id, Some("format"))
    }
}

/// Single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    #[schema(example = "http://localhost:8080/api/core/bitstreams/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub href: String,
}

impl From<Url> for Link {
    fn from(value: Url) -> Self {
        Self {
            href: value.into(),
        }
    }
}

/// Links exposed on a bitstream resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BitstreamLinks {
    pub content: Link,
    pub format: Link,
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// Embedded resources of a bitstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BitstreamEmbedded {
    pub format: BitstreamFormatResource,
}

/// Digest of the stored bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckSumResource {
    #[schema(example = "SHA-256")]
    pub check_sum_algorithm: String,
    pub value: String,
}

/// One metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MetadataValue {
    pub value: String,
    pub language: Option<String>,
    pub authority: Option<String>,
    pub confidence: i32,
    pub place: u32,
}

impl MetadataValue {
    fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            authority: None,
            confidence: -1,
            place: 0,
        }
    }
}

/// Format registry entry as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BitstreamFormatResource {
    pub id: u32,
    #[schema(example = "PNG")]
    pub short_description: String,
    pub description: String,
    #[schema(example = "image/png")]
    pub mimetype: String,
    #[schema(example = "KNOWN")]
    pub support_level: String,
    pub internal: bool,
    #[serde(rename = "type")]
    #[schema(example = "bitstreamformat")]
    pub kind: String,
}

impl From<BitstreamFormat> for BitstreamFormatResource {
    fn from(format: BitstreamFormat) -> Self {
        Self {
            id: format.registry_id(),
            short_description: format.short_description().to_owned(),
            description: format.description().to_owned(),
            mimetype: format.mimetype().to_owned(),
            support_level: "KNOWN".to_owned(),
            internal: false,
            kind: "bitstreamformat".to_owned(),
        }
    }
}

/// Bitstream resource returned by the logo upload and bitstream endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BitstreamResource {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub uuid: String,
    #[schema(example = "test.png")]
    pub name: String,
    pub metadata: BTreeMap<String, Vec<MetadataValue>>,
    pub bundle_name: Option<String>,
    pub size_bytes: u64,
    pub check_sum: CheckSumResource,
    pub sequence_id: u32,
    #[serde(rename = "type")]
    #[schema(example = "bitstream")]
    pub kind: String,
    #[serde(rename = "_links")]
    pub links: BitstreamLinks,
    #[serde(rename = "_embedded")]
    pub embedded: BitstreamEmbedded,
}

impl BitstreamResource {
    /// Wrap `bitstream` as a hypermedia resource.
    #[must_use]
    pub fn wrap(bitstream: &Bitstream, links: &ResourceLinks) -> Self {
        let id = bitstream.id();
        let mut metadata = BTreeMap::new();
        metadata.insert(
            "dc.title".to_owned(),
            vec![MetadataValue::plain(bitstream.name())],
        );
        metadata.insert(
            "dc.format.mimetype".to_owned(),
            vec![MetadataValue::plain(bitstream.format().mimetype())],
        );
        Self {
            id: id.to_string(),
            uuid: id.to_string(),
            name: bitstream.name().to_owned(),
            metadata,
            bundle_name: None,
            size_bytes: bitstream.size_bytes(),
            check_sum: CheckSumResource {
                check_sum_algorithm: bitstream.checksum().algorithm().to_owned(),
                value: bitstream.checksum().value().to_owned(),
            },
            sequence_id: bitstream.sequence_id(),
            kind: "bitstream".to_owned(),
            links: BitstreamLinks {
                content: links.bitstream_content(id).into(),
                format: links.bitstream_format(id).into(),
                self_link: links.bitstream(id).into(),
            },
            embedded: BitstreamEmbedded {
                format: bitstream.format().into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{BitstreamDraft, Checksum, StorageKey};
    use chrono::Utc;
    use rstest::rstest;

    fn sample() -> Bitstream {
        Bitstream::from(BitstreamDraft {
            id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().expect("id"),
            name: "test.png".to_owned(),
            format: BitstreamFormat::Png,
            size_bytes: 3,
            checksum: Checksum::sha256(b"png"),
            storage_key: StorageKey::new("3f/a8/3fa8"),
            sequence_id: 1,
            created_at: Utc::now(),
        })
    }

    #[rstest]
    #[case("http://localhost:8080", "http://localhost:8080/")]
    #[case("https://repo.example/server", "https://repo.example/server/")]
    #[case("https://repo.example/server/", "https://repo.example/server/")]
    #[case("https://repo.example/server?page=2#top", "https://repo.example/server/")]
    fn base_gains_trailing_slash(#[case] raw: &str, #[case] expected: &str) {
        let links = ResourceLinks::new(raw.parse().expect("url")).expect("links");
        assert_eq!(links.base().as_str(), expected);
    }

    #[rstest]
    #[case("mailto:admin@repo.example")]
    #[case("data:text/plain,logo")]
    fn bases_without_path_segments_are_rejected(#[case] raw: &str) {
        let err = ResourceLinks::new(raw.parse().expect("url")).expect_err("opaque base");
        assert!(err.to_string().contains(raw), "error should name the url: {err}");
    }

    #[rstest]
    #[case("http://localhost:8080", "http://localhost:8080/api/core/bitstreams/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("https://repo.example/server?page=2", "https://repo.example/server/api/core/bitstreams/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn bitstream_links_are_built_below_the_base(#[case] raw: &str, #[case] expected: &str) {
        let links = ResourceLinks::new(raw.parse().expect("url")).expect("links");
        let id = *sample().id();
        assert_eq!(links.bitstream(&id).as_str(), expected);
        assert_eq!(links.bitstream_format(&id).as_str(), format!("{expected}/format"));
    }

    #[rstest]
    fn wrap_serialises_links_and_embedded_format() {
        let links =
            ResourceLinks::new("https://repo.example/server".parse().expect("url")).expect("links");
        let resource = BitstreamResource::wrap(&sample(), &links);
        let value = serde_json::to_value(&resource).expect("json");

        let self_href = "https://repo.example/server/api/core/bitstreams/3fa85f64-5717-4562-b3fc-2c963f66afa6";
        assert_eq!(value["type"], "bitstream");
        assert_eq!(value["name"], "test.png");
        assert_eq!(value["sizeBytes"], 3);
        assert_eq!(value["sequenceId"], 1);
        assert_eq!(value["checkSum"]["checkSumAlgorithm"], "SHA-256");
        assert_eq!(value["metadata"]["dc.title"][0]["value"], "test.png");
        assert_eq!(value["_links"]["self"]["href"], self_href);
        assert_eq!(
            value["_links"]["content"]["href"],
            format!("{self_href}/content")
        );
        assert_eq!(value["_embedded"]["format"]["mimetype"], "image/png");
        assert_eq!(value["_embedded"]["format"]["type"], "bitstreamformat");
    }
}
