//! Blob store adapters.
//!
//! Keys are issued by the stores themselves and fan out over two directory
//! levels: `ab/cd/abcd…` where the prefixes are the first hex pairs of a
//! random 32-character identifier.

mod filesystem_blob_store;
mod memory_blob_store;

pub use filesystem_blob_store::FilesystemBlobStore;
pub use memory_blob_store::MemoryBlobStore;

use uuid::Uuid;

use crate::domain::StorageKey;

const KEY_ID_LEN: usize = 32;

/// Issue a fresh fan-out key.
fn issue_key() -> StorageKey {
    let id = Uuid::new_v4().simple().to_string();
    StorageKey::new(format!("{}/{}/{id}", &id[..2], &id[2..4]))
}

/// Split `key` into `(first, second, id)` when it has the issued shape.
fn split_key(key: &StorageKey) -> Option<(&str, &str, &str)> {
    let mut parts = key.as_str().split('/');
    let (first, second, id) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some()
        || id.len() != KEY_ID_LEN
        || !id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        || first != &id[..2]
        || second != &id[2..4]
    {
        return None;
    }
    Some((first, second, id))
}
