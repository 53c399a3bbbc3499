/// Offline-mode UUID derivation
use md5::{Digest, Md5};
use uuid::{Builder, Uuid};

const OFFLINE_PREFIX: &str = "OfflinePlayer:";

/// Derive the offline UUID for a name
///
/// MD5 over `"OfflinePlayer:" + name`, stamped as a version 3 RFC 4122 UUID.
/// The name is hashed as given; callers keep the original spelling.
pub fn offline_uuid(name: &str) -> Uuid {
    let mut hasher = Md5::new();
    hasher.update(OFFLINE_PREFIX.as_bytes());
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Builder::from_md5_bytes(bytes).into_uuid()
}
