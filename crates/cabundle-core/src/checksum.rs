//! SHA-256 of the local bundle and digest extraction from the remote
//! checksum resource.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Length of a lowercase hex SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded.
pub fn sha256_path(path: &Path) -> io::Result<String> {
    let mut f = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Digest carried by a checksum resource body: its first 64 characters.
///
/// Upstream serves `<digest>  cacert.pem\n`; anything after the digest is
/// ignored. A shorter body is returned whole and will not match any real
/// digest.
pub fn remote_digest(body: &[u8]) -> String {
    let head = &body[..body.len().min(DIGEST_HEX_LEN)];
    let digest = String::from_utf8_lossy(head).into_owned();
    if digest.len() != DIGEST_HEX_LEN || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        tracing::warn!("checksum resource does not start with a hex SHA-256: {:?}", digest);
    }
    digest
}
