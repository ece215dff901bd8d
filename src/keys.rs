//! RSA key pair generation and PEM file handling.
//!
//! Keys are written as PKCS#1 PEM, the private key to the requested path and
//! the public key to a `.pub` sibling. Existing files are overwritten.

use crate::{Error, Result};
use rand::rngs::OsRng;
use rsa::pkcs1::{
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding,
};
use rsa::pkcs8::DecodePrivateKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fs;
use std::path::{Path, PathBuf};

/// Default RSA modulus size in bits.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Generate a new RSA private key of `bits` bits.
pub fn generate(bits: usize) -> Result<RsaPrivateKey> {
    let mut rng = OsRng;
    RsaPrivateKey::new(&mut rng, bits).map_err(|e| Error::Key(format!("key generation: {}", e)))
}

/// Path of the public key file belonging to a private key path.
///
/// Appends `.pub` to the full file name, so `key_rsa` pairs with
/// `key_rsa.pub`.
pub fn public_key_path(key_file: &Path) -> PathBuf {
    let mut name = key_file.as_os_str().to_os_string();
    name.push(".pub");
    PathBuf::from(name)
}

/// Write a key pair to `key_file` and `key_file.pub`.
///
/// Returns the public key path.
pub fn write_key_pair(key: &RsaPrivateKey, key_file: &Path) -> Result<PathBuf> {
    key.write_pkcs1_pem_file(key_file, LineEnding::LF)
        .map_err(|e| Error::Key(format!("writing {}: {}", key_file.display(), e)))?;

    let pub_file = public_key_path(key_file);
    RsaPublicKey::from(key)
        .write_pkcs1_pem_file(&pub_file, LineEnding::LF)
        .map_err(|e| Error::Key(format!("writing {}: {}", pub_file.display(), e)))?;

    Ok(pub_file)
}

/// Load a PEM-encoded private key from disk.
///
/// Accepts PKCS#1 (`RSA PRIVATE KEY`) with a PKCS#8 (`PRIVATE KEY`) fallback,
/// since keys produced by other tooling commonly use the latter framing.
pub fn load_private_key(key_file: &Path) -> Result<RsaPrivateKey> {
    let pem = fs::read_to_string(key_file)?;
    RsaPrivateKey::from_pkcs1_pem(&pem)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(&pem))
        .map_err(|e| Error::Key(format!("parsing {}: {}", key_file.display(), e)))
}

/// Load a PKCS#1 PEM-encoded public key from disk.
pub fn load_public_key(pub_file: &Path) -> Result<RsaPublicKey> {
    let pem = fs::read_to_string(pub_file)?;
    RsaPublicKey::from_pkcs1_pem(&pem)
        .map_err(|e| Error::Key(format!("parsing {}: {}", pub_file.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 512-bit keys keep the tests fast
    const TEST_BITS: usize = 512;

    #[test]
    fn test_public_key_path() {
        assert_eq!(
            public_key_path(Path::new("key_rsa")),
            PathBuf::from("key_rsa.pub")
        );
        assert_eq!(
            public_key_path(Path::new("/tmp/keys/site_a")),
            PathBuf::from("/tmp/keys/site_a.pub")
        );
    }

    #[test]
    fn test_write_and_reload_key_pair() {
        let dir = tempfile::tempdir().unwrap();
        let key_file = dir.path().join("key_rsa");

        let key = generate(TEST_BITS).unwrap();
        let pub_file = write_key_pair(&key, &key_file).unwrap();

        assert!(key_file.exists());
        assert_eq!(pub_file, dir.path().join("key_rsa.pub"));
        assert!(pub_file.exists());

        let reloaded = load_private_key(&key_file).unwrap();
        assert_eq!(reloaded, key);

        // Public key on disk matches the one derived from the private key.
        let public = load_public_key(&pub_file).unwrap();
        assert_eq!(public, RsaPublicKey::from(&key));
    }

    #[test]
    fn test_write_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let key_file = dir.path().join("key_rsa");
        fs::write(&key_file, "stale").unwrap();
        fs::write(public_key_path(&key_file), "stale").unwrap();

        let key = generate(TEST_BITS).unwrap();
        write_key_pair(&key, &key_file).unwrap();

        assert_eq!(load_private_key(&key_file).unwrap(), key);
    }

    #[test]
    fn test_load_missing_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_private_key(&dir.path().join("no_such_key"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_garbage_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let key_file = dir.path().join("key_rsa");
        fs::write(&key_file, "not a pem file").unwrap();

        let result = load_private_key(&key_file);
        assert!(matches!(result, Err(Error::Key(_))));
    }
}
