//! On-disk store for the RSA key that signs texture properties.

use openssl::{pkey::Private, rsa::Rsa};
use snafu::{ResultExt, Snafu};
use std::{
    fs,
    io::{self, Write},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
};
use tracing::info;

pub const SIGNING_KEY_BITS: u32 = 4096;
const SIGNING_KEY_FILE: &str = "signing.pem";

#[derive(Debug, Snafu)]
pub enum KeyStoreError {
    #[snafu(display("creating key directory {}", dir.display()))]
    KeyDir { dir: PathBuf, source: io::Error },

    #[snafu(display("generating {bits}-bit signing key"))]
    Generate {
        bits: u32,
        source: openssl::error::ErrorStack,
    },

    #[snafu(display("storing signing key at {}", path.display()))]
    Store { path: PathBuf, source: io::Error },

    #[snafu(display("reading signing key at {}", path.display()))]
    Read { path: PathBuf, source: io::Error },

    #[snafu(display("signing key at {} is not a PEM RSA key", path.display()))]
    Pem {
        path: PathBuf,
        source: openssl::error::ErrorStack,
    },
}

/// Loads the signing key from `dir`, generating and persisting one with
/// owner-only permissions on first start.
pub fn load_or_create(dir: &Path) -> Result<Rsa<Private>, KeyStoreError> {
    fs::create_dir_all(dir).context(KeyDirSnafu { dir })?;

    let path = dir.join(SIGNING_KEY_FILE);
    if path.exists() {
        let pem = fs::read(&path).context(ReadSnafu { path: &path })?;
        return Rsa::private_key_from_pem(&pem).context(PemSnafu { path: &path });
    }

    info!("no signing key at {:?}, generating one", path);
    let key = Rsa::generate(SIGNING_KEY_BITS).context(GenerateSnafu {
        bits: SIGNING_KEY_BITS,
    })?;
    store(&path, &key)?;
    Ok(key)
}

fn store(path: &Path, key: &Rsa<Private>) -> Result<(), KeyStoreError> {
    let pem = key.private_key_to_pem().context(GenerateSnafu {
        bits: SIGNING_KEY_BITS,
    })?;

    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
        .and_then(|mut file| file.write_all(&pem))
        .context(StoreSnafu { path })
}
