use crate::services::{ServiceError, SigningService};
use async_trait::async_trait;
use openssl::{
    base64,
    error::ErrorStack,
    hash::MessageDigest,
    pkey::{PKey, Private},
    rsa::Rsa,
    sign::Signer,
};

/// Signs texture properties with SHA1withRSA, the scheme Yggdrasil
/// clients verify against `signaturePublicKey`.
pub struct RsaSigningService {
    private: PKey<Private>,
    /// PEM SubjectPublicKeyInfo, the form authlib-injector reads.
    public_pem: String,
}

impl RsaSigningService {
    pub fn new(key: Rsa<Private>) -> Result<Self, ErrorStack> {
        let public_pem = String::from_utf8_lossy(&key.public_key_to_pem()?).into_owned();

        Ok(RsaSigningService {
            private: PKey::from_rsa(key)?,
            public_pem,
        })
    }

    fn sign_sha1(&self, data: &[u8]) -> Result<Vec<u8>, ErrorStack> {
        let mut signer = Signer::new(MessageDigest::sha1(), &self.private)?;
        signer.update(data)?;
        signer.sign_to_vec()
    }
}

#[async_trait]
impl SigningService for RsaSigningService {
    async fn sign(&self, data: &[u8]) -> Result<String, ServiceError> {
        let signature = self
            .sign_sha1(data)
            .map_err(|err| ServiceError::new(format!("signing failed: {err}")))?;

        Ok(base64::encode_block(&signature))
    }

    async fn public_key(&self) -> Result<String, ServiceError> {
        Ok(self.public_pem.clone())
    }
}
