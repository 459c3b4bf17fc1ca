use ring::hmac;

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
const SIGNATURE_PREFIX: &str = "sha256=";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature header is missing the sha256= prefix")]
    MissingPrefix,

    #[error("signature is not valid hex")]
    Malformed,

    #[error("signature does not match payload")]
    Mismatch,
}

/// Header value for `payload` signed with `secret`, e.g. `sha256=6f1c...`.
pub fn sign(secret: &str, payload: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, payload);
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(tag.as_ref()))
}

/// Check a `sha256=<hex>` header against the raw request body.
///
/// The tag comparison is constant-time.
pub fn verify(secret: &str, payload: &[u8], header: &str) -> Result<(), SignatureError> {
    let encoded = header
        .trim()
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or(SignatureError::MissingPrefix)?;
    let expected = hex::decode(encoded).map_err(|_| SignatureError::Malformed)?;

    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    hmac::verify(&key, payload, &expected).map_err(|_| SignatureError::Mismatch)
}
