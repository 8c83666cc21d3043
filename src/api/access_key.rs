use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::error;

use crate::core::config::AppConfig;

type HmacSha256 = Hmac<Sha256>;

/// Checks the presented key against the configured access key.
///
/// Both values are MACed under the configured key and the tags compared in
/// constant time, so the check leaks neither the key length nor the length
/// of a matching prefix.
#[must_use]
pub fn verify_access_key(presented: &str, config: &AppConfig) -> bool {
    let expected = &config.access_key;

    let (Some(expected_tag), Some(mut mac)) = (tag(expected, expected), keyed_mac(expected)) else {
        return false;
    };
    mac.update(presented.as_bytes());

    mac.verify_slice(&expected_tag).is_ok()
}

fn keyed_mac(secret: &str) -> Option<HmacSha256> {
    match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => Some(mac),
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            None
        }
    }
}

fn tag(secret: &str, value: &str) -> Option<Vec<u8>> {
    let mut mac = keyed_mac(secret)?;
    mac.update(value.as_bytes());
    Some(mac.finalize().into_bytes().to_vec())
}
