use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(key: &str, path: &str, expires: i64) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).ok()?;
    mac.update(path.as_bytes());
    mac.update(b"\n");
    mac.update(expires.to_string().as_bytes());
    Some(mac)
}

/// Hex HMAC-SHA256 over the object path and its expiry (unix seconds).
pub fn sign_path(key: &str, path: &str, expires: i64) -> Option<String> {
    let mac = mac_for(key, path, expires)?;
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a signature produced by [`sign_path`]; expired links never verify.
pub fn verify_path(key: &str, path: &str, expires: i64, signature: &str, now: i64) -> bool {
    if expires < now {
        return false;
    }
    let Ok(raw) = hex::decode(signature) else {
        return false;
    };
    match mac_for(key, path, expires) {
        Some(mac) => mac.verify_slice(&raw).is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "signing-key";
    const PATH: &str = "7f2c9f0e-4a59-4f55-9bb6-1f1c8a4f2d11/1767225600000.pdf";

    #[test]
    fn signature_round_trips_before_expiry() {
        let sig = sign_path(KEY, PATH, 2_000).unwrap();
        assert!(verify_path(KEY, PATH, 2_000, &sig, 1_000));
    }

    #[test]
    fn expired_signature_is_refused() {
        let sig = sign_path(KEY, PATH, 2_000).unwrap();
        assert!(!verify_path(KEY, PATH, 2_000, &sig, 2_001));
    }

    #[test]
    fn tampering_is_detected() {
        let sig = sign_path(KEY, PATH, 2_000).unwrap();
        assert!(!verify_path(KEY, PATH, 3_000, &sig, 1_000));
        assert!(!verify_path(KEY, "other/1.pdf", 2_000, &sig, 1_000));
        assert!(!verify_path("other-key", PATH, 2_000, &sig, 1_000));
        assert!(!verify_path(KEY, PATH, 2_000, "not-hex", 1_000));
    }
}
