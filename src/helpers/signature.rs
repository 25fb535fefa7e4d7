use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Webhook signature scheme used by the identity provider: the shared
/// secret is base64 behind a `whsec_` prefix, the signed content is
/// `"{msg_id}.{timestamp}.{body}"`, and the signature header carries one
/// or more space-separated `v1,<base64>` entries.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SignatureError {
    #[error("webhook secret is malformed")]
    MalformedSecret,
    #[error("signature header is malformed")]
    MalformedHeader,
    #[error("signature mismatch")]
    Mismatch,
}

pub fn verify(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    signature_header: &str,
    body: &[u8],
) -> Result<(), SignatureError> {
    let expected = sign(secret, msg_id, timestamp, body)?;

    // the header may carry entries from other schemes or key rotations;
    // anything unparseable is skipped, not fatal
    let mut candidates = 0;
    for entry in signature_header.split_whitespace() {
        let Some((version, signature)) = entry.split_once(',') else {
            continue;
        };
        if version != "v1" {
            continue;
        }
        let Ok(signature) = BASE64.decode(signature) else {
            continue;
        };
        candidates += 1;
        if constant_time_eq(&signature, &expected) {
            return Ok(());
        }
    }

    if candidates == 0 {
        return Err(SignatureError::MalformedHeader);
    }
    Err(SignatureError::Mismatch)
}

/// Computes the raw HMAC-SHA256 over the signed content. Exposed so the
/// test suite can produce provider-shaped signatures.
pub fn sign(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<Vec<u8>, SignatureError> {
    let key = BASE64
        .decode(secret.strip_prefix("whsec_").unwrap_or(secret))
        .map_err(|_| SignatureError::MalformedSecret)?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(&key).map_err(|_| SignatureError::MalformedSecret)?;
    mac.update(msg_id.as_bytes());
    mac.update(b".");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);

    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn header_value(signature: &[u8]) -> String {
    format!("v1,{}", BASE64.encode(signature))
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

    fn signed_header(body: &[u8]) -> String {
        header_value(&sign(SECRET, "msg_1", "1700000000", body).unwrap())
    }

    #[test]
    fn accepts_a_correctly_signed_payload() {
        let body = br#"{"type":"user.created"}"#;
        let header = signed_header(body);
        assert_eq!(verify(SECRET, "msg_1", "1700000000", &header, body), Ok(()));
    }

    #[test]
    fn rejects_a_tampered_body() {
        let header = signed_header(br#"{"type":"user.created"}"#);
        assert_eq!(
            verify(SECRET, "msg_1", "1700000000", &header, br#"{"type":"user.deleted"}"#),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn rejects_a_wrong_secret() {
        let body = br#"{}"#;
        let header = signed_header(body);
        assert_eq!(
            verify("whsec_c2VjcmV0LXRoYXQtaXMtd3Jvbmc=", "msg_1", "1700000000", &header, body),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn rejects_a_malformed_header() {
        assert_eq!(
            verify(SECRET, "msg_1", "1700000000", "not-a-signature", b"{}"),
            Err(SignatureError::MalformedHeader)
        );
        assert_eq!(
            verify(SECRET, "msg_1", "1700000000", "v2,AAAA", b"{}"),
            Err(SignatureError::MalformedHeader)
        );
    }

    #[test]
    fn accepts_any_matching_entry_among_several() {
        let body = br#"{"type":"user.updated"}"#;
        let good = signed_header(body);
        let stale = header_value(&sign(SECRET, "msg_0", "1600000000", body).unwrap());
        let header = format!("{} {}", stale, good);
        assert_eq!(verify(SECRET, "msg_1", "1700000000", &header, body), Ok(()));
    }

    #[test]
    fn skips_unparseable_entries_before_a_valid_one() {
        let body = br#"{"type":"user.updated"}"#;
        let good = signed_header(body);
        for noise in ["garbage", "v2,AAAA", "v1,%%not-base64%%"] {
            let header = format!("{} {}", noise, good);
            assert_eq!(verify(SECRET, "msg_1", "1700000000", &header, body), Ok(()));
        }
    }

    #[test]
    fn rejects_an_undecodable_secret() {
        assert!(matches!(
            sign("whsec_%%%", "msg_1", "1700000000", b"{}"),
            Err(SignatureError::MalformedSecret)
        ));
    }
}
