use ring::hmac;

/// HMAC-SHA256 over the raw request body, carried hex encoded in `X-HMAC-Signature`.
pub struct SignatureVerifier {
    key: Option<hmac::Key>,
}

impl SignatureVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let key = if secret.is_empty() {
            None
        } else {
            Some(hmac::Key::new(hmac::HMAC_SHA256, secret))
        };
        Self { key }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// 比對是常數時間；未設定密鑰時一律拒絕
    pub fn verify(&self, body: &[u8], signature: &str) -> bool {
        let Some(key) = &self.key else {
            tracing::warn!("HMAC_SECRET is not configured, rejecting signed request");
            return false;
        };

        // 只接受與 hexdigest 完全相同的小寫格式
        if !signature
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            tracing::debug!("Signature is not lowercase hex");
            return false;
        }

        let tag = match hex::decode(signature) {
            Ok(tag) => tag,
            Err(e) => {
                tracing::debug!("Signature is not valid hex: {}", e);
                return false;
            }
        };

        hmac::verify(key, body, &tag).is_ok()
    }

    pub fn sign(&self, body: &[u8]) -> Option<String> {
        self.key
            .as_ref()
            .map(|key| hex::encode(hmac::sign(key, body).as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        let verifier = SignatureVerifier::new(b"Jefe");
        let body = b"what do ya want for nothing?";
        let expected = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";

        assert_eq!(verifier.sign(body).as_deref(), Some(expected));
        assert!(verifier.verify(body, expected));
    }

    #[test]
    fn test_rejects_uppercase_and_padded_signatures() {
        let verifier = SignatureVerifier::new(b"Jefe");
        let body = b"what do ya want for nothing?";
        let expected = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";

        assert!(!verifier.verify(body, &expected.to_uppercase()));
        assert!(!verifier.verify(body, &format!(" {}", expected)));
        assert!(!verifier.verify(body, &format!("{}\n", expected)));
    }

    #[test]
    fn test_rejects_tampered_body_and_bad_hex() {
        let verifier = SignatureVerifier::new(b"secret");
        let signature = verifier.sign(b"{\"a\":1}").unwrap();

        assert!(verifier.verify(b"{\"a\":1}", &signature));
        assert!(!verifier.verify(b"{\"a\":2}", &signature));
        assert!(!verifier.verify(b"{\"a\":1}", "not-hex"));
        assert!(!verifier.verify(b"{\"a\":1}", ""));
    }

    #[test]
    fn test_empty_secret_never_verifies() {
        let verifier = SignatureVerifier::new(b"");
        assert!(!verifier.is_configured());
        assert!(verifier.sign(b"body").is_none());
        assert!(!verifier.verify(b"body", "00"));
    }
}
