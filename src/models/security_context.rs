// Security Context Model
// Locally generated identity material, stored as one JSON record

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Cryptographic identity material generated on first run and owned by the
/// settings store from then on. Read and written as a whole record; there is
/// no partial-field update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    // SECURITY: Zeroed on drop
    pub private_key: String,

    pub public_key: String,
    pub certificate: String,
    pub certificate_hash: String,
}

impl SecurityContext {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_json_round_trip() {
        let context = SecurityContext {
            private_key: "priv".to_string(),
            public_key: "pub".to_string(),
            certificate: "cert".to_string(),
            certificate_hash: "hash".to_string(),
        };
        let encoded = context.to_json().unwrap();
        assert!(encoded.contains("\"privateKey\""));
        assert!(encoded.contains("\"certificateHash\""));
        assert_eq!(SecurityContext::from_json(&encoded).unwrap(), context);
    }
}
