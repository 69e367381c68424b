//! Custom serde helpers for the node's JSON wire formats.

/// Serializes `Vec<u8>` as a lowercase hex string.
///
/// Deserialization accepts an optional `0x` prefix and either case.
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s).map_err(|e| serde::de::Error::custom(format!("Invalid hex: {}", e)))
    }
}

/// Node responses sometimes quote integers; accept both `12` and `"12"`.
pub mod u64_or_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(n),
            Raw::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("Invalid integer: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Blob {
        #[serde(with = "super::hex_bytes")]
        data: Vec<u8>,
    }

    #[derive(Debug, Deserialize)]
    struct Height {
        #[serde(deserialize_with = "super::u64_or_string::deserialize")]
        height: u64,
    }

    #[test]
    fn test_hex_bytes() {
        let blob = Blob {
            data: vec![0xde, 0xad],
        };
        assert_eq!(serde_json::to_string(&blob).unwrap(), r#"{"data":"dead"}"#);
        let back: Blob = serde_json::from_str(r#"{"data":"0xDEAD"}"#).unwrap();
        assert_eq!(back, blob);
    }

    #[test]
    fn test_u64_or_string() {
        let a: Height = serde_json::from_str(r#"{"height":12}"#).unwrap();
        let b: Height = serde_json::from_str(r#"{"height":"12"}"#).unwrap();
        assert_eq!(a.height, 12);
        assert_eq!(b.height, 12);
        assert!(serde_json::from_str::<Height>(r#"{"height":"x"}"#).is_err());
    }
}
