//! Transaction domain: signing with local keys and submission.

#[cfg(feature = "http")]
pub mod client;

use serde::{Deserialize, Serialize};

use crate::shared::serde_util::u64_or_string;
use crate::tx::SignedTransaction;

/// Response of `POST /v1/query/height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightResponse {
    #[serde(deserialize_with = "u64_or_string::deserialize")]
    pub height: u64,
}

/// A transaction the node accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    /// Hash reported by the node.
    pub hash: String,
    pub transaction: SignedTransaction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_response_accepts_quoted() {
        let a: HeightResponse = serde_json::from_str(r#"{"height":10}"#).unwrap();
        let b: HeightResponse = serde_json::from_str(r#"{"height":"10"}"#).unwrap();
        assert_eq!(a, b);
    }
}
