//! Transaction envelope, signing and the signed JSON form.
//!
//! Signing flow:
//!
//! 1. encode the payload and pack it as [`Any`]
//! 2. encode the envelope with no signature: these are the sign-bytes
//! 3. sign the sign-bytes with the sender's key
//! 4. re-encode the envelope with `{public_key, signature}` for transmission
//!
//! Use [`TransactionBuilder`] to go from a [`Message`] to a [`SignedTransaction`].

pub mod builder;
pub mod message;

pub use builder::{TransactionBuilder, MAX_MEMO_LEN};
pub use message::*;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec::schema::{self, MessageSchema};
use crate::codec::{self, Field, Value};
use crate::crypto::{self, CurveType, KeyEntry};
use crate::error::{CryptoError, EncodingError, SdkError, ValidationError};
use crate::shared::serde_util::hex_bytes;
use crate::shared::OrderId;

// ─── Any ─────────────────────────────────────────────────────────────────────

/// A payload tagged with its type url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Any {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl Any {
    pub fn new(schema: &MessageSchema, value: Vec<u8>) -> Self {
        Self {
            type_url: schema.type_url(),
            value,
        }
    }

    pub fn fields(&self) -> Vec<Field> {
        vec![
            schema::any::TYPE_URL.with(self.type_url.as_str().into()),
            schema::any::VALUE.with(self.value.clone().into()),
        ]
    }

    /// Decode the wrapped payload using the schema its type url names.
    pub fn unpack(&self) -> Result<Vec<Field>, EncodingError> {
        codec::decode(schema::lookup(&self.type_url)?, &self.value)
    }

    fn from_fields(fields: &[Field]) -> Result<Self, EncodingError> {
        Ok(Self {
            type_url: get_string(fields, schema::any::TYPE_URL.id)?,
            value: get_bytes(fields, schema::any::VALUE.id)?,
        })
    }
}

// ─── Signature ───────────────────────────────────────────────────────────────

/// Signer's public key and signature over the sign-bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

impl Signature {
    pub fn fields(&self) -> Vec<Field> {
        vec![
            schema::signature::PUBLIC_KEY.with(self.public_key.clone().into()),
            schema::signature::SIGNATURE.with(self.signature.clone().into()),
        ]
    }

    /// Curve of the signing key, identified from the public key length.
    pub fn curve(&self) -> Result<CurveType, CryptoError> {
        crypto::identify(&self.public_key)
    }

    fn from_fields(fields: &[Field]) -> Result<Self, EncodingError> {
        Ok(Self {
            public_key: get_bytes(fields, schema::signature::PUBLIC_KEY.id)?,
            signature: get_bytes(fields, schema::signature::SIGNATURE.id)?,
        })
    }
}

// ─── Transaction ─────────────────────────────────────────────────────────────

/// The wire envelope, exactly as the node serializes it.
///
/// This type does no validation: zero fields are legal and simply omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub message_type: String,
    pub msg: Any,
    pub signature: Option<Signature>,
    pub created_height: u64,
    /// Microseconds since the Unix epoch.
    pub time: u64,
    pub fee: u64,
    pub memo: String,
    pub network_id: u64,
    pub chain_id: u64,
}

impl Transaction {
    pub fn fields(&self) -> Vec<Field> {
        use schema::transaction::*;
        let signature = self
            .signature
            .as_ref()
            .map(Signature::fields)
            .unwrap_or_default();
        vec![
            MESSAGE_TYPE.with(self.message_type.as_str().into()),
            MSG.with(Value::Message(self.msg.fields())),
            SIGNATURE.with(Value::Message(signature)),
            CREATED_HEIGHT.with(self.created_height.into()),
            TIME.with(self.time.into()),
            FEE.with(self.fee.into()),
            MEMO.with(self.memo.as_str().into()),
            NETWORK_ID.with(self.network_id.into()),
            CHAIN_ID.with(self.chain_id.into()),
        ]
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        codec::encode(&self.fields())
    }

    /// The bytes a signer signs: the envelope with the signature left out.
    pub fn sign_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        let mut fields = self.fields();
        fields.retain(|f| f.id != schema::transaction::SIGNATURE.id);
        codec::encode(&fields)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, EncodingError> {
        use schema::transaction::*;
        let fields = codec::decode(&SCHEMA, bytes)?;
        let msg = match get(&fields, MSG.id) {
            Some(Value::Message(inner)) => Any::from_fields(inner)?,
            _ => Any::default(),
        };
        let signature = match get(&fields, SIGNATURE.id) {
            Some(Value::Message(inner)) => Some(Signature::from_fields(inner)?),
            _ => None,
        };
        Ok(Self {
            message_type: get_string(&fields, MESSAGE_TYPE.id)?,
            msg,
            signature,
            created_height: get_uint(&fields, CREATED_HEIGHT.id)?,
            time: get_uint(&fields, TIME.id)?,
            fee: get_uint(&fields, FEE.id)?,
            memo: get_string(&fields, MEMO.id)?,
            network_id: get_uint(&fields, NETWORK_ID.id)?,
            chain_id: get_uint(&fields, CHAIN_ID.id)?,
        })
    }
}

fn get(fields: &[Field], id: u32) -> Option<&Value> {
    fields.iter().find(|f| f.id == id).map(|f| &f.value)
}

fn unexpected(id: u32, value: &Value) -> EncodingError {
    EncodingError::Malformed(format!("field {} holds a {} value", id, value.kind()))
}

fn get_uint(fields: &[Field], id: u32) -> Result<u64, EncodingError> {
    match get(fields, id) {
        None => Ok(0),
        Some(Value::Uint(v)) => Ok(*v),
        Some(other) => Err(unexpected(id, other)),
    }
}

fn get_string(fields: &[Field], id: u32) -> Result<String, EncodingError> {
    match get(fields, id) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(unexpected(id, other)),
    }
}

fn get_bytes(fields: &[Field], id: u32) -> Result<Vec<u8>, EncodingError> {
    match get(fields, id) {
        None => Ok(Vec::new()),
        Some(Value::Bytes(b)) => Ok(b.clone()),
        Some(other) => Err(unexpected(id, other)),
    }
}

// ─── UnsignedTransaction ─────────────────────────────────────────────────────

/// A validated transaction awaiting its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub message: Message,
    pub created_height: u64,
    pub time: u64,
    pub fee: u64,
    pub memo: String,
    pub network_id: u64,
    pub chain_id: u64,
}

impl UnsignedTransaction {
    fn envelope(&self, signature: Option<Signature>) -> Result<Transaction, EncodingError> {
        Ok(Transaction {
            message_type: self.message.message_type().to_string(),
            msg: self.message.to_any()?,
            signature,
            created_height: self.created_height,
            time: self.time,
            fee: self.fee,
            memo: self.memo.clone(),
            network_id: self.network_id,
            chain_id: self.chain_id,
        })
    }

    pub fn sign_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        self.envelope(None)?.sign_bytes()
    }

    /// Sign with `key`.
    pub fn sign(self, key: &KeyEntry) -> Result<SignedTransaction, SdkError> {
        let sign_bytes = self.sign_bytes()?;
        tracing::debug!(
            message_type = self.message.message_type(),
            curve = %key.curve(),
            signer = %key.address(),
            len = sign_bytes.len(),
            "signing transaction"
        );
        let signature = Signature {
            public_key: key.public_key().to_vec(),
            signature: key.sign(&sign_bytes)?,
        };
        Ok(self.with_signature(signature))
    }

    /// Attach a signature produced elsewhere, e.g. by a hardware signer.
    pub fn with_signature(self, signature: Signature) -> SignedTransaction {
        SignedTransaction {
            message_type: self.message.message_type().to_string(),
            msg: self.message,
            signature,
            created_height: self.created_height,
            time: self.time,
            fee: self.fee,
            memo: self.memo,
            network_id: self.network_id,
            chain_id: self.chain_id,
        }
    }
}

// ─── SignedTransaction ───────────────────────────────────────────────────────

/// A signed transaction in the JSON form `POST /v1/tx` accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSignedTransaction")]
pub struct SignedTransaction {
    #[serde(rename = "type")]
    pub message_type: String,
    pub msg: Message,
    pub signature: Signature,
    pub created_height: u64,
    pub time: u64,
    pub fee: u64,
    #[serde(default)]
    pub memo: String,
    #[serde(rename = "networkID")]
    pub network_id: u64,
    #[serde(rename = "chainID")]
    pub chain_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSignedTransaction {
    #[serde(rename = "type")]
    message_type: String,
    msg: serde_json::Value,
    signature: Signature,
    #[serde(default)]
    created_height: u64,
    #[serde(default)]
    time: u64,
    #[serde(default)]
    fee: u64,
    #[serde(default)]
    memo: String,
    #[serde(rename = "networkID", default)]
    network_id: u64,
    #[serde(rename = "chainID", default)]
    chain_id: u64,
}

impl TryFrom<RawSignedTransaction> for SignedTransaction {
    type Error = SdkError;

    fn try_from(raw: RawSignedTransaction) -> Result<Self, Self::Error> {
        let msg = Message::from_json(&raw.message_type, raw.msg)?;
        Ok(Self {
            message_type: raw.message_type,
            msg,
            signature: raw.signature,
            created_height: raw.created_height,
            time: raw.time,
            fee: raw.fee,
            memo: raw.memo,
            network_id: raw.network_id,
            chain_id: raw.chain_id,
        })
    }
}

impl SignedTransaction {
    /// Rebuild the wire envelope.
    pub fn to_transaction(&self) -> Result<Transaction, EncodingError> {
        Ok(Transaction {
            message_type: self.message_type.clone(),
            msg: self.msg.to_any()?,
            signature: Some(self.signature.clone()),
            created_height: self.created_height,
            time: self.time,
            fee: self.fee,
            memo: self.memo.clone(),
            network_id: self.network_id,
            chain_id: self.chain_id,
        })
    }

    /// Canonical bytes of the full signed envelope.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        self.to_transaction()?.encode()
    }

    pub fn sign_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        self.to_transaction()?.sign_bytes()
    }

    /// Re-derive the sign-bytes and check the attached signature.
    pub fn verify(&self) -> Result<(), SdkError> {
        if self.message_type != self.msg.message_type() {
            return Err(ValidationError::InvalidField {
                field: "type",
                reason: format!(
                    "{} does not match payload {}",
                    self.message_type,
                    self.msg.message_type()
                ),
            }
            .into());
        }
        let curve = self.signature.curve()?;
        let sign_bytes = self.sign_bytes()?;
        if !crypto::verify(
            curve,
            &self.signature.public_key,
            &sign_bytes,
            &self.signature.signature,
        ) {
            return Err(CryptoError::InvalidSignature { curve }.into());
        }
        Ok(())
    }

    /// Lowercase hex SHA-256 of the encoded signed transaction.
    pub fn hash(&self) -> Result<String, EncodingError> {
        Ok(hex::encode(Sha256::digest(self.encode()?)))
    }

    /// Id of the order a `createOrder` transaction opens. See
    /// [`MessageCreateOrder::order_id`]; the envelope and signature do not
    /// enter into it.
    pub fn order_id(&self) -> Result<OrderId, SdkError> {
        match &self.msg {
            Message::CreateOrder(create) => Ok(create.order_id()?),
            _ => Err(ValidationError::InvalidField {
                field: "type",
                reason: format!("{} does not create an order", self.message_type),
            }
            .into()),
        }
    }
}
