use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::digits::digits_only;
use crate::utils::money::serialize_reais;

pub const KIT_AMOUNT_CENTS: u64 = 8470;
pub const KIT_DESCRIPTION: &str = "Kit de Segurança";
pub const CPF_LENGTH: usize = 11;

/// Raw, untrusted payload posted by the checkout form.
///
/// The form has shipped with both English and Portuguese field names, and
/// some clients post CPF and phone as JSON numbers. When both spellings are
/// sent, the Portuguese one (`nome`, `telefone`) wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "WireUserInput")]
pub struct UserInput {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
struct WireUserInput {
    #[serde(default, deserialize_with = "lenient_string")]
    nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    cpf: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    telefone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    phone: Option<String>,
}

impl From<WireUserInput> for UserInput {
    fn from(wire: WireUserInput) -> Self {
        Self {
            name: wire.nome.or(wire.name),
            cpf: wire.cpf,
            phone: wire.telefone.or(wire.phone),
        }
    }
}

/// Name of a JSON value's type, for messages that must not echo the value.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "nulo",
        Value::Bool(_) => "booleano",
        Value::Number(_) => "número",
        Value::String(_) => "texto",
        Value::Array(_) => "array",
        Value::Object(_) => "objeto",
    }
}

// O valor rejeitado pode ser um CPF: só o tipo entra na mensagem
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "esperado texto, recebido {}",
            json_kind(&other)
        ))),
    }
}

/// Canonical request handed to a payment gateway. Built only by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub name: String,
    pub email: String,
    pub cpf: String,
    #[serde(rename = "amount", serialize_with = "serialize_reais")]
    pub amount_cents: u64,
    pub phone: String,
    pub description: String,
}

impl PaymentRequest {
    /// A CPF is well formed when it has exactly 11 digits.
    /// Malformed CPFs are still forwarded; callers only get to know about it.
    pub fn has_valid_cpf(&self) -> bool {
        self.cpf.len() == CPF_LENGTH && digits_only(&self.cpf) == self.cpf
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Expired,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub id: String,
    pub pix_code: String,
    pub pix_qr_code: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}
