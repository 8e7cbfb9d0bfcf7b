// Utilitários para manipulação de valores monetários (centavos de real)

use serde::Serializer;

pub fn cents_to_reais(cents: u64) -> f64 {
    cents as f64 / 100.0
}

pub fn format_brl(cents: u64) -> String {
    format!("R$ {}.{:02}", cents / 100, cents % 100)
}

/// Serializes an amount held in cents as a decimal number of reais.
pub fn serialize_reais<S>(cents: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(cents_to_reais(*cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_to_reais() {
        assert_eq!(cents_to_reais(8470), 84.70);
        assert_eq!(cents_to_reais(0), 0.0);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(8470), "R$ 84.70");
        assert_eq!(format_brl(5), "R$ 0.05");
        assert_eq!(format_brl(100000), "R$ 1000.00");
    }

    #[test]
    fn test_serialize_reais() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_reais")]
            amount: u64,
        }

        let json = serde_json::to_value(Wrapper { amount: 8470 }).unwrap();
        assert_eq!(json["amount"], serde_json::json!(84.7));
    }
}
