//! Turns an untrusted [`UserInput`] into the canonical [`PaymentRequest`].

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::payment::{
    PaymentRequest, UserInput, CPF_LENGTH, KIT_AMOUNT_CENTS, KIT_DESCRIPTION,
};
use crate::services::identity::{generate_email, generate_phone};
use crate::utils::digits::digits_only;
use crate::utils::masking::mask_cpf;
use crate::utils::money::format_brl;

const MIN_PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Nenhum dado de usuário fornecido")]
    EmptyPayload,
    #[error("Nome do usuário é obrigatório")]
    MissingName,
    #[error("CPF do usuário é obrigatório")]
    MissingCpf,
}

/// Validates required fields, then sanitizes CPF and phone and fills in
/// synthetic contact data. A CPF without 11 digits is logged, not rejected.
pub fn normalize<R: Rng + ?Sized>(
    input: Option<&UserInput>,
    rng: &mut R,
) -> Result<PaymentRequest, ValidationError> {
    let input = input.ok_or_else(|| {
        warn!("Dados de usuário vazios");
        ValidationError::EmptyPayload
    })?;

    let raw_name = non_empty(input.name.as_deref()).ok_or_else(|| {
        warn!("Nome do usuário não fornecido");
        ValidationError::MissingName
    })?;

    let raw_cpf = non_empty(input.cpf.as_deref()).ok_or_else(|| {
        warn!("CPF do usuário não fornecido");
        ValidationError::MissingCpf
    })?;

    info!("Valor do Kit de Segurança: {}", format_brl(KIT_AMOUNT_CENTS));

    let cpf = digits_only(raw_cpf);
    if cpf.len() != CPF_LENGTH {
        warn!(
            "CPF com formato inválido: {} ({} dígitos)",
            mask_cpf(&cpf),
            cpf.len()
        );
    } else {
        info!("CPF formatado: {}", mask_cpf(&cpf));
    }

    let name = raw_name.trim().to_string();
    let email = generate_email(&name, rng);
    info!("Email gerado: {}", email);

    let phone_digits = input.phone.as_deref().map(digits_only).unwrap_or_default();
    let phone = if phone_digits.len() < MIN_PHONE_DIGITS {
        let generated = generate_phone(rng);
        info!(
            "Telefone inválido ({} dígitos), gerado novo: {}",
            phone_digits.len(),
            generated
        );
        generated
    } else {
        info!("Telefone formatado: {}", phone_digits);
        phone_digits
    };

    info!("Preparando pagamento para: {} (CPF: {})", name, mask_cpf(&cpf));

    Ok(PaymentRequest {
        name,
        email,
        cpf,
        amount_cents: KIT_AMOUNT_CENTS,
        phone,
        description: KIT_DESCRIPTION.to_string(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::identity::EMAIL_DOMAINS;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input(name: Option<&str>, cpf: Option<&str>, phone: Option<&str>) -> UserInput {
        UserInput {
            name: name.map(str::to_string),
            cpf: cpf.map(str::to_string),
            phone: phone.map(str::to_string),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn maria_silva_example() {
        let request = normalize(
            Some(&input(Some("Maria Silva"), Some("111.222.333-44"), None)),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(request.cpf, "11122233344");
        assert_eq!(request.name, "Maria Silva");
        assert!(EMAIL_DOMAINS
            .iter()
            .any(|domain| request.email.ends_with(&format!("@{domain}"))));
        assert!(request.email.starts_with("mariasilva"));
        assert_eq!(request.phone.len(), 11);
        assert!(request.phone.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(request.amount_cents, 8470);
        assert_eq!(request.description, "Kit de Segurança");
    }

    #[test]
    fn absent_payload_is_rejected() {
        assert_eq!(
            normalize(None, &mut rng()),
            Err(ValidationError::EmptyPayload)
        );
    }

    #[test]
    fn missing_or_empty_name_is_rejected() {
        let err = normalize(Some(&input(None, Some("11122233344"), None)), &mut rng());
        assert_eq!(err, Err(ValidationError::MissingName));

        let err = normalize(Some(&input(Some(""), Some("11122233344"), None)), &mut rng());
        assert_eq!(err, Err(ValidationError::MissingName));
    }

    #[test]
    fn missing_or_empty_cpf_is_rejected() {
        let err = normalize(Some(&input(Some("Ana"), None, None)), &mut rng());
        assert_eq!(err, Err(ValidationError::MissingCpf));

        let err = normalize(Some(&input(Some("Ana"), Some(""), None)), &mut rng());
        assert_eq!(err, Err(ValidationError::MissingCpf));
    }

    #[test]
    fn validation_runs_before_any_random_draw() {
        let mut untouched = rng();
        let mut used = rng();
        let _ = normalize(Some(&input(Some("Ana"), None, None)), &mut used);

        assert_eq!(untouched.gen::<u64>(), used.gen::<u64>());
    }

    #[test]
    fn malformed_cpf_is_kept() {
        let request =
            normalize(Some(&input(Some("Ana"), Some("123-45"), None)), &mut rng()).unwrap();
        assert_eq!(request.cpf, "12345");
        assert!(!request.has_valid_cpf());
    }

    #[test]
    fn name_is_trimmed() {
        let request = normalize(
            Some(&input(Some("  Ana Paula  "), Some("11122233344"), None)),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(request.name, "Ana Paula");
    }

    #[test]
    fn valid_phone_is_cleaned_and_kept() {
        let request = normalize(
            Some(&input(Some("Ana"), Some("11122233344"), Some("(21) 3456-7890"))),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(request.phone, "2134567890");
    }

    proptest! {
        #[test]
        fn short_phones_are_replaced(phone in "[0-9]{0,9}", noise in "[ ()\\-]{0,4}") {
            let raw = format!("{noise}{phone}");
            let request = normalize(
                Some(&input(Some("Ana"), Some("11122233344"), Some(&raw))),
                &mut rng(),
            )
            .unwrap();

            prop_assert_eq!(request.phone.len(), 11);
            prop_assert_ne!(request.phone, raw);
        }

        #[test]
        fn amount_and_description_are_fixed(name in "[A-Za-z ]{1,30}", cpf in "[0-9.\\-]{1,20}") {
            let request = normalize(Some(&input(Some(&name), Some(&cpf), None)), &mut rng()).unwrap();
            prop_assert_eq!(request.amount_cents, KIT_AMOUNT_CENTS);
            prop_assert_eq!(request.description.as_str(), KIT_DESCRIPTION);
        }
    }
}
