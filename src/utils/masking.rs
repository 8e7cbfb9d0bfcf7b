// Mascaramento de dados sensíveis antes de irem para o log

/// Masks a CPF for logging: first 3 and last 2 characters visible.
///
/// Values of 5 characters or fewer carry nothing safe to show and become `***`.
pub fn mask_cpf(cpf: &str) -> String {
    let chars: Vec<char> = cpf.chars().collect();
    if chars.len() <= 5 {
        return "***".to_string();
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}...{tail}")
}

/// Masks a secret key as `abc...xyz (N caracteres)`.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 6 {
        return format!("*** ({} caracteres)", chars.len());
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{head}...{tail} ({} caracteres)", chars.len())
}
