//! Synthetic contact data for payers who did not provide usable values.
//!
//! Nothing here guarantees uniqueness; two payers named alike may collide.

use rand::seq::SliceRandom;
use rand::Rng;

pub const EMAIL_DOMAINS: [&str; 4] = ["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

/// Builds `<alphanumeric lower-cased name><4 digits>@<domain>`.
pub fn generate_email<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    let clean_name: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    let suffix = random_digits(rng, 4);
    let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or(EMAIL_DOMAINS[0]);

    format!("{clean_name}{suffix}@{domain}")
}

/// Brazilian-shaped number: 2-digit area code in 11..=99 followed by 9 digits.
pub fn generate_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let ddd: u8 = rng.gen_range(11..=99);
    format!("{ddd}{}", random_digits(rng, 9))
}

fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
