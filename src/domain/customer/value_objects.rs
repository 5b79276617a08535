use serde::{Deserialize, Serialize};

use super::errors::CustomerError;

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Brazilian postal code (CEP), normalized to its eight digits.
///
/// Separators (`-`, `.`) and surrounding whitespace are stripped before the
/// format check, so `"78085-630"` and `"78085630"` are the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    pub const LENGTH: usize = 8;

    pub fn parse(raw: impl AsRef<str>) -> Result<Self, CustomerError> {
        let raw = raw.as_ref();
        let normalized = strip_separators(raw);

        if normalized.len() != Self::LENGTH || !normalized.chars().all(|c| c.is_ascii_digit()) {
            return Err(CustomerError::InvalidPostalCode(raw.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = CustomerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PostalCode> for String {
    fn from(value: PostalCode) -> Self {
        value.0
    }
}

/// Customer document number: CPF (11 digits) or CNPJ (14 digits).
///
/// `new` only normalizes, so a customer rehydrated from storage can still
/// carry a malformed number and report it through `Customer::validate`.
/// Boundaries that must fail fast use `parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        Self(strip_separators_and(raw, &['/']))
    }

    pub fn parse(raw: impl AsRef<str>) -> Result<Self, CustomerError> {
        let document = Self::new(raw.as_ref());
        if !document.is_valid() {
            return Err(CustomerError::InvalidDocumentNumber(raw.as_ref().to_string()));
        }
        Ok(document)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        let Some(digits) = to_digits(&self.0) else {
            return false;
        };

        // Repeated digits pass the checksum but are never issued
        if digits.windows(2).all(|w| w[0] == w[1]) {
            return false;
        }

        match digits.len() {
            11 => is_valid_cpf(&digits),
            14 => is_valid_cnpj(&digits),
            _ => false,
        }
    }
}

impl std::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_separators(raw: &str) -> String {
    strip_separators_and(raw, &[])
}

fn strip_separators_and(raw: &str, extra: &[char]) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '.' && !extra.contains(c))
        .collect()
}

fn to_digits(value: &str) -> Option<Vec<u32>> {
    value.chars().map(|c| c.to_digit(10)).collect()
}

fn is_valid_cpf(digits: &[u32]) -> bool {
    let check = |len: usize| {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let remainder = (sum * 10) % 11;
        if remainder == 10 { 0 } else { remainder }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

fn is_valid_cnpj(digits: &[u32]) -> bool {
    const FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let check = |weights: &[u32]| {
        let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
        let remainder = sum % 11;
        if remainder < 2 { 0 } else { 11 - remainder }
    };

    check(&FIRST) == digits[12] && check(&SECOND) == digits[13]
}
