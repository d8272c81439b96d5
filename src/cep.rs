//! CEP (Brazilian postal code) validation and the lookup contract.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A validated 8-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

#[derive(Debug, Error)]
pub enum CepError {
    #[error("`{0}` is not a valid CEP (expected 8 digits)")]
    Invalid(String),
    #[error("CEP lookup failed: {0}")]
    Lookup(String),
}

impl Cep {
    /// Accepts raw input with common separators (`01310-100`, `01310.100`,
    /// spaces) and normalizes it to bare digits. Anything else is rejected
    /// before a lookup is ever issued.
    pub fn parse(raw: &str) -> Result<Self, CepError> {
        let mut digits = String::with_capacity(8);
        for ch in raw.trim().chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
            } else if !matches!(ch, '-' | '.' | ' ') {
                return Err(CepError::Invalid(raw.to_string()));
            }
        }
        if digits.len() != 8 {
            return Err(CepError::Invalid(raw.to_string()));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The conventional `XXXXX-XXX` rendering.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Address fields returned by a single lookup. Always applied as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state_code: String,
}

/// External postal-code resolution collaborator.
pub trait CepLookup {
    /// `Ok(None)` means the code is well-formed but unknown.
    fn lookup(&self, cep: &Cep) -> Result<Option<Address>, CepError>;
}

/// Fixture-backed lookup used by tests and demos.
#[derive(Debug, Default)]
pub struct StaticCepLookup {
    entries: HashMap<Cep, Address>,
}

impl StaticCepLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cep: Cep, address: Address) {
        self.entries.insert(cep, address);
    }
}

impl CepLookup for StaticCepLookup {
    fn lookup(&self, cep: &Cep) -> Result<Option<Address>, CepError> {
        Ok(self.entries.get(cep).cloned())
    }
}
