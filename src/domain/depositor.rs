//! Domain type for counterparties (depositors).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cep::{Address, Cep};
use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// Minimum length accepted for a depositor display name.
pub const MIN_DISPLAY_NAME_LEN: usize = 3;

/// A vendor or payer a bill can reference. Address fields are independently
/// optional; a successful postal-code lookup fills them as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Depositor {
    pub id: Uuid,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Depositor {
    pub fn new(display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            postal_code: None,
            street: None,
            number: None,
            neighborhood: None,
            city: None,
            state_code: None,
            cpf: None,
            cnpj: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a postal-code lookup result. Street, neighborhood, city, and
    /// state always change together with the code that produced them.
    pub fn apply_address(&mut self, cep: &Cep, address: Address) {
        self.postal_code = Some(cep.as_str().to_string());
        self.street = Some(address.street);
        self.neighborhood = Some(address.neighborhood);
        self.city = Some(address.city);
        self.state_code = Some(address.state_code);
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Strips formatting from CPF/CNPJ input, keeping digits only.
pub fn normalize_tax_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

impl Identifiable for Depositor {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Depositor {
    fn name(&self) -> &str {
        &self.display_name
    }
}

impl Displayable for Depositor {
    fn display_label(&self) -> String {
        match (&self.city, &self.state_code) {
            (Some(city), Some(state)) => format!("{} ({}/{})", self.display_name, city, state),
            _ => self.display_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_address_fills_all_fields_together() {
        let mut depositor = Depositor::new("Condomínio Central");
        let cep = Cep::parse("01310-100").unwrap();
        depositor.apply_address(
            &cep,
            Address {
                street: "Avenida Paulista".into(),
                neighborhood: "Bela Vista".into(),
                city: "São Paulo".into(),
                state_code: "SP".into(),
            },
        );
        assert_eq!(depositor.postal_code.as_deref(), Some("01310100"));
        assert_eq!(depositor.street.as_deref(), Some("Avenida Paulista"));
        assert_eq!(depositor.neighborhood.as_deref(), Some("Bela Vista"));
        assert_eq!(depositor.city.as_deref(), Some("São Paulo"));
        assert_eq!(depositor.state_code.as_deref(), Some("SP"));
    }

    #[test]
    fn normalize_tax_id_keeps_digits_only() {
        assert_eq!(normalize_tax_id("123.456.789-09"), "12345678909");
        assert_eq!(normalize_tax_id("12.345.678/0001-95"), "12345678000195");
    }
}
