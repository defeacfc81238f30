//! Address consistency checking.
//!
//! Once a postal-code lookup succeeds, the state/city/district fields must
//! keep matching the lookup result. The check is pure; the wizard reducer
//! runs it whenever the lookup result or any of the three fields changes,
//! and the tab gate runs it again on "Next"/submit.

use serde::{Deserialize, Serialize};

/// Result of a successful postal-code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    /// Street name (`logradouro`).
    pub street: String,
    /// District (`bairro`).
    pub district: String,
    /// City (`localidade`).
    pub city: String,
    /// Two-letter state code (`uf`).
    pub state: String,
}

/// Which address field disagrees with the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    /// State (`uf`) field.
    State,
    /// City field.
    City,
    /// District field.
    District,
}

impl AddressField {
    /// Form-field identifier for this address field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::City => "city",
            Self::District => "district",
        }
    }
}

/// A single field disagreeing with the postal lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMismatch {
    /// The disagreeing field.
    pub field: AddressField,
    /// The value the lookup expects.
    pub expected: String,
    /// User-facing message naming the expected value.
    pub message: String,
}

fn matches_lookup(entered: &str, expected: &str) -> bool {
    entered.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Compare entered state/city/district against a successful lookup.
///
/// The three comparisons are independent (case-insensitive, trimmed); one
/// mismatch entry is produced per disagreeing field, in state → city →
/// district order.
///
/// # Examples
///
/// ```
/// use inkbook_client::address::{check_consistency, AddressField, PostalAddress};
///
/// let lookup = PostalAddress {
///     street: "Avenida Paulista".into(),
///     district: "Centro".into(),
///     city: "São Paulo".into(),
///     state: "SP".into(),
/// };
///
/// let mismatches = check_consistency(&lookup, "RJ", "São Paulo", "Centro");
/// assert_eq!(mismatches.len(), 1);
/// assert_eq!(mismatches[0].field, AddressField::State);
/// assert_eq!(mismatches[0].message, "Estado deve ser SP para este CEP");
/// ```
#[must_use]
pub fn check_consistency(
    lookup: &PostalAddress,
    state: &str,
    city: &str,
    district: &str,
) -> Vec<AddressMismatch> {
    let mut mismatches = Vec::new();

    if !matches_lookup(state, &lookup.state) {
        mismatches.push(AddressMismatch {
            field: AddressField::State,
            expected: lookup.state.clone(),
            message: format!("Estado deve ser {} para este CEP", lookup.state),
        });
    }

    if !matches_lookup(city, &lookup.city) {
        mismatches.push(AddressMismatch {
            field: AddressField::City,
            expected: lookup.city.clone(),
            message: format!("Cidade deve ser {} para este CEP", lookup.city),
        });
    }

    if !matches_lookup(district, &lookup.district) {
        mismatches.push(AddressMismatch {
            field: AddressField::District,
            expected: lookup.district.clone(),
            message: format!("Bairro deve ser {} para este CEP", lookup.district),
        });
    }

    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> PostalAddress {
        PostalAddress {
            street: "Avenida Paulista".into(),
            district: "Centro".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
        }
    }

    #[test]
    fn test_match_is_case_insensitive_and_trimmed() {
        let mismatches = check_consistency(&lookup(), " sp ", "são paulo", "CENTRO");
        assert!(mismatches.is_empty());
    }

    #[test]
    fn test_each_field_checked_independently() {
        let mismatches = check_consistency(&lookup(), "RJ", "Campinas", "Centro");
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].field, AddressField::State);
        assert_eq!(mismatches[1].field, AddressField::City);
        assert_eq!(
            mismatches[1].message,
            "Cidade deve ser São Paulo para este CEP"
        );
    }

    #[test]
    fn test_autofilled_values_match_by_construction() {
        let l = lookup();
        let mismatches = check_consistency(&l, &l.state, &l.city, &l.district);
        assert!(mismatches.is_empty());
    }
}
