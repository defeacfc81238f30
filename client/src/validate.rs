//! Field validators.
//!
//! Validators are pure: they take the normalized display value and return a
//! boolean or a structured error kind. They never raise notifications; the
//! tab gate and reducers own presentation.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Symbols accepted by the password strength check.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/|~";

/// Minimum age accepted at registration.
pub const MINIMUM_AGE_YEARS: i32 = 18;

/// Combined first+last name length cap.
pub const MAX_NAME_LENGTH: usize = 255;

/// Why a birth date was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthDateError {
    /// Not in `DD/MM/YYYY` shape.
    Format,
    /// Shaped correctly but not a real calendar date.
    InvalidDate,
    /// Valid date, but the computed age is under the minimum.
    Underage,
}

/// Validate a CPF (Brazilian tax id) in masked or unmasked form.
///
/// Strips non-digits, rejects anything that is not exactly 11 digits or is
/// a run of one repeated digit, then verifies both check digits with the
/// standard modulo-11 weighted sums (weights 10..2 for the first digit,
/// 11..2 for the second; remainder < 2 maps to 0, otherwise `11 - r`).
///
/// # Examples
///
/// ```
/// use inkbook_client::validate::is_valid_cpf;
///
/// assert!(is_valid_cpf("529.982.247-25"));
/// assert!(!is_valid_cpf("111.111.111-11"));
/// assert!(!is_valid_cpf("529.982.247-20"));
/// ```
#[must_use]
pub fn is_valid_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let first_weight = (len + 1) as u32;
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, &d)| d * (first_weight - i as u32))
            .sum();
        match sum % 11 {
            0 | 1 => 0,
            r => 11 - r,
        }
    };

    digits[9] == check(9) && digits[10] == check(10)
}

/// Validate a `DD/MM/YYYY` birth date against the injected "now".
///
/// Calendar validity is established by reconstructing the date from its
/// parsed components; `31/02/2000` has no reconstruction and is rejected.
/// A date exactly [`MINIMUM_AGE_YEARS`] years before today is accepted.
///
/// # Errors
///
/// Returns the first failing [`BirthDateError`] kind.
pub fn validate_birth_date(value: &str, now: DateTime<Utc>) -> Result<(), BirthDateError> {
    let parts: Vec<&str> = value.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(BirthDateError::Format);
    };

    if day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return Err(BirthDateError::Format);
    }

    let (Ok(day), Ok(month), Ok(year)) =
        (day.parse::<u32>(), month.parse::<u32>(), year.parse::<i32>())
    else {
        return Err(BirthDateError::Format);
    };

    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return Err(BirthDateError::InvalidDate);
    };

    let today = now.date_naive();
    let mut age = today.year() - date.year();
    if (today.month(), today.day()) < (date.month(), date.day()) {
        age -= 1;
    }

    if age < MINIMUM_AGE_YEARS {
        return Err(BirthDateError::Underage);
    }

    Ok(())
}

/// Password strength: length ≥ 8, one uppercase letter, one digit, one
/// symbol from [`PASSWORD_SYMBOLS`].
///
/// # Examples
///
/// ```
/// use inkbook_client::validate::is_valid_password;
///
/// assert!(!is_valid_password("abcdefgh"));
/// assert!(is_valid_password("Abcdefg1!"));
/// ```
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Mobile phone: exactly 11 digits after stripping the mask.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() == 11
}

/// Combined first+last name length within [`MAX_NAME_LENGTH`].
#[must_use]
pub fn name_within_limit(first: &str, last: &str) -> bool {
    first.chars().count() + last.chars().count() <= MAX_NAME_LENGTH
}

/// Structural email check: exactly one `@`, non-empty local and domain
/// parts, a dot in the domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 || email.matches('@').count() != 1 {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        },
        None => false,
    }
}
