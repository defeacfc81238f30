//! Input formatters.
//!
//! Each formatter takes whatever the user typed and returns the normalized
//! display string, progressively inserting punctuation as digits arrive.
//! Formatters never reject input: non-digits are stripped and overflow
//! digits are truncated.

/// Extract at most `max` ASCII digits from raw input.
fn digits(raw: &str, max: usize) -> Vec<char> {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Progressive CPF mask: `000.000.000-00`.
///
/// # Examples
///
/// ```
/// use inkbook_client::format::format_cpf;
///
/// assert_eq!(format_cpf("529"), "529");
/// assert_eq!(format_cpf("5299822"), "529.982.2");
/// assert_eq!(format_cpf("52998224725"), "529.982.247-25");
/// assert_eq!(format_cpf("52998224725999"), "529.982.247-25");
/// ```
#[must_use]
pub fn format_cpf(raw: &str) -> String {
    let digits = digits(raw, 11);
    let mut out = String::with_capacity(14);

    for (i, d) in digits.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {},
        }
        out.push(*d);
    }

    out
}

/// Progressive mobile phone mask: `(00) 00000-0000`.
///
/// # Examples
///
/// ```
/// use inkbook_client::format::format_phone;
///
/// assert_eq!(format_phone("1"), "(1");
/// assert_eq!(format_phone("119"), "(11) 9");
/// assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
/// ```
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits = digits(raw, 11);
    let mut out = String::with_capacity(15);

    for (i, d) in digits.iter().enumerate() {
        match i {
            0 => out.push('('),
            2 => out.push_str(") "),
            7 => out.push('-'),
            _ => {},
        }
        out.push(*d);
    }

    out
}

/// Progressive CEP mask: `00000-000`.
///
/// # Examples
///
/// ```
/// use inkbook_client::format::format_cep;
///
/// assert_eq!(format_cep("0131"), "0131");
/// assert_eq!(format_cep("01310100"), "01310-100");
/// ```
#[must_use]
pub fn format_cep(raw: &str) -> String {
    let digits = digits(raw, 8);
    let mut out = String::with_capacity(9);

    for (i, d) in digits.iter().enumerate() {
        if i == 5 {
            out.push('-');
        }
        out.push(*d);
    }

    out
}

/// Progressive date mask: `DD/MM/YYYY`.
///
/// # Examples
///
/// ```
/// use inkbook_client::format::format_birth_date;
///
/// assert_eq!(format_birth_date("15"), "15");
/// assert_eq!(format_birth_date("1506"), "15/06");
/// assert_eq!(format_birth_date("15062000"), "15/06/2000");
/// ```
#[must_use]
pub fn format_birth_date(raw: &str) -> String {
    let digits = digits(raw, 8);
    let mut out = String::with_capacity(10);

    for (i, d) in digits.iter().enumerate() {
        if i == 2 || i == 4 {
            out.push('/');
        }
        out.push(*d);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_mask_strips_and_truncates() {
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
        assert_eq!(format_cpf("abc529xyz982"), "529.982");
        assert_eq!(format_cpf(""), "");
    }

    #[test]
    fn test_phone_mask_progressive() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("11"), "(11");
        assert_eq!(format_phone("1198765"), "(11) 98765");
        assert_eq!(format_phone("11-98765-4321"), "(11) 98765-4321");
    }

    #[test]
    fn test_cep_mask() {
        assert_eq!(format_cep("01310-100"), "01310-100");
        assert_eq!(format_cep("013101009"), "01310-100");
    }

    #[test]
    fn test_birth_date_mask_never_rejects() {
        // Calendar-invalid input is still masked; validation is separate.
        assert_eq!(format_birth_date("31022000"), "31/02/2000");
        assert_eq!(format_birth_date("99"), "99");
    }
}
