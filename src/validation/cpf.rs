//! CPF (Brazilian individual taxpayer number) checksum validation
//!
//! A CPF is 11 digits: nine base digits followed by two mod-11 check digits.
//! Input may carry any punctuation; only ASCII digits are considered.

const CPF_LEN: usize = 11;

/// Strip everything but ASCII digits
pub fn normalize(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Whether `input` is a CPF with matching check digits
///
/// Inputs that do not normalize to exactly 11 digits are invalid, as are
/// the repeated-digit sequences `111.111.111-11` through `999.999.999-99`.
pub fn is_valid(input: &str) -> bool {
    let digits = digits(input);
    if digits.len() != CPF_LEN || is_repeated_sequence(&digits) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Render an 11-digit input as `000.000.000-00`
pub fn format(input: &str) -> Option<String> {
    let normalized = normalize(input);
    if normalized.len() != CPF_LEN {
        return None;
    }

    Some(format!(
        "{}.{}.{}-{}",
        &normalized[0..3],
        &normalized[3..6],
        &normalized[6..9],
        &normalized[9..11]
    ))
}

fn digits(input: &str) -> Vec<u32> {
    input.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// `11111111111` through `99999999999`
fn is_repeated_sequence(digits: &[u32]) -> bool {
    let first = digits[0];
    first != 0 && digits.iter().all(|&d| d == first)
}

/// Weights run from `len + 1` down to 2
fn check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=digits.len() as u32 + 1).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("52998224725", true)]
    #[case("529.982.247-25", true)]
    #[case("111.444.777-35", true)]
    #[case(" 111 444 777 35 ", true)]
    #[case("11111111111", false)]
    #[case("99999999999", false)]
    #[case("123", false)]
    #[case("", false)]
    #[case("529982247250", false)]
    #[case("52998224752", false)]
    #[case("25998224725", false)]
    #[case("52998224735", false)]
    #[case("abc.def.ghi-jk", false)]
    fn test_is_valid(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid(input), expected, "input: {input:?}");
    }

    #[test]
    fn test_all_zeros_passes_checksum() {
        assert!(is_valid("000.000.000-00"));
    }

    #[test]
    fn test_check_digits() {
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), 2);
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7, 2]), 5);
        assert_eq!(check_digit(&[1, 1, 1, 4, 4, 4, 7, 7, 7]), 3);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("529.982.247-25"), "52998224725");
        assert_eq!(normalize("a1b2"), "12");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_format() {
        assert_eq!(format("52998224725").as_deref(), Some("529.982.247-25"));
        assert_eq!(format("529.982.247-25").as_deref(), Some("529.982.247-25"));
        assert_eq!(format("5299822472"), None);
    }
}
