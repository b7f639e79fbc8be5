use rand::rngs::OsRng;
use rand::Rng;

pub const DEFAULT_CODE_LENGTH: usize = 6;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Numeric one-time password of exactly `length` digits.
///
/// The first digit is drawn from 1-9 and the rest from 0-9, which is a uniform
/// draw over `[10^(length-1), 10^length)` without any upper bound on `length`.
pub fn generate_otp(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|i| {
            let low = if i == 0 { 1 } else { 0 };
            char::from(b'0' + rng.gen_range(low..10u8))
        })
        .collect()
}

/// Alphanumeric code of exactly `length` characters (A-Z, a-z, 0-9)
pub fn generate_random_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn otp_has_exact_digit_count() {
        for length in [1, 4, 6, 8, 25] {
            for _ in 0..200 {
                let otp = generate_otp(length);
                assert_eq!(otp.len(), length);
                assert!(otp.chars().all(|c| c.is_ascii_digit()), "{}", otp);
                assert_ne!(otp.as_bytes()[0], b'0', "{}", otp);
            }
        }
    }

    #[test]
    fn otp_leading_digits_are_spread() {
        let leading: HashSet<char> = (0..2000).filter_map(|_| generate_otp(6).chars().next()).collect();
        let expected: HashSet<char> = "123456789".chars().collect();
        assert_eq!(leading, expected);
    }

    #[test]
    fn random_code_uses_alphabet() {
        for _ in 0..200 {
            let code = generate_random_code(8);
            assert_eq!(code.len(), 8);
            assert!(code.bytes().all(|b| ALPHANUMERIC.contains(&b)), "{}", code);
        }
    }

    #[test]
    fn random_codes_differ() {
        let codes: HashSet<String> = (0..100).map(|_| generate_random_code(DEFAULT_CODE_LENGTH)).collect();
        assert!(codes.len() > 95);
    }

    #[test]
    fn alphabet_has_62_symbols() {
        let unique: HashSet<&u8> = ALPHANUMERIC.iter().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate_otp(0), "");
        assert_eq!(generate_random_code(0), "");
    }
}
