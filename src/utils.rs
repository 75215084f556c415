use rand::distr::{Alphanumeric, SampleString};

/// Random alphanumeric code for shareable links (gift links, sprout
/// requests). 10 characters over [0-9A-Za-z] is enough entropy that we rely
/// on the unique index instead of a retry loop.
pub fn generate_code(length: usize) -> String {
    Alphanumeric.sample_string(&mut rand::rng(), length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_have_requested_length_and_charset() {
        let code = generate_code(10);

        assert_eq!(code.len(), 10);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_consecutive_codes_differ() {
        assert_ne!(generate_code(10), generate_code(10));
    }
}
