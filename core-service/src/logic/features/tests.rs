//! Integration Tests for Feature Extraction
//!
//! Whole-pipeline checks over hostile and malformed inputs.

#[cfg(test)]
mod integration_tests {
    use crate::logic::features::{extract_features, FEATURE_COUNT};

    const HOSTILE_INPUTS: &[&str] = &[
        "",
        " ",
        "\t\r\n",
        "http://",
        "https://",
        "://",
        "[",
        "]",
        "http://[",
        "http://]/",
        "http://[::1]:99999",
        "http://@",
        "http://:@:/",
        "////////",
        "%%%%",
        "?=&?=&",
        "..........",
        "http://a..b...c",
        "javascript:alert(1)",
        "data:text/html;base64,PHNjcmlwdD4=",
        "ftp://user@host:21/file;type=i",
        "\u{0000}\u{0001}http://x.com",
        "http://xn--80ak6aa92e.com/",
        "http://例え.テスト/パス",
        "http://١٢٣.١٢٣.١٢٣.١٢٣/",
        "😀😀😀.com/😀",
    ];

    #[test]
    fn test_every_hostile_input_produces_bounded_record() {
        for &url in HOSTILE_INPUTS {
            let f = extract_features(url);

            assert_eq!(f.url_length, url.chars().count(), "url_length for {:?}", url);
            for (name, ratio) in [
                ("digit_ratio", f.digit_ratio),
                ("letter_ratio", f.letter_ratio),
                ("special_ratio", f.special_ratio),
            ] {
                assert!((0.0..=1.0).contains(&ratio), "{} out of range for {:?}: {}", name, url, ratio);
            }

            let values = f.to_vector();
            assert_eq!(values.as_slice().len(), FEATURE_COUNT);
            assert!(values.as_slice().iter().all(|v| v.is_finite()), "non-finite value for {:?}", url);
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        for &url in HOSTILE_INPUTS {
            assert_eq!(extract_features(url), extract_features(url));
        }
    }

    #[test]
    fn test_long_url_does_not_overflow() {
        let url = format!("http://example.com/{}", "a-b_c.d/".repeat(5_000));
        let f = extract_features(&url);

        assert_eq!(f.url_length, url.len());
        assert_eq!(f.num_hyphens, 5_000);
        assert_eq!(f.num_underscores, 5_000);
        assert_eq!(f.num_slashes, 2 + 1 + 5_000);
    }

    #[test]
    fn test_flags_are_binary() {
        for &url in HOSTILE_INPUTS {
            let f = extract_features(url);
            for flag in [
                f.has_ip,
                f.has_https,
                f.has_www,
                f.has_at_sign,
                f.has_double_slash,
                f.has_hex_encoding,
                f.has_suspicious_word,
            ] {
                assert!(flag <= 1, "flag not 0/1 for {:?}", url);
            }
        }
    }

    #[test]
    fn test_malformed_authority_falls_back_to_raw_path() {
        let url = "http://[::1/secure-login";
        let f = extract_features(url);
        assert_eq!(f.hostname_length, 0);
        assert_eq!(f.path_length, url.chars().count());
        assert_eq!(f.num_subdomains, 0);
        assert_eq!(f.has_suspicious_word, 1);
    }
}
