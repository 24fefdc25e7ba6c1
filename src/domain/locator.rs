use std::fmt;
use std::str::FromStr;

use crate::app::{Result, RetrieverError};

/// An http(s) address that has been checked once, at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    address: String,
}

impl Locator {
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if !address.starts_with("http://") && !address.starts_with("https://") {
            return Err(RetrieverError::InvalidAddress(address));
        }
        Ok(Self { address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl FromStr for Locator {
    type Err = RetrieverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "URL [{}]", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(locator: &Locator) -> u64 {
        let mut hasher = DefaultHasher::new();
        locator.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_accepts_http_and_https() {
        let http = Locator::new("http://example.com/a?b=c").unwrap();
        let https = Locator::new("https://example.com/").unwrap();
        assert_eq!(http.address(), "http://example.com/a?b=c");
        assert_eq!(https.address(), "https://example.com/");
    }

    #[test]
    fn test_rejects_other_prefixes() {
        for address in [
            "",
            "ftp://example.com",
            "example.com",
            "HTTP://example.com",
            " http://example.com",
            "http:/example.com",
            "file:///etc/passwd",
        ] {
            let err = Locator::new(address).unwrap_err();
            assert!(
                matches!(err, RetrieverError::InvalidAddress(ref a) if a == address),
                "expected InvalidAddress for {:?}, got {:?}",
                address,
                err
            );
        }
    }

    #[test]
    fn test_bare_scheme_is_accepted() {
        // Only the prefix is checked.
        assert!(Locator::new("http://").is_ok());
    }

    #[test]
    fn test_value_equality_and_hash() {
        let a = Locator::new("https://example.com/feed").unwrap();
        let b = Locator::new(String::from("https://example.com/feed")).unwrap();
        let c = Locator::new("https://example.com/Feed").unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_is_bracketed() {
        let locator = Locator::new("http://example.com").unwrap();
        assert_eq!(locator.to_string(), "URL [http://example.com]");
    }

    #[test]
    fn test_from_str() {
        let parsed: Locator = "https://example.com".parse().unwrap();
        assert_eq!(parsed, Locator::new("https://example.com").unwrap());
        assert!("mailto:me@example.com".parse::<Locator>().is_err());
    }
}
