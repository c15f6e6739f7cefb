//! Passphrase holder that is wiped when dropped

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// A passphrase or secret read from the user
///
/// The buffer is zeroed on drop. Formatting never reveals the contents.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(Zeroizing<String>);

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(<{} bytes>)", self.0.len())
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_back_through_deref() {
        let passphrase = SecureString::new(String::from("open sesame"));
        assert_eq!(passphrase.as_str(), "open sesame");
        assert!(passphrase.starts_with("open"));
        assert_eq!(passphrase.len(), 11);
        assert!(SecureString::new("").is_empty());
    }

    #[test]
    fn test_confirmation_comparison() {
        assert_eq!(SecureString::new("same"), SecureString::new("same"));
        assert_ne!(SecureString::new("same"), SecureString::new("other"));
    }

    #[test]
    fn test_formatting_hides_contents() {
        let passphrase = SecureString::new("hunter2");
        let debug = format!("{:?}", passphrase);
        let display = passphrase.to_string();

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("7 bytes"));
        assert_eq!(display, "<redacted>");
    }
}
