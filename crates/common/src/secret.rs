//! Secret wrapper for passwords and tokens

use std::fmt;
use zeroize::Zeroize;

/// Sensitive value: redacted in Debug/Display/logs and wiped on drop.
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the inner value (use sparingly, e.g. when building a request body)
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl From<String> for Secret<String> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Secret<String> {
    fn from(value: &str) -> Self {
        Self::new(value.to_owned())
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T: Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_are_redacted() {
        let secret = Secret::new(String::from("s3cr3t-password"));
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(format!("{secret}"), "[REDACTED]");
    }

    #[test]
    fn expose_returns_inner_value() {
        let secret: Secret<String> = "d1eb612e-24fa-48b3-93d4-fc6c90379078".into();
        assert_eq!(secret.expose(), "d1eb612e-24fa-48b3-93d4-fc6c90379078");
    }

    #[test]
    fn clone_keeps_value_and_redaction() {
        let secret = Secret::from(String::from("tok123"));
        let cloned = secret.clone();
        drop(secret);
        assert_eq!(cloned.expose(), "tok123");
        assert_eq!(format!("{cloned:?}"), "[REDACTED]");
    }

    #[test]
    fn redaction_survives_nesting_in_debug_structs() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Login {
            username: String,
            password: Secret<String>,
        }
        let login = Login {
            username: "admin".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{login:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"), "got: {debug}");
    }
}
