//! API key resolution
//!
//! Keys are looked up when a call is made, not at startup, so a missing key
//! fails only the provider that needs it.

use arena_application::GatewayError;

/// Where a provider's API key comes from
#[derive(Clone)]
pub struct Credential {
    env_var: String,
    explicit: Option<String>,
}

impl Credential {
    pub fn new(env_var: impl Into<String>, explicit: Option<String>) -> Self {
        Self {
            env_var: env_var.into(),
            explicit,
        }
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// An explicit key from config wins over the environment variable.
    pub fn resolve(&self) -> Result<String, GatewayError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }

    fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String, GatewayError> {
        self.explicit
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(&self.env_var).filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| GatewayError::MissingCredential {
                env_var: self.env_var.clone(),
            })
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("env_var", &self.env_var)
            .field("explicit", &self.explicit.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let credential = Credential::new("OPENAI_API_KEY", Some("sk-config".to_string()));
        let key = credential
            .resolve_with(|_| Some("sk-env".to_string()))
            .unwrap();
        assert_eq!(key, "sk-config");
    }

    #[test]
    fn test_env_key_used_when_no_explicit_key() {
        let credential = Credential::new("OPENAI_API_KEY", None);
        let key = credential
            .resolve_with(|name| (name == "OPENAI_API_KEY").then(|| "sk-env".to_string()))
            .unwrap();
        assert_eq!(key, "sk-env");
    }

    #[test]
    fn test_missing_key_names_env_var() {
        let credential = Credential::new("GOOGLE_API_KEY", Some("  ".to_string()));
        let err = credential.resolve_with(|_| Some(String::new())).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Missing credential: environment variable GOOGLE_API_KEY is not set"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let credential = Credential::new("OPENAI_API_KEY", Some("sk-secret".to_string()));
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("OPENAI_API_KEY"));
    }
}
