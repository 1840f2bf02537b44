//! Provider value object representing one of the two hosted backends

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Supported LLM backends (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI chat completions
    Gpt,
    /// Google Gemini generateContent
    Gemini,
}

impl ProviderKind {
    /// All supported providers, in display order
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gpt, ProviderKind::Gemini];

    /// Wire identifier (`"gpt"` / `"gemini"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gpt => "gpt",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Gpt => "ChatGPT",
            ProviderKind::Gemini => "Gemini",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpt" | "openai" | "chatgpt" => Ok(ProviderKind::Gpt),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            _ => Err(DomainError::UnknownProvider(s.to_string())),
        }
    }
}

impl Serialize for ProviderKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("gpt".parse::<ProviderKind>().unwrap(), ProviderKind::Gpt);
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::Gpt);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = "claude".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err, DomainError::UnknownProvider("claude".to_string()));
    }

    #[test]
    fn test_provider_serde() {
        let json = serde_json::to_string(&ProviderKind::Gemini).unwrap();
        assert_eq!(json, "\"gemini\"");
        let parsed: ProviderKind = serde_json::from_str("\"gpt\"").unwrap();
        assert_eq!(parsed, ProviderKind::Gpt);
        assert!(serde_json::from_str::<ProviderKind>("\"llama\"").is_err());
    }
}
