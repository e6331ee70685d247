use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::{ExposeSecret, SecretString};

/// Authorization scheme expected by a provider
#[derive(Debug, Clone)]
pub enum ProviderAuth {
    /// `Basic base64(key:secret)`
    Basic { key: SecretString, secret: SecretString },
    /// `Bearer <key>`
    Bearer(SecretString),
    /// `Token token=<key>`
    Token(SecretString),
}

impl ProviderAuth {
    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic { key, secret } => {
                let credentials = format!("{}:{}", key.expose_secret(), secret.expose_secret());
                format!("Basic {}", STANDARD.encode(credentials))
            }
            Self::Bearer(key) => format!("Bearer {}", key.expose_secret()),
            Self::Token(key) => format!("Token token={}", key.expose_secret()),
        }
    }
}

/// Unset credentials are sent as empty strings
pub(crate) fn credential(value: Option<&SecretString>) -> SecretString {
    value.cloned().unwrap_or_else(|| SecretString::from(String::new()))
}
