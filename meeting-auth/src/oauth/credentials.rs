//! OAuth client credentials.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, SecretString};

/// Client ID and secret of an OAuth app.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: SecretString,
}

impl ClientCredentials {
    pub fn new(client_id: String, client_secret: SecretString) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Value of the `Authorization` header for the token endpoint:
    /// `Basic base64(client_id:client_secret)`.
    pub fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret.expose_secret());
        format!("Basic {}", STANDARD.encode(pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization_encodes_id_and_secret() {
        let credentials = ClientCredentials::new(
            "client_id".to_string(),
            SecretString::new("client_secret".to_string()),
        );

        // base64("client_id:client_secret")
        assert_eq!(
            credentials.basic_authorization(),
            "Basic Y2xpZW50X2lkOmNsaWVudF9zZWNyZXQ="
        );
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let credentials = ClientCredentials::new(
            "client_id".to_string(),
            SecretString::new("client_secret".to_string()),
        );

        let debug = format!("{:?}", credentials);
        assert!(debug.contains("client_id"));
        assert!(!debug.contains("client_secret\""));
    }
}
