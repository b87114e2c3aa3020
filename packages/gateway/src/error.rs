use guide::GatewayError;

/// Failures inside the REST client, before they are mapped to the
/// gateway-level error the app shows.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("{0} is not set")]
    MissingEnv(&'static str),
}

impl From<ClientError> for GatewayError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) if e.is_decode() => GatewayError::Decode(e.to_string()),
            ClientError::Request(e) => GatewayError::Network(e.to_string()),
            ClientError::Status { status: 401, .. } => GatewayError::Unauthenticated,
            ClientError::Status { status, body } => GatewayError::Remote {
                status,
                message: remote_message(&body),
            },
            ClientError::Decode(e) => GatewayError::Decode(e.to_string()),
            ClientError::Unauthenticated => GatewayError::Unauthenticated,
            ClientError::MissingEnv(name) => GatewayError::Config(format!("{name} is not set")),
        }
    }
}

/// The `message` field of a PostgREST error body, or the raw body.
fn remote_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_remote_with_message() {
        let err: GatewayError = ClientError::Status {
            status: 409,
            body: r#"{"code":"23505","message":"duplicate key value"}"#.into(),
        }
        .into();
        assert_eq!(
            err,
            GatewayError::Remote {
                status: 409,
                message: "duplicate key value".into()
            }
        );
    }

    #[test]
    fn test_unauthorized_maps_to_unauthenticated() {
        let err: GatewayError = ClientError::Status {
            status: 401,
            body: "JWT expired".into(),
        }
        .into();
        assert_eq!(err, GatewayError::Unauthenticated);
    }

    #[test]
    fn test_plain_body_kept() {
        assert_eq!(remote_message("Bad Gateway"), "Bad Gateway");
    }
}
