use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Client, Proxy,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::{
    constants::API_ENDPOINT,
    error::{Error, Result},
};

#[derive(Deserialize)]
struct GqlEnvelope<T> {
    data: Option<T>,
    errors: Option<Vec<GqlError>>,
}

#[derive(Deserialize)]
struct GqlError {
    message: String,
}

/// One client per account. Holds the proxied (or direct) HTTP client and
/// the authorization header state set after a successful login.
pub struct GqlClient {
    http: Client,
    endpoint: &'static str,
    authorization: Option<HeaderValue>,
}

impl GqlClient {
    pub fn new(proxy: Option<&str>) -> Result<Self> {
        let http = match proxy {
            Some(url) => {
                let proxy = Proxy::all(url)
                    .map_err(|e| Error::Config(format!("invalid proxy url: {e}")))?;
                Client::builder().proxy(proxy).build()?
            }
            None => Client::new(),
        };

        Ok(Self {
            http,
            endpoint: API_ENDPOINT,
            authorization: None,
        })
    }

    /// All subsequent requests from this instance carry the token.
    pub fn set_authorization(&mut self, token: &str) -> Result<()> {
        let value = HeaderValue::from_str(token)
            .map_err(|e| Error::Auth(format!("access token is not a valid header value: {e}")))?;
        self.authorization = Some(value);

        Ok(())
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<T> {
        let mut body = serde_json::json!({ "query": query });
        if let Some(variables) = variables {
            body["variables"] = variables;
        }

        let mut request = self.http.post(self.endpoint).json(&body);

        if let Some(authorization) = &self.authorization {
            request = request.header(AUTHORIZATION, authorization.clone());
        }

        let text = request
            .send()
            .await
            .inspect_err(|e| tracing::error!("Request failed: {}", e))?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Non-successful status code: {}", e))?
            .text()
            .await
            .inspect_err(|e| tracing::error!("Failed to retrieve response text: {}", e))?;

        parse_response(&text)
    }
}

fn parse_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    let envelope: GqlEnvelope<T> = serde_json::from_str(text)
        .map_err(|e| Error::Api(format!("malformed GraphQL response: {e}")))?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        return Err(Error::Api(messages));
    }

    envelope
        .data
        .ok_or_else(|| Error::Api("GraphQL response carried no data".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Payload {
        value: String,
    }

    #[test]
    fn data_payload_deserializes() {
        let payload: Payload = parse_response(r#"{"data":{"value":"ok"}}"#).unwrap();
        assert_eq!(payload.value, "ok");
    }

    #[test]
    fn graphql_errors_surface_with_server_message() {
        let err = parse_response::<Payload>(
            r#"{"data":null,"errors":[{"message":"nonce expired"},{"message":"try again"}]}"#,
        )
        .unwrap_err();

        match err {
            Error::Api(message) => assert_eq!(message, "nonce expired; try again"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn missing_data_is_an_api_error() {
        let err = parse_response::<Payload>(r#"{"errors":[]}"#).unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[test]
    fn garbage_body_is_an_api_error() {
        let err = parse_response::<Payload>("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }
}
