//! Client layer: holds credentials and defaults, issues one HTTP GET per message.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::{
    Login, Message, MessageId, MessageText, Password, RawPhoneNumber, ResponseFormat,
    SendDefaults, SendResponse, SenderId, ValidationError,
};
use crate::transport::Params;

const DEFAULT_SEND_ENDPOINT: &str = "https://smsc.ru/sys/send.php";

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let response = self.client.get(url).query(params).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, Clone)]
/// SMSC.RU account credentials, sent as `login` and `psw` on every call.
pub struct Auth {
    login: Login,
    password: Password,
}

impl Auth {
    /// Authenticate with the plain password.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    /// Authenticate with the lowercase MD5 hex digest of the password.
    pub fn md5(
        login: impl Into<String>,
        password_md5: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::md5_hex(password_md5)?,
        })
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    fn push_query_params(&self, params: &mut Params) {
        params.set(Login::FIELD, self.login.as_str());
        params.set(Password::FIELD, self.password.as_str());
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmscClient`].
///
/// Service-level errors reported inside a successful response body are not mapped here;
/// the body is returned to the caller untouched.
pub enum SmscError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The response was requested in a format the caller tried to decode differently.
    #[error("unsupported response format: {0}")]
    UnsupportedResponseFormat(&'static str),

    /// The configured endpoint is not a valid absolute URL.
    #[error("invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl SendResponse {
    /// Decode the body of a `fmt=3` response into `T`.
    ///
    /// Errors:
    /// - [`SmscError::UnsupportedResponseFormat`] if another format was requested,
    /// - [`SmscError::Parse`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SmscError> {
        if self.format != ResponseFormat::Json {
            return Err(SmscError::UnsupportedResponseFormat(
                "body is not JSON; request ResponseFormat::Json to decode it",
            ));
        }
        crate::transport::decode_json_body(&self.body)
            .map_err(|err| SmscError::Parse(Box::new(err)))
    }
}

#[derive(Debug, Clone)]
/// Builder for [`SmscClient`].
///
/// Use this when you need to customize the defaults, endpoint, timeout, or user-agent.
pub struct SmscClientBuilder {
    auth: Auth,
    defaults: SendDefaults,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmscClientBuilder {
    /// Create a builder with the default endpoint, [`SendDefaults::default`], and no
    /// timeout/user-agent override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            defaults: SendDefaults::default(),
            endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Option selections used when a message does not override them.
    pub fn defaults(mut self, defaults: SendDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Default sender name.
    pub fn sender(mut self, sender: SenderId) -> Self {
        self.defaults.sender = Some(sender);
        self
    }

    /// Override the `send.php` endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmscClient`].
    pub fn build(self) -> Result<SmscClient, SmscError> {
        url::Url::parse(&self.endpoint).map_err(|source| SmscError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmscError::Transport(Box::new(err)))?;

        Ok(SmscClient {
            auth: self.auth,
            defaults: self.defaults,
            endpoint: self.endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level SMSC.RU client.
///
/// Holds credentials and [`SendDefaults`], both fixed after construction. Every message is
/// one blocking GET to `https://smsc.ru/sys/send.php`; nothing is retried.
///
/// The underlying HTTP client is `reqwest::blocking`, so do not construct or call it from
/// inside an async runtime.
pub struct SmscClient {
    auth: Auth,
    defaults: SendDefaults,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl SmscClient {
    /// Create a client using the default endpoint and defaults.
    ///
    /// For more customization, use [`SmscClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            defaults: SendDefaults::default(),
            endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::blocking::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> SmscClientBuilder {
        SmscClientBuilder::new(auth)
    }

    pub fn defaults(&self) -> &SendDefaults {
        &self.defaults
    }

    /// The exact query this client sends for `message`: credentials first, then the layered
    /// message parameters.
    pub fn query_for(&self, message: &Message) -> Vec<(String, String)> {
        self.params_for(message).into_vec()
    }

    fn params_for(&self, message: &Message) -> Params {
        let mut params = Params::new();
        self.auth.push_query_params(&mut params);
        params.merge(crate::transport::encode_send_query(&self.defaults, message));
        params
    }

    /// Send one message.
    ///
    /// Errors:
    /// - [`SmscError::Transport`] when the request could not be completed,
    /// - [`SmscError::HttpStatus`] for non-2xx HTTP responses.
    pub fn send_message(&self, message: &Message) -> Result<SendResponse, SmscError> {
        let params = self.params_for(message);
        let format = params
            .get(ResponseFormat::FIELD)
            .and_then(ResponseFormat::from_param)
            .unwrap_or(ResponseFormat::Text);

        tracing::debug!(
            endpoint = %self.endpoint,
            recipients = message.recipients().len(),
            ?format,
            "sending message"
        );

        let response = self
            .http
            .get(&self.endpoint, params.as_slice())
            .map_err(|err| {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "send request failed");
                SmscError::Transport(err)
            })?;

        if !(200..=299).contains(&response.status) {
            tracing::warn!(
                status = response.status,
                "send request returned non-success status"
            );
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SmscError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(SendResponse {
            status: response.status,
            format,
            body: response.body,
        })
    }

    /// Send each message with its own request, sequentially and in input order.
    ///
    /// A failed call does not stop the remaining ones; the result list has one entry per
    /// message.
    pub fn send(&self, messages: &[Message]) -> Vec<Result<SendResponse, SmscError>> {
        messages
            .iter()
            .map(|message| self.send_message(message))
            .collect()
    }

    /// Send a plain text message with every option left at the client defaults.
    ///
    /// `phones` may hold several numbers separated by `;`. All inputs are validated before
    /// any request is made.
    pub fn send_text(
        &self,
        phones: &str,
        text: &str,
        id: Option<&str>,
        sender: Option<&str>,
    ) -> Result<SendResponse, SmscError> {
        let recipients = phones
            .split(RawPhoneNumber::SEPARATOR)
            .map(RawPhoneNumber::new)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = Message::builder(recipients).text(MessageText::new(text)?);
        if let Some(id) = id {
            builder = builder.id(MessageId::new(id)?);
        }
        if let Some(sender) = sender {
            builder = builder.sender(SenderId::new(sender)?);
        }

        self.send_message(&builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde::Deserialize;

    use crate::domain::{ResponseCost, TimeSpec, Translit};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug, Default)]
    struct FakeTransportState {
        requests: Vec<(String, Vec<(String, String)>)>,
        responses: VecDeque<Result<(u16, String), String>>,
    }

    impl FakeTransport {
        fn new() -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState::default())),
            }
        }

        fn respond(self, status: u16, body: impl Into<String>) -> Self {
            self.state
                .lock()
                .unwrap()
                .responses
                .push_back(Ok((status, body.into())));
            self
        }

        fn fail(self, message: impl Into<String>) -> Self {
            self.state
                .lock()
                .unwrap()
                .responses
                .push_back(Err(message.into()));
            self
        }

        fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.state.lock().unwrap().requests.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn get(
            &self,
            url: &str,
            params: &[(String, String)],
        ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
            let mut state = self.state.lock().unwrap();
            state.requests.push((url.to_owned(), params.to_vec()));
            match state.responses.pop_front() {
                Some(Ok((status, body))) => Ok(HttpResponse { status, body }),
                Some(Err(message)) => Err(message.into()),
                None => Err("no response queued".into()),
            }
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn make_client(defaults: SendDefaults, transport: FakeTransport) -> SmscClient {
        SmscClient {
            auth: Auth::new("user", "secret").unwrap(),
            defaults,
            endpoint: "https://example.invalid/sys/send.php".to_owned(),
            http: Arc::new(transport),
        }
    }

    fn message(phone: &str, text: &str) -> Message {
        Message::new(
            vec![RawPhoneNumber::new(phone).unwrap()],
            MessageText::new(text).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn send_message_issues_get_with_credentials_and_returns_raw_body() {
        let body = r#"{"id": 1, "cnt": 1, "cost": "1.40", "balance": "100.50"}"#;
        let transport = FakeTransport::new().respond(200, body);
        let client = make_client(SendDefaults::default(), transport.clone());

        let response = client.send_message(&message("+79251234567", "hello")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.format, ResponseFormat::Json);
        assert_eq!(response.body, body);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let (url, params) = &requests[0];
        assert_eq!(url, "https://example.invalid/sys/send.php");
        assert_eq!(params[0], ("login".to_owned(), "user".to_owned()));
        assert_eq!(params[1], ("psw".to_owned(), "secret".to_owned()));
        assert_param(params, "phones", "+79251234567");
        assert_param(params, "mes", "hello");
        assert_param(params, "fmt", "3");
        assert_param(params, "cost", "3");
    }

    #[test]
    fn md5_auth_sends_digest_as_psw() {
        let transport = FakeTransport::new().respond(200, "OK");
        let mut client = make_client(SendDefaults::default(), transport.clone());
        client.auth = Auth::md5("user", "5f4dcc3b5aa765d61d8327deb882cf99").unwrap();

        client.send_message(&message("+1", "hi")).unwrap();
        let (_, params) = &transport.requests()[0];
        assert_param(params, "psw", "5f4dcc3b5aa765d61d8327deb882cf99");
    }

    #[test]
    fn send_returns_one_independent_result_per_message_in_order() {
        let transport = FakeTransport::new()
            .fail("connection reset")
            .respond(200, "second");
        let client = make_client(SendDefaults::default(), transport.clone());

        let results = client.send(&[message("+1", "one"), message("+2", "two")]);
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(SmscError::Transport(_))));
        assert_eq!(results[1].as_ref().unwrap().body, "second");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_param(&requests[0].1, "phones", "+1");
        assert_param(&requests[1].1, "phones", "+2");
    }

    #[test]
    fn send_maps_non_success_http_status() {
        let transport = FakeTransport::new().respond(500, "oops").respond(503, "   ");
        let client = make_client(SendDefaults::default(), transport);

        let results = client.send(&[message("+1", "a"), message("+1", "b")]);
        assert!(matches!(
            results[0],
            Err(SmscError::HttpStatus {
                status: 500,
                body: Some(_)
            })
        ));
        assert!(matches!(
            results[1],
            Err(SmscError::HttpStatus {
                status: 503,
                body: None
            })
        ));
    }

    #[test]
    fn service_error_body_is_returned_untouched() {
        let body = r#"{"error": "authorise error", "error_code": 2}"#;
        let transport = FakeTransport::new().respond(200, body);
        let client = make_client(SendDefaults::default(), transport);

        let response = client.send_message(&message("+1", "hi")).unwrap();
        assert_eq!(response.body, body);
    }

    #[test]
    fn precedence_is_defaults_then_message_then_extras() {
        let defaults = SendDefaults {
            translit: Translit::Latin,
            response_cost: ResponseCost::No,
            sender: Some(SenderId::new("Default").unwrap()),
            ..Default::default()
        };
        let transport = FakeTransport::new();
        let client = make_client(defaults, transport);

        let message = Message::builder(vec![RawPhoneNumber::new("+1").unwrap()])
            .text(MessageText::new("hi").unwrap())
            .translit(Translit::Imitate)
            .response_cost(ResponseCost::DryRun)
            .extra("cost", "2")
            .build()
            .unwrap();

        let params = client.query_for(&message);
        assert_param(&params, "translit", "2");
        assert_param(&params, "cost", "2");
        assert_param(&params, "sender", "Default");
        assert_eq!(params.iter().filter(|(k, _)| k == "cost").count(), 1);
        assert_eq!(client.query_for(&message), params);
    }

    #[test]
    fn response_format_reflects_extras_override() {
        let transport = FakeTransport::new().respond(200, "1234,1");
        let client = make_client(SendDefaults::default(), transport);

        let message = Message::builder(vec![RawPhoneNumber::new("+1").unwrap()])
            .text(MessageText::new("hi").unwrap())
            .extra("fmt", "1")
            .build()
            .unwrap();

        let response = client.send_message(&message).unwrap();
        assert_eq!(response.format, ResponseFormat::Csv);
        assert!(matches!(
            response.json::<serde_json::Value>(),
            Err(SmscError::UnsupportedResponseFormat(_))
        ));
    }

    #[test]
    fn json_response_can_be_decoded_on_request() {
        #[derive(Debug, Deserialize)]
        struct Sent {
            id: u64,
            cnt: u32,
        }

        let transport = FakeTransport::new()
            .respond(200, r#"{"id": 7, "cnt": 2}"#)
            .respond(200, "not json");
        let client = make_client(SendDefaults::default(), transport);

        let sent: Sent = client
            .send_message(&message("+1", "hi"))
            .unwrap()
            .json()
            .unwrap();
        assert_eq!(sent.id, 7);
        assert_eq!(sent.cnt, 2);

        let err = client
            .send_message(&message("+1", "hi"))
            .unwrap()
            .json::<Sent>()
            .unwrap_err();
        assert!(matches!(err, SmscError::Parse(_)));
    }

    #[test]
    fn send_text_builds_single_message() {
        let transport = FakeTransport::new().respond(200, "OK");
        let client = make_client(SendDefaults::default(), transport.clone());

        client
            .send_text("+1;+2", "hello", Some("42"), Some("Shop"))
            .unwrap();

        let (_, params) = &transport.requests()[0];
        assert_param(params, "phones", "+1;+2");
        assert_param(params, "mes", "hello");
        assert_param(params, "id", "42");
        assert_param(params, "sender", "Shop");
    }

    #[test]
    fn send_text_validates_before_any_request() {
        let transport = FakeTransport::new();
        let client = make_client(SendDefaults::default(), transport.clone());

        assert!(matches!(
            client.send_text("+1;", "hello", None, None),
            Err(SmscError::Validation(ValidationError::Empty { .. }))
        ));
        assert!(matches!(
            client.send_text("+1", "  ", None, None),
            Err(SmscError::Validation(_))
        ));
        assert!(matches!(
            client.send_text("+1", "hi", Some(" "), None),
            Err(SmscError::Validation(_))
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn scheduled_message_carries_time_param() {
        let transport = FakeTransport::new().respond(200, "OK");
        let client = make_client(SendDefaults::default(), transport.clone());

        let message = Message::builder(vec![RawPhoneNumber::new("+1").unwrap()])
            .text(MessageText::new("later").unwrap())
            .time(TimeSpec::Timestamp(1_700_000_000))
            .build()
            .unwrap();
        client.send_message(&message).unwrap();

        let (_, params) = &transport.requests()[0];
        assert_param(params, "time", "01700000000");
    }

    #[test]
    fn auth_constructors_validate_inputs() {
        assert!(Auth::new("   ", "pass").is_err());
        assert!(Auth::new("user", "").is_err());
        assert!(Auth::md5("user", "not-a-hash").is_err());
        assert_eq!(Auth::new(" user ", "p").unwrap().login().as_str(), "user");
    }

    #[test]
    fn builder_applies_endpoint_and_defaults() {
        let defaults = SendDefaults {
            translit: Translit::Latin,
            ..Default::default()
        };
        let client = SmscClient::builder(Auth::new("user", "pass").unwrap())
            .endpoint("https://example.invalid/sys/send.php")
            .defaults(defaults)
            .sender(SenderId::new("Shop").unwrap())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.endpoint, "https://example.invalid/sys/send.php");
        assert_eq!(client.defaults().translit, Translit::Latin);
        assert_eq!(
            client.defaults().sender.as_ref().map(SenderId::as_str),
            Some("Shop")
        );
    }

    #[test]
    fn builder_rejects_invalid_endpoint() {
        let err = SmscClient::builder(Auth::new("user", "pass").unwrap())
            .endpoint("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SmscError::InvalidEndpoint { .. }));
    }
}
