use std::time::Duration;

use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use ureq::{http::Response, Agent, Body};

use crate::{
    config::Config,
    error::{FetchError, FetchResult},
};

use super::request::{Method, RequestBuilder};

/// Anything that can answer a dashboard API request.  `WebApi` talks HTTP;
/// tests and offline hosts provide their own.
///
/// Implementations issue exactly one request per call and never retry.
pub trait Backend: Send + Sync {
    fn fetch(&self, request: &RequestBuilder) -> FetchResult<Value>;
}

/// The `{status, data}` envelope every endpoint answers with.
#[derive(Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<String>,
}

impl Envelope {
    fn into_data(self) -> FetchResult<Value> {
        if self.status == "ok" {
            Ok(self.data)
        } else {
            Err(FetchError::Rejected(
                self.message.unwrap_or_else(|| self.status.clone()),
            ))
        }
    }
}

/// Parse a raw response body into the envelope's `data` member.
pub fn parse_envelope(body: &str) -> FetchResult<Value> {
    serde_json::from_str::<Envelope>(body)?.into_data()
}

/// Decode an endpoint's `data` member into its typed payload.
pub fn decode<T: DeserializeOwned>(data: Value) -> FetchResult<T> {
    serde_json::from_value(data).map_err(FetchError::from)
}

pub struct WebApi {
    agent: Agent,
    api_base: String,
    csrf_token: RwLock<Option<String>>,
}

impl WebApi {
    pub fn new(config: &Config) -> Self {
        Self::with_timeout(&config.api_base, config.timeout(), config.csrf_token.clone())
    }

    pub fn with_timeout(api_base: &str, timeout: Duration, csrf_token: Option<String>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
            csrf_token: RwLock::new(csrf_token),
        }
    }

    pub fn set_csrf_token(&self, token: Option<String>) {
        *self.csrf_token.write() = token;
    }

    fn request(&self, request: &RequestBuilder) -> FetchResult<Response<Body>> {
        let url = request
            .build(&self.api_base)
            .map_err(|err| FetchError::Network(err.to_string()))?;

        match request.get_method() {
            Method::Get => Ok(self
                .agent
                .get(url.as_str())
                .header("Accept", "application/json")
                .call()?),
            Method::Post => {
                let mut req = self
                    .agent
                    .post(url.as_str())
                    .header("Accept", "application/json");
                if let Some(token) = self.csrf_token.read().as_deref() {
                    req = req.header("X-CSRFToken", token);
                }
                let body = request.get_body().cloned().unwrap_or(Value::Null);
                Ok(req.send_json(&body)?)
            }
        }
    }

    /// Send a request and return the envelope's `data` member.
    fn load(&self, request: &RequestBuilder) -> FetchResult<Value> {
        let mut response = self.request(request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| FetchError::Network(err.to_string()))?;
        parse_envelope(&body)
    }
}

impl Backend for WebApi {
    fn fetch(&self, request: &RequestBuilder) -> FetchResult<Value> {
        log::debug!("fetching {}", request.endpoint());
        self.load(request)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{BufRead, BufReader, Read, Write},
        net::TcpListener,
        thread::{self, JoinHandle},
    };

    use serde_json::json;

    use super::*;
    use crate::{error::FetchErrorKind, model::PitchRequest};

    /// Answer exactly one request on a local port with `status` and `body`.
    /// The handle yields the raw request head and body as received.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0;
            let mut chunked = false;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    } else if name.eq_ignore_ascii_case("transfer-encoding") {
                        chunked = value.trim().eq_ignore_ascii_case("chunked");
                    }
                }
                let done = line == "\r\n" || line.is_empty();
                head.push_str(&line);
                if done {
                    break;
                }
            }
            let mut body = Vec::new();
            if chunked {
                loop {
                    let mut size = String::new();
                    reader.read_line(&mut size).unwrap();
                    let size = usize::from_str_radix(size.trim(), 16).unwrap();
                    let mut chunk = vec![0; size + 2];
                    reader.read_exact(&mut chunk).unwrap();
                    if size == 0 {
                        break;
                    }
                    body.extend_from_slice(&chunk[..size]);
                }
            } else {
                body.resize(content_length, 0);
                reader.read_exact(&mut body).unwrap();
            }
            head.push_str(&String::from_utf8_lossy(&body));

            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            head
        });
        (base, handle)
    }

    fn api(base: &str, csrf_token: Option<&str>) -> WebApi {
        WebApi::with_timeout(base, Duration::from_secs(5), csrf_token.map(str::to_string))
    }

    #[test]
    fn server_error_is_an_http_status_failure() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"status":"error"}"#);
        let err = api(&base, None).fetch(&RequestBuilder::kpis()).unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(500));
        assert_eq!(err.kind(), FetchErrorKind::HttpStatus);

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /admin/dashboard/api/?endpoint=kpis "));
    }

    #[test]
    fn non_json_body_is_a_parse_failure() {
        let (base, server) = serve_once("200 OK", "<html>maintenance</html>");
        let err = api(&base, None).fetch(&RequestBuilder::kpis()).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Parse);
        server.join().unwrap();
    }

    #[test]
    fn error_envelope_with_success_status_is_rejected() {
        let (base, server) = serve_once("200 OK", r#"{"status":"error","message":"db down"}"#);
        let err = api(&base, None).fetch(&RequestBuilder::genre_stats()).unwrap_err();
        assert_eq!(err, FetchError::Rejected("db down".into()));
        assert_eq!(err.kind(), FetchErrorKind::HttpStatus);
        server.join().unwrap();
    }

    #[test]
    fn ok_envelope_over_http_yields_data() {
        let (base, server) = serve_once("200 OK", r#"{"status":"ok","data":[1,2]}"#);
        let data = api(&base, None).fetch(&RequestBuilder::genre_stats()).unwrap();
        assert_eq!(data, json!([1, 2]));
        server.join().unwrap();
    }

    #[test]
    fn simulate_posts_the_pitch_with_the_csrf_token() {
        let (base, server) = serve_once("200 OK", r#"{"status":"ok","data":{}}"#);
        let pitch = PitchRequest::new("A lighthouse keeper hears voices").genre("Horror");
        api(&base, Some("secret-token"))
            .fetch(&RequestBuilder::simulate(&pitch))
            .unwrap();

        let request = server.join().unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /admin/dashboard/api/?endpoint=simulate "));
        assert!(lower.contains("\r\nx-csrftoken: secret-token\r\n"));
        assert!(request.contains("A lighthouse keeper hears voices"));
    }

    #[test]
    fn simulate_without_a_token_sends_no_csrf_header() {
        let (base, server) = serve_once("200 OK", r#"{"status":"ok","data":{}}"#);
        api(&base, None)
            .fetch(&RequestBuilder::simulate(&PitchRequest::new("A quiet heist story")))
            .unwrap();

        let request = server.join().unwrap();
        assert!(!request.to_ascii_lowercase().contains("x-csrftoken"));
    }

    #[test]
    fn ok_envelope_yields_data() {
        let data = parse_envelope(r#"{"status":"ok","data":{"total_movies":3}}"#).unwrap();
        assert_eq!(data, json!({ "total_movies": 3 }));
    }

    #[test]
    fn non_ok_envelope_is_rejected() {
        let err = parse_envelope(r#"{"status":"error","message":"db down"}"#).unwrap_err();
        assert_eq!(err, FetchError::Rejected("db down".into()));
        assert_eq!(err.kind(), FetchErrorKind::HttpStatus);
    }

    #[test]
    fn garbage_is_a_parse_failure() {
        let err = parse_envelope("<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Parse);
    }

    #[test]
    fn unreachable_backend_is_a_network_failure() {
        // Port 9 (discard) on localhost is closed in any sane test environment.
        let api = WebApi::with_timeout("http://127.0.0.1:9", Duration::from_millis(500), None);
        let err = api.fetch(&RequestBuilder::kpis()).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Network);
    }
}
