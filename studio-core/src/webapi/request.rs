use std::fmt;

use serde_json::Value;
use url::Url;

use crate::model::PitchRequest;

/// Logical endpoints of the dashboard API.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Endpoint {
    Kpis,
    GenreStats,
    TopMovies,
    AudienceProfile,
    Movies,
    Simulate,
    Health,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Kpis,
        Endpoint::GenreStats,
        Endpoint::TopMovies,
        Endpoint::AudienceProfile,
        Endpoint::Movies,
        Endpoint::Simulate,
        Endpoint::Health,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Kpis => "kpis",
            Endpoint::GenreStats => "genre_stats",
            Endpoint::TopMovies => "top_movies",
            Endpoint::AudienceProfile => "audience_profile",
            Endpoint::Movies => "movies",
            Endpoint::Simulate => "simulate",
            Endpoint::Health => "health",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestBuilder {
    endpoint: Endpoint,
    method: Method,
    queries: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestBuilder {
    const API_PATH: &'static str = "/admin/dashboard/api/";

    pub fn new(endpoint: Endpoint, method: Method, body: Option<Value>) -> Self {
        Self {
            endpoint,
            method,
            queries: Vec::new(),
            body,
        }
    }

    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(endpoint, Method::Get, None)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.push((key.into(), value.into()));
        self
    }

    /// Add the parameter only when `value` is present and not blank.
    pub fn query_opt(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn get_method(&self) -> Method {
        self.method
    }

    pub fn get_queries(&self) -> &[(String, String)] {
        &self.queries
    }

    pub fn get_query(&self, key: &str) -> Option<&str> {
        self.queries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Full URL under `base`, with the endpoint selector first and the
    /// remaining parameters percent-encoded.
    pub fn build(&self, base: &str) -> Result<Url, url::ParseError> {
        let base = base.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{}", Self::API_PATH))?;
        url.query_pairs_mut()
            .append_pair("endpoint", self.endpoint.as_str())
            .extend_pairs(self.queries.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(url)
    }
}

/// Constructors for each logical endpoint.
impl RequestBuilder {
    pub fn kpis() -> Self {
        Self::get(Endpoint::Kpis)
    }

    pub fn genre_stats() -> Self {
        Self::get(Endpoint::GenreStats)
    }

    pub fn top_movies(genre: Option<&str>, limit: usize) -> Self {
        Self::get(Endpoint::TopMovies)
            .query_opt("genre", genre)
            .query("limit", limit.to_string())
    }

    pub fn audience_profile(genre: &str) -> Self {
        Self::get(Endpoint::AudienceProfile).query("genre", genre)
    }

    pub fn movies(page: u32, per_page: usize, search: &str, genre: &str) -> Self {
        Self::get(Endpoint::Movies)
            .query("page", page.to_string())
            .query("per_page", per_page.to_string())
            .query_opt("search", Some(search))
            .query_opt("genre", Some(genre))
    }

    pub fn simulate(pitch: &PitchRequest) -> Self {
        let body = serde_json::to_value(pitch).unwrap_or(Value::Null);
        Self::new(Endpoint::Simulate, Method::Post, Some(body))
    }

    pub fn health() -> Self {
        Self::get(Endpoint::Health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_parameters_after_endpoint() {
        let url = RequestBuilder::top_movies(Some("Sci-Fi & Fantasy"), 10)
            .build("http://studio.local/")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://studio.local/admin/dashboard/api/?endpoint=top_movies&genre=Sci-Fi+%26+Fantasy&limit=10"
        );
    }

    #[test]
    fn blank_filters_are_left_out() {
        let request = RequestBuilder::movies(2, 12, "  ", "");
        assert_eq!(request.get_query("page"), Some("2"));
        assert_eq!(request.get_query("search"), None);
        assert_eq!(request.get_query("genre"), None);
    }

    #[test]
    fn simulate_is_a_post_with_body() {
        let request = RequestBuilder::simulate(&PitchRequest::new("A heist on Mars"));
        assert_eq!(request.get_method(), Method::Post);
        assert_eq!(request.get_body().unwrap()["pitch"], "A heist on Mars");
    }
}
