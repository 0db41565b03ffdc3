/// Synchronous client for the vehicle aggregates service.
///
/// The service exposes one endpoint per metric (`/api/{metricId}`) plus the
/// unaggregated listing (`/api/fuel_consumption_ratings`); every endpoint
/// answers with a JSON array of row objects. This module owns the transport
/// concerns — timeouts, retries, payload shape validation — so the
/// resolution engine only ever sees well-formed records.
///
/// ### Notes
/// - Payloads that are not an array of objects fail with
///   [`MalformedResponse`], which the host surfaces to the user; transport
///   failures never leak into the resolution engine's contract.
/// - Network timeouts use a sane default (30s) and can be adjusted by
///   editing the client builder.
///
/// Typical usage:
/// ```no_run
/// # use fuelviz::Client;
/// let client = Client::default();
/// let records = client.fetch_metric("fuelTypeDist")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
use crate::models::Record;
use anyhow::{Context, Result, bail};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Endpoint serving the unaggregated 15-column listing.
pub const RAW_ENDPOINT: &str = "fuel_consumption_ratings";

/// The service answered with a payload the resolution pipeline cannot
/// consume. Surfaced as a user-visible message by the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("expected a JSON array of records, got {0}")]
    NotAnArray(&'static str),
    #[error("expected a JSON object at record index {0}")]
    NotAnObject(usize),
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("fuelviz/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "http://localhost:5000/api".into(),
            http,
        }
    }
}

// Allow -, _, . unescaped in endpoint names
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment.trim(), SAFE).to_string()
}

/// Validate a service payload and convert it into records.
///
/// The body must be a JSON array of objects; anything else is a
/// [`MalformedResponse`]. An empty array is a valid, empty dataset.
pub fn records_from_value(v: Value) -> Result<Vec<Record>, MalformedResponse> {
    let Value::Array(items) = v else {
        return Err(MalformedResponse::NotAnArray(json_kind(&v)));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(Record(map)),
            _ => Err(MalformedResponse::NotAnObject(i)),
        })
        .collect()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Client {
    /// Client against a non-default service address.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Fetch the aggregate rows backing one metric.
    ///
    /// The id is used verbatim as the endpoint path segment; whether it is
    /// a *known* metric is the registry's concern, not the transport's.
    ///
    /// ### Errors
    /// - Network/HTTP error
    /// - JSON decoding error
    /// - [`MalformedResponse`] when the payload is not an array of objects
    pub fn fetch_metric(&self, metric_id: &str) -> Result<Vec<Record>> {
        self.fetch_endpoint(metric_id)
    }

    /// Fetch the unaggregated listing for the raw-data display mode.
    pub fn fetch_raw(&self) -> Result<Vec<Record>> {
        self.fetch_endpoint(RAW_ENDPOINT)
    }

    fn fetch_endpoint(&self, endpoint: &str) -> Result<Vec<Record>> {
        let url = format!("{}/{}", self.base_url, enc(endpoint));
        let v: Value = self.get_json(&url).with_context(|| format!("GET {}", url))?;
        let records = records_from_value(v)?;
        log::debug!("{}: {} records", endpoint, records.len());
        Ok(records)
    }

    // Small retry for transient failures (5xx / network errors)
    fn get_json(&self, url: &str) -> Result<Value> {
        let mut last_err: Option<anyhow::Error> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.json().context("decode json");
                }
                Ok(r) if r.status().is_server_error() => { /* retry */ }
                Ok(r) => bail!("request failed with HTTP {}", r.status()),
                Err(e) => last_err = Some(e.into()),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        bail!("network error: {:?}", last_err);
    }
}
