// API client module: a small blocking HTTP client that talks to the
// wallet service. All wallet logic (key management, balance computation,
// transaction construction) lives server-side; this client only moves
// JSON back and forth and keeps the session cookie alive between login
// and logout.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Successful responses wrap their payload in an envelope with a
/// top-level `data` field (alongside route/status/timestamp metadata,
/// which this client ignores).
#[derive(Deserialize, Debug)]
struct Envelope<T> {
    data: T,
}

/// Body for `POST /wallet/send`. `address_index` is always sent,
/// including 0, and a missing asset is serialized as JSON null, which
/// the service reads as "native token".
#[derive(Serialize, Debug)]
struct SendRequest<'a> {
    protocol: &'a str,
    destination: &'a str,
    amount: f64,
    address_index: u32,
    asset: Option<&'a str>,
}

/// Blocking client for the wallet service. Holds the base URL and a
/// reqwest client whose cookie store carries the session between
/// `login` and `logout`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL. Every call gets a
    /// bounded timeout; expiry surfaces as a request failure.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client configured from the environment variable
    /// `WALLET_API_URL` or fallback to `http://localhost:8989`.
    pub fn from_env() -> Result<Self, Error> {
        let base_url =
            std::env::var("WALLET_API_URL").unwrap_or_else(|_| "http://localhost:8989".into());
        Self::new(base_url)
    }

    /// Open a session. On success the service sets a session cookie
    /// that the underlying client replays on every later call.
    pub fn login(&self, password: &str) -> Result<(), Error> {
        let url = format!("{}/login", self.base_url);
        debug!("POST {}", url);
        let res = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "password": password }))
            .send()?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(Error::Authentication { status, body });
        }
        Ok(())
    }

    /// Close the session.
    pub fn logout(&self) -> Result<(), Error> {
        let url = format!("{}/logout", self.base_url);
        debug!("POST {}", url);
        let res = self.client.post(&url).send()?;
        check_status(res)?;
        Ok(())
    }

    /// Replace the service-held keystore. Both arguments are secrets:
    /// they stay inside this call and are never logged.
    pub fn update_keystore(&self, mnemonic: &str, password: &str) -> Result<(), Error> {
        let url = format!("{}/keystore", self.base_url);
        debug!("POST {}", url);
        let res = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "mnemonic": mnemonic, "password": password }))
            .send()?;
        check_status(res)?;
        Ok(())
    }

    /// Fetch the wallet summary. Its shape is the service's business;
    /// callers only pretty-print it.
    pub fn get_wallet(&self) -> Result<Value, Error> {
        let url = format!("{}/wallet", self.base_url);
        debug!("GET {}", url);
        let res = self.client.get(&url).send()?;
        read_data(check_status(res)?)
    }

    /// Fetch the address derived for `protocol` at `address_index`.
    /// Index 0 is the service default and is encoded by leaving the
    /// query parameter off entirely.
    pub fn get_address(&self, protocol: &str, address_index: u32) -> Result<String, Error> {
        let url = format!("{}/wallet/address/{}", self.base_url, protocol);
        debug!("GET {}", url);
        let mut req = self.client.get(&url);
        if address_index > 0 {
            req = req.query(&[("addressIndex", address_index)]);
        }
        read_data(check_status(req.send()?)?)
    }

    /// Fetch a balance. An `asset` of `None` means the protocol's
    /// native token. The value is passed through opaquely; the service
    /// answers with a string or a number depending on the chain.
    pub fn get_balance(
        &self,
        protocol: &str,
        address_index: u32,
        asset: Option<&str>,
    ) -> Result<Value, Error> {
        let url = format!("{}/wallet/balance/{}", self.base_url, protocol);
        debug!("GET {}", url);
        let mut req = self.client.get(&url);
        if address_index > 0 {
            req = req.query(&[("addressIndex", address_index)]);
        }
        if let Some(asset) = asset {
            req = req.query(&[("asset", asset)]);
        }
        read_data(check_status(req.send()?)?)
    }

    /// Submit a send. Returns the service's description of the
    /// submitted transaction.
    pub fn send(
        &self,
        protocol: &str,
        destination: &str,
        amount: f64,
        address_index: u32,
        asset: Option<&str>,
    ) -> Result<Value, Error> {
        let url = format!("{}/wallet/send", self.base_url);
        debug!("POST {}", url);
        let res = self
            .client
            .post(&url)
            .json(&SendRequest {
                protocol,
                destination,
                amount,
                address_index,
                asset,
            })
            .send()?;
        read_data(check_status(res)?)
    }
}

/// Map any non-2xx response to `Error::Request`, surfacing status and
/// body to the operator.
fn check_status(res: Response) -> Result<Response, Error> {
    if res.status().is_success() {
        Ok(res)
    } else {
        let status = res.status();
        let body = res.text().unwrap_or_default();
        Err(Error::Request { status, body })
    }
}

/// Unwrap the `data` field of a response envelope.
fn read_data<T: DeserializeOwned>(res: Response) -> Result<T, Error> {
    let envelope: Envelope<T> = res.json()?;
    Ok(envelope.data)
}
