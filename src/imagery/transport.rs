//! Blocking HTTP seam used by [`Imagery`](crate::imagery::Imagery).

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::Result;

/// Minimal view of an HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests on behalf of the imagery fetchers.
pub trait Transport {
    fn get(&self, url: &str, headers: &[(&str, &str)], timeout: Duration) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, headers: &[(&str, &str)], timeout: Duration) -> Result<HttpResponse> {
        (**self).get(url, headers, timeout)
    }
}

/// `reqwest` blocking client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)], timeout: Duration) -> Result<HttpResponse> {
        let mut req = self.client.get(url).timeout(timeout);
        for (key, value) in headers {
            req = req.header(*key, *value);
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes()?.to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
