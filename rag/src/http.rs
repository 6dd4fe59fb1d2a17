use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::from_str;
use std::time::Duration;

use crate::error::HttpError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Raw outcome of a request whose status the caller wants to inspect itself.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

fn client(url: &str) -> Result<Client, HttpError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|source| HttpError::Transport { url: url.to_string(), source })
}

/// POSTs a JSON body and returns status and body without judging either.
pub fn post_json_raw<B: Serialize>(
    url: &str,
    headers: &[(&str, &str)],
    body: &B,
) -> Result<RawResponse, HttpError> {
    let mut req = client(url)?
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .json(body);
    for (name, value) in headers {
        req = req.header(*name, *value);
    }
    send(url, req)
}

/// POSTs a JSON body and decodes a successful JSON reply into `T`.
pub fn post_json<T: DeserializeOwned, B: Serialize>(
    url: &str,
    headers: &[(&str, &str)],
    body: &B,
) -> Result<T, HttpError> {
    let raw = post_json_raw(url, headers, body)?;
    if !(200..300).contains(&raw.status) {
        return Err(HttpError::Status {
            url: url.to_string(),
            status: raw.status,
            body: raw.body,
        });
    }
    from_str::<T>(&raw.body).map_err(|e| HttpError::Decode {
        url: url.to_string(),
        message: format!("{} | {}", e, raw.body),
    })
}

fn send(url: &str, req: RequestBuilder) -> Result<RawResponse, HttpError> {
    let resp = req
        .send()
        .map_err(|source| HttpError::Transport { url: url.to_string(), source })?;
    let status = resp.status().as_u16();
    let body = resp.text().unwrap_or_default();
    Ok(RawResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_calls_share_the_documented_timeout() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(120));
    }
}
