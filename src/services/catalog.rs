//! Remote catalog access.
//!
//! [`HttpClient`] is the seam between the update workflow and the network.
//! [`ReqwestClient`] is the production implementation; tests substitute a
//! mock so the workflow can run against fixtures.

use crate::error::UpdateError;
use crate::models::{ELVUI_SLUG, RemoteAddonRecord};
use camino::Utf8Path;
use reqwest::StatusCode;
use std::fs::File;
use std::io::Write;
use std::time::Duration;

/// Request timeout for both the catalog query and the archive download
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking HTTP operations needed by the updater
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient {
    /// GET `url` and return the whole body.
    ///
    /// Fails with [`UpdateError::HttpStatus`] on any non-2xx status.
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, UpdateError>;

    /// GET `url` and stream the body into a new file at `dest`.
    ///
    /// Fails with [`UpdateError::HttpStatus`] unless the status is exactly
    /// 200. The file is flushed to disk before returning. Returns the
    /// number of bytes written.
    fn download_to_file(&self, url: &str, dest: &Utf8Path) -> Result<u64, UpdateError>;
}

/// [`HttpClient`] backed by `reqwest::blocking`
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new client with the updater's user agent and timeout.
    ///
    /// # Errors
    /// Returns [`UpdateError::ClientSetup`] if the TLS backend or system
    /// configuration cannot be initialised
    pub fn new() -> Result<Self, UpdateError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(UpdateError::ClientSetup)?;

        Ok(Self { client })
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response, UpdateError> {
        self.client
            .get(url)
            .send()
            .map_err(|source| UpdateError::Network {
                url: url.to_string(),
                source,
            })
    }
}

impl HttpClient for ReqwestClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, UpdateError> {
        let response = self.send(url)?;

        if !response.status().is_success() {
            return Err(UpdateError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|source| UpdateError::Network {
            url: url.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }

    fn download_to_file(&self, url: &str, dest: &Utf8Path) -> Result<u64, UpdateError> {
        let mut response = self.send(url)?;

        if response.status() != StatusCode::OK {
            return Err(UpdateError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let staging_error = |source| UpdateError::Staging {
            path: dest.to_path_buf(),
            source,
        };

        let mut out_file = File::create(dest).map_err(staging_error)?;
        let written = response
            .copy_to(&mut out_file)
            .map_err(|source| UpdateError::Network {
                url: url.to_string(),
                source,
            })?;
        out_file.flush().map_err(staging_error)?;
        out_file.sync_all().map_err(staging_error)?;

        tracing::debug!("Downloaded {} bytes from {} to {}", written, url, dest);
        Ok(written)
    }
}

/// Query the catalog at `endpoint` and return the ElvUI record.
///
/// # Errors
/// - [`UpdateError::Network`] / [`UpdateError::HttpStatus`] from the request
/// - [`UpdateError::Decode`] if the body is not a JSON array of records
/// - [`UpdateError::EmptyCatalog`] if the array is empty
/// - [`UpdateError::NotFound`] if no record has the `elvui` slug
pub fn fetch_elvui_record<C: HttpClient + ?Sized>(
    http: &C,
    endpoint: &str,
) -> Result<RemoteAddonRecord, UpdateError> {
    let body = http.get_bytes(endpoint)?;
    let records: Vec<RemoteAddonRecord> = serde_json::from_slice(&body)?;

    tracing::debug!("Catalog returned {} records", records.len());
    select_record(records, ELVUI_SLUG)
}

/// Pick the first record whose slug equals `slug`.
pub fn select_record(
    records: Vec<RemoteAddonRecord>,
    slug: &str,
) -> Result<RemoteAddonRecord, UpdateError> {
    if records.is_empty() {
        return Err(UpdateError::EmptyCatalog);
    }

    records
        .into_iter()
        .find(|record| record.identifier == slug)
        .ok_or_else(|| UpdateError::NotFound(slug.to_string()))
}
