// Rust guideline compliant 2026-08-05

//! Reachability probing for student photo URLs.
//!
//! A supplied photo URL must reference an existing remote resource at
//! input time. The probe is a bounded HEAD request with a GET fallback
//! for hosts that reject HEAD; any failure reports the resource as
//! unreachable rather than propagating.

use std::time::Duration;
use tracing::debug;
use url::Url;

/// Checks whether a URL references an existing remote resource.
///
/// # Arguments
///
/// * `raw` - The URL to probe
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// True if the resource answered with a success status.
pub fn resource_exists(raw: &str, timeout: Duration) -> bool {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            debug!(url = raw, error = %e, "Photo URL failed to parse");
            return false;
        }
    };

    let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            debug!(error = %e, "Failed to build probe client");
            return false;
        }
    };

    match client.head(url.clone()).send() {
        Ok(response) if response.status().is_success() => true,
        // Some hosts reject HEAD; retry with GET before giving up
        _ => match client.get(url).send() {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(url = raw, error = %e, "Photo URL unreachable");
                false
            }
        },
    }
}
