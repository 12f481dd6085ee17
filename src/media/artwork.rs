// SPDX-License-Identifier: MPL-2.0
//! Artwork download for the viewer.
//!
//! Photos and clip thumbnails are ordinary URL-addressed images. They are
//! fetched over HTTP and decoded by the image widget; the viewer keeps the
//! last good artwork when a download fails.

use crate::error::{Error, Result};
use futures_util::StreamExt;
use std::time::Duration;

/// Largest artwork accepted, in bytes.
pub const MAX_ARTWORK_BYTES: u64 = 32 * 1024 * 1024;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Downloads the image at `url`.
///
/// # Errors
///
/// Returns [`Error::Fetch`] for transport failures, non-success statuses and
/// bodies larger than [`MAX_ARTWORK_BYTES`].
pub async fn fetch(url: String) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("IcedReel/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Fetch(format!(
            "HTTP status {} for {url}",
            response.status()
        )));
    }

    if let Some(length) = response.content_length() {
        check_size(length)?;
    }

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        body.extend_from_slice(&chunk);
        check_size(body.len() as u64)?;
    }

    tracing::trace!(%url, bytes = body.len(), "artwork downloaded");
    Ok(body)
}

fn check_size(bytes: u64) -> Result<()> {
    if bytes > MAX_ARTWORK_BYTES {
        return Err(Error::Fetch(format!(
            "artwork too large ({bytes} bytes, limit {MAX_ARTWORK_BYTES})"
        )));
    }
    Ok(())
}
