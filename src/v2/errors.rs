/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum SmugMugError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Request network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Authorization error. {0}")]
    Auth(String),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error: {0}")]
    UrlParsing(#[from] url::ParseError),

    #[error("This is not an album")]
    NotAnAlbum(),

    #[error("Client not found")]
    ClientNotFound(),

    #[error("Expected response missing")]
    ResponseMissing(),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(u32, String),

    #[error("API Response is malformed: {0:?}")]
    ApiResponseMalformed(serde_json::Error),

    #[error("Pagination did not advance at start {start}: {seen} of {total} items seen")]
    PaginationStalled { start: u64, seen: u64, total: u64 },

    #[error("Unsupported node type: {0}")]
    UnsupportedNodeType(String),

    #[error("Missing album key for upload")]
    MissingAlbumKey(),

    #[error("Upload was cancelled")]
    Cancelled(),

    #[error("Upload deadline exceeded")]
    DeadlineExceeded(),

    #[error("Upload task failed: {0}")]
    TaskFailed(String),
}

impl SmugMugError {
    /// True for the errors the upload pipeline reports when it was stopped from outside
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled() | Self::DeadlineExceeded())
    }
}
