/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Paging through collections.
//!
//! Collections are requested one slice at a time with a 1-based `start` and a
//! `count`. Every response reports the slice it holds and the `total` size of
//! the collection. Paging stops once the counts seen add up to `total`, or
//! earlier when the caller says so. A page that brings nothing new while the
//! total has not been reached is an error rather than a reason to ask again.

use crate::v2::errors::SmugMugError;
use async_stream::try_stream;
use futures::Stream;
use log::debug;
use serde::{Deserialize, Serialize};

/// Number of items requested per page
pub const NUM_TO_GET: u64 = 100;

/// Describes the slice of a collection held by one response
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Pages {
    #[serde(rename = "Total")]
    pub total: u64,

    #[serde(rename = "Start")]
    pub start: u64,

    #[serde(rename = "Count")]
    pub count: u64,

    #[serde(default, rename = "RequestedCount")]
    pub requested_count: u64,

    #[serde(default, rename = "NextPage", skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

impl Pages {
    /// Page info for a response that came back without any, meaning everything fit in one page
    pub fn complete(count: u64) -> Self {
        Self {
            total: count,
            start: 1,
            count,
            requested_count: count,
            next_page: None,
        }
    }
}

/// The slice of a collection to ask for next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub start: u64,
    pub count: u64,
}

impl PageRequest {
    pub fn first(count: u64) -> Self {
        Self { start: 1, count }
    }

    /// Query parameters for this page
    pub fn params(&self) -> [(String, String); 2] {
        [
            ("start".to_string(), self.start.to_string()),
            ("count".to_string(), self.count.to_string()),
        ]
    }
}

// Tracks progress through a collection
#[derive(Debug)]
struct PageCursor {
    page_size: u64,
    seen: u64,
    next: Option<PageRequest>,
}

impl PageCursor {
    fn new(page_size: u64) -> Self {
        Self {
            page_size,
            seen: 0,
            next: Some(PageRequest::first(page_size)),
        }
    }

    fn next_request(&self) -> Option<PageRequest> {
        self.next
    }

    // Accounts for a fetched page and works out what to ask for next
    fn advance(&mut self, pages: &Pages) -> Result<(), SmugMugError> {
        self.seen += pages.count;
        if self.seen == pages.total {
            self.next = None;
            return Ok(());
        }
        if pages.count == 0 {
            self.next = None;
            return Err(SmugMugError::PaginationStalled {
                start: pages.start,
                seen: self.seen,
                total: pages.total,
            });
        }
        self.next = Some(PageRequest {
            start: pages.start + pages.count,
            count: self.page_size,
        });
        Ok(())
    }
}

/// Visits every item of a paged collection in server order.
///
/// `fetch` performs exactly one request for the given page. `visitor` is called
/// once per item and stops the iteration, without any further fetch, by
/// returning `Ok(false)` or an error. Only one fetch is outstanding at a time.
pub async fn iterate<T, F, Fut, V>(
    mut fetch: F,
    mut visitor: V,
    page_size: u64,
) -> Result<(), SmugMugError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Pages), SmugMugError>>,
    V: FnMut(T) -> Result<bool, SmugMugError>,
{
    let mut cursor = PageCursor::new(page_size);
    while let Some(request) = cursor.next_request() {
        let (items, pages) = fetch(request).await?;
        debug!(
            "page start: {} count: {} total: {}",
            pages.start, pages.count, pages.total
        );
        for item in items {
            if !visitor(item)? {
                return Ok(());
            }
        }
        cursor.advance(&pages)?;
    }
    Ok(())
}

/// Same paging rules as [`iterate`], presented as a stream.
///
/// The next page is only fetched once every item of the current one has been
/// pulled, so dropping the stream stops the paging.
pub fn paginate<T, F, Fut>(mut fetch: F, page_size: u64) -> impl Stream<Item = Result<T, SmugMugError>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Pages), SmugMugError>>,
{
    try_stream! {
        let mut cursor = PageCursor::new(page_size);
        while let Some(request) = cursor.next_request() {
            let (items, pages) = fetch(request).await?;
            for item in items {
                yield item;
            }
            cursor.advance(&pages)?;
        }
    }
}
