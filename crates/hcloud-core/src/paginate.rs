// ── Pagination walker ──
//
// Drives a "fetch one page" function from page 1 until the server stops
// reporting a next page. Pages are fetched strictly one after another and
// items are concatenated in server order.

use std::future::Future;

use hcloud_api::Response;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::CoreError;

/// Collect every page into one ordered `Vec`.
///
/// The walk ends when the response carries no pagination metadata, no
/// `next_page`, a `next_page` that does not move forward, or an empty page.
/// A `meta` block that does not decode fails with `MalformedData`.
/// The first failing fetch ends the walk and its error is returned alone;
/// items from earlier pages are discarded. A cancelled `cancel` token stops
/// the walk before the next fetch is issued.
pub async fn walk_pages<T, F, Fut>(
    cancel: &CancellationToken,
    mut fetch: F,
) -> Result<Vec<T>, CoreError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Response), CoreError>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        if cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        let (batch, response) = fetch(page).await?;
        let next_page = response
            .meta()
            .map_err(|e| CoreError::malformed("meta.pagination", e))?
            .and_then(|meta| meta.pagination)
            .and_then(|pagination| pagination.next_page);
        trace!(page, items = batch.len(), ?next_page, "fetched page");

        let exhausted = batch.is_empty();
        items.extend(batch);

        match next_page {
            Some(next) if next > page && !exhausted => page = next,
            _ => return Ok(items),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use serde_json::{Value, json};

    use super::*;

    fn page_response(page: u32, next_page: Option<u32>) -> Response {
        Response::new(
            200,
            json!({
                "meta": {
                    "pagination": {
                        "page": page,
                        "per_page": 2,
                        "previous_page": null,
                        "next_page": next_page,
                        "last_page": 3,
                        "total_entries": 6
                    }
                }
            }),
        )
    }

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let fetched = RefCell::new(Vec::new());
        let cancel = CancellationToken::new();

        let items = walk_pages(&cancel, |page| {
            fetched.borrow_mut().push(page);
            async move {
                let next = (page < 3).then_some(page + 1);
                let batch = vec![page * 10 + 1, page * 10 + 2];
                Ok((batch, page_response(page, next)))
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![11, 12, 21, 22, 31, 32]);
        assert_eq!(*fetched.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_meta_means_single_page() {
        let cancel = CancellationToken::new();
        let items = walk_pages(&cancel, |_| async {
            Ok((vec!["only"], Response::new(200, Value::Null)))
        })
        .await
        .unwrap();
        assert_eq!(items, vec!["only"]);
    }

    #[tokio::test]
    async fn empty_page_stops_the_walk() {
        let calls = RefCell::new(0);
        let cancel = CancellationToken::new();

        let items: Vec<u32> = walk_pages(&cancel, |page| {
            *calls.borrow_mut() += 1;
            async move { Ok((Vec::new(), page_response(page, Some(page + 1)))) }
        })
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn malformed_pagination_block_is_an_error() {
        let calls = RefCell::new(0);
        let cancel = CancellationToken::new();

        // `per_page` missing: the block cannot be trusted to say "last page"
        let result: Result<Vec<u32>, _> = walk_pages(&cancel, |page| {
            *calls.borrow_mut() += 1;
            async move {
                let body = json!({
                    "meta": { "pagination": { "page": page, "next_page": 2, "last_page": 3 } }
                });
                Ok((vec![page], Response::new(200, body)))
            }
        })
        .await;

        match result {
            Err(CoreError::MalformedData { field, .. }) => assert_eq!(field, "meta.pagination"),
            other => panic!("expected MalformedData, got {other:?}"),
        }
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn failure_discards_partial_results() {
        let cancel = CancellationToken::new();
        let result: Result<Vec<u32>, _> = walk_pages(&cancel, |page| async move {
            if page == 2 {
                Err(CoreError::validation("page two exploded"))
            } else {
                Ok((vec![1, 2], page_response(page, Some(page + 1))))
            }
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "page two exploded");
    }

    #[tokio::test]
    async fn cancellation_stops_before_next_fetch() {
        let calls = RefCell::new(0);
        let cancel = CancellationToken::new();

        let result: Result<Vec<u32>, _> = walk_pages(&cancel, |page| {
            *calls.borrow_mut() += 1;
            cancel.cancel();
            async move { Ok((vec![page], page_response(page, Some(page + 1)))) }
        })
        .await;

        assert!(matches!(result, Err(CoreError::Cancelled)));
        assert_eq!(*calls.borrow(), 1);
    }
}
