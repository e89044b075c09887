use std::future::Future;

use crate::error::SyncError;

/// A single fetch result from an offset-paginated listing endpoint.
///
/// `total` is the authoritative size of the full remote collection and is
/// read fresh from every response; the request offset is not server state.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Exhaustively drains an offset-paginated listing into one collection.
///
/// `next_page` is called with the number of items accumulated so far, which
/// doubles as the offset of the next page. Pages are requested strictly
/// sequentially and their items are appended in response order, so the
/// result preserves the remote service's item order. The loop terminates
/// once the accumulated size reaches the most recently reported `total`.
///
/// # Errors
///
/// Propagates any error from `next_page` unchanged. A page that carries zero
/// items while more are expected would otherwise never make progress, so it
/// is rejected as [`SyncError::Fetch`] instead of being retried.
pub async fn fetch_all<T, F, Fut>(mut next_page: F) -> Result<Vec<T>, SyncError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Page<T>, SyncError>>,
{
    let mut collected: Vec<T> = Vec::new();

    loop {
        let page = next_page(collected.len()).await?;

        if page.items.is_empty() && collected.len() < page.total {
            return Err(SyncError::Fetch(format!(
                "listing returned an empty page at offset {} but reports {} total items",
                collected.len(),
                page.total
            )));
        }

        let total = page.total;
        collected.extend(page.items);

        if collected.len() >= total {
            return Ok(collected);
        }
    }
}
