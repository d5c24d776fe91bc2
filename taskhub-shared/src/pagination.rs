/// Page-number pagination shared by the project and task listings
///
/// A [`PageRequest`] is validated once at construction, so every listing
/// downstream can rely on `page >= 1` and `limit >= 1`. [`paginate`] runs
/// the total count and the page fetch concurrently and assembles a
/// [`Page`].
///
/// # Example
///
/// ```
/// use taskhub_shared::pagination::{paginate, PageRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let items: Vec<u32> = (0..14).collect();
/// let request = PageRequest::new(Some(3), Some(6))?;
///
/// let page = paginate(
///     request,
///     async { Ok::<_, std::convert::Infallible>(items.len() as i64) },
///     |skip, limit| {
///         let slice = items.iter().copied().skip(skip as usize).take(limit as usize).collect();
///         async move { Ok(slice) }
///     },
/// )
/// .await?;
///
/// assert_eq!(page.items, vec![12, 13]);
/// assert_eq!(page.total_pages, 3);
/// # Ok(())
/// # }
/// ```

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Page used when the client does not ask for one
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Upper bound on the page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Builds a page request, applying defaults for missing values
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidQuery` if `page` or `limit` is below 1.
    /// A limit above [`MAX_PAGE_SIZE`] is clamped rather than rejected.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, ServiceError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(ServiceError::InvalidQuery(
                "page must be a positive integer".to_string(),
            ));
        }
        if limit < 1 {
            return Err(ServiceError::InvalidQuery(
                "limit must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            page,
            limit: limit.min(MAX_PAGE_SIZE),
        })
    }

    /// 1-based page number
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Page size
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of records to skip before this page starts
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Total number of pages needed for `total` records
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page, newest first
    pub items: Vec<T>,

    /// Requested page, echoed back even when past the end
    pub current_page: i64,

    /// `ceil(total / limit)`
    pub total_pages: i64,

    /// Number of records matching the filter across all pages
    pub total: i64,
}

impl<T> Page<T> {
    /// Assembles a page from fetched items and the true total
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            current_page: request.page(),
            total_pages: request.total_pages(total),
            total,
        }
    }

    /// Converts the items while keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total: self.total,
        }
    }
}

/// Runs a count query and a page query for the same filter
///
/// `fetch` receives `(skip, limit)`. Both futures are polled concurrently
/// and the first error wins.
pub async fn paginate<T, E, C, F, Fut>(
    request: PageRequest,
    count: C,
    fetch: F,
) -> Result<Page<T>, E>
where
    C: Future<Output = Result<i64, E>>,
    F: FnOnce(i64, i64) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let (total, items) = futures::try_join!(count, fetch(request.skip(), request.limit()))?;
    Ok(Page::new(items, request, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    async fn page_of(data: &[i64], request: PageRequest) -> Page<i64> {
        paginate(
            request,
            async { Ok::<_, Infallible>(data.len() as i64) },
            |skip, limit| {
                let items = data
                    .iter()
                    .copied()
                    .skip(skip as usize)
                    .take(limit as usize)
                    .collect();
                async move { Ok(items) }
            },
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let request = PageRequest::new(None, None).unwrap();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 6);
        assert_eq!(request.skip(), 0);
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_skip() {
        let request = PageRequest::new(Some(3), Some(10)).unwrap();
        assert_eq!(request.skip(), 20);
    }

    #[test]
    fn test_rejects_non_positive_limit() {
        assert!(matches!(
            PageRequest::new(Some(1), Some(0)),
            Err(ServiceError::InvalidQuery(_))
        ));
        assert!(matches!(
            PageRequest::new(Some(1), Some(-5)),
            Err(ServiceError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_page() {
        assert!(matches!(
            PageRequest::new(Some(0), None),
            Err(ServiceError::InvalidQuery(_))
        ));
        assert!(matches!(
            PageRequest::new(Some(-1), None),
            Err(ServiceError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_limit_is_clamped() {
        let request = PageRequest::new(None, Some(10_000)).unwrap();
        assert_eq!(request.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let request = PageRequest::new(None, Some(6)).unwrap();
        assert_eq!(request.total_pages(0), 0);
        assert_eq!(request.total_pages(1), 1);
        assert_eq!(request.total_pages(6), 1);
        assert_eq!(request.total_pages(7), 2);
        assert_eq!(request.total_pages(12), 2);
        assert_eq!(request.total_pages(13), 3);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let request = PageRequest::new(Some(i64::MAX), Some(100)).unwrap();
        assert_eq!(request.skip(), i64::MAX);
    }

    #[tokio::test]
    async fn test_page_past_end_echoes_requested_page() {
        let data: Vec<i64> = (0..7).collect();
        let page = page_of(&data, PageRequest::new(Some(5), Some(6)).unwrap()).await;

        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 5);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total, 7);
    }

    #[tokio::test]
    async fn test_pages_concatenate_to_full_sequence() {
        let data: Vec<i64> = (0..23).rev().collect();

        for limit in 1..=25 {
            let first = page_of(&data, PageRequest::new(Some(1), Some(limit)).unwrap()).await;
            let mut collected = first.items.clone();
            for page in 2..=first.total_pages {
                let next = page_of(&data, PageRequest::new(Some(page), Some(limit)).unwrap()).await;
                collected.extend(next.items);
            }
            assert_eq!(collected, data, "limit {limit}");
            assert_eq!(first.total_pages, (23 + limit - 1) / limit);
        }
    }

    #[tokio::test]
    async fn test_first_error_is_returned() {
        let result: Result<Page<i64>, &str> = paginate(
            PageRequest::default(),
            async { Err("count failed") },
            |_, _| async { Ok(vec![1]) },
        )
        .await;

        assert_eq!(result.unwrap_err(), "count failed");
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::new(Some(2), Some(2)).unwrap(), 4);
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.current_page, 2);
        assert_eq!(mapped.total_pages, 2);
        assert_eq!(mapped.total, 4);
    }
}
