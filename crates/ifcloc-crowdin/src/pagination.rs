//! Offset pagination over list endpoints.
//!
//! Pages are requested lazily: a consumer that stops pulling items early never
//! triggers the next page request. Iteration ends at the first empty page.

use std::collections::VecDeque;
use std::future::Future;

use ifcloc_config::MAX_PAGE_SIZE;

/// One page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

pub struct Paginator<T, F> {
    fetch: F,
    page_size: u32,
    offset: u32,
    buffer: VecDeque<T>,
    exhausted: bool,
}

impl<T, E, F, Fut> Paginator<T, F>
where
    F: FnMut(Page) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    /// `page_size` is clamped to `1..=MAX_PAGE_SIZE`
    pub fn new(page_size: u32, fetch: F) -> Self {
        Self {
            fetch,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            offset: 0,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Next item, fetching a new page when the buffered one is used up
    pub async fn next(&mut self) -> Result<Option<T>, E> {
        if let Some(item) = self.buffer.pop_front() {
            return Ok(Some(item));
        }

        if self.exhausted {
            return Ok(None);
        }

        let page = Page {
            offset: self.offset,
            limit: self.page_size,
        };
        let items = (self.fetch)(page).await?;

        if items.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        self.offset = self.offset.saturating_add(self.page_size);
        self.buffer.extend(items);

        Ok(self.buffer.pop_front())
    }

    pub async fn collect_all(mut self) -> Result<Vec<T>, E> {
        let mut all = Vec::new();
        while let Some(item) = self.next().await? {
            all.push(item);
        }
        Ok(all)
    }
}
