use std::future::Future;

use super::sort::Sort;

/// Offset/limit window over a result set, with an optional sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    offset: u64,
    page_size: u32,
    sort: Sort,
}

impl Pageable {
    /// Page `page` (0-based) of `size` rows
    ///
    /// # Returns
    /// * `Err(String)` - If the size is zero
    pub fn of(page: u64, size: u32) -> Result<Self, String> {
        let offset = page
            .checked_mul(u64::from(size))
            .ok_or_else(|| format!("Page {} of size {} is out of range", page, size))?;
        Self::at_offset(offset, size)
    }

    /// Window starting at an arbitrary row offset
    pub fn at_offset(offset: u64, size: u32) -> Result<Self, String> {
        if size == 0 {
            return Err("Page size must be at least 1".to_string());
        }

        Ok(Self {
            offset,
            page_size: size,
            sort: Sort::unsorted(),
        })
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page number the offset falls into
    pub fn page_number(&self) -> u64 {
        self.offset / u64::from(self.page_size)
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }
}

/// One page of content plus the total of the filtered result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    pageable: Pageable,
    total: u64,
}

impl<T> Page<T> {
    /// Builds a page, correcting a total that cannot be right for the content
    ///
    /// A non-empty page whose window reaches past `total` ends the result
    /// set, so the total is `offset + content.len()`.
    pub fn new(content: Vec<T>, pageable: Pageable, total: u64) -> Self {
        let window_end = pageable
            .offset()
            .saturating_add(u64::from(pageable.page_size()));
        let total = if !content.is_empty() && window_end > total {
            pageable.offset().saturating_add(content.len() as u64)
        } else {
            total
        };

        Self {
            content,
            pageable,
            total,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn pageable(&self) -> &Pageable {
        &self.pageable
    }

    pub fn total_elements(&self) -> u64 {
        self.total
    }

    pub fn number(&self) -> u64 {
        self.pageable.page_number()
    }

    pub fn size(&self) -> u32 {
        self.pageable.page_size()
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.pageable.page_size()))
    }

    pub fn has_next(&self) -> bool {
        self.number().saturating_add(1) < self.total_pages()
    }

    pub fn is_first(&self) -> bool {
        self.number() == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Converts the content, keeping window and total
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            pageable: self.pageable,
            total: self.total,
        }
    }
}

/// Total implied by the content alone, when the page is provably the last one
///
/// Returns `None` when a count query is required.
pub fn elided_total(pageable: &Pageable, content_len: usize) -> Option<u64> {
    let len = content_len as u64;
    let short_page = len < u64::from(pageable.page_size());

    if pageable.offset() == 0 {
        return short_page.then_some(len);
    }

    (len != 0 && short_page).then(|| pageable.offset().saturating_add(len))
}

/// Builds a page, running `count` only when the total cannot be derived
pub async fn page_with_count<T, E, F, Fut>(
    content: Vec<T>,
    pageable: Pageable,
    count: F,
) -> Result<Page<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<u64, E>>,
{
    let total = match elided_total(&pageable, content.len()) {
        Some(total) => {
            tracing::debug!(offset = pageable.offset(), total, "count query elided");
            total
        }
        None => count().await?,
    };

    Ok(Page::new(content, pageable, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn pageable(offset: u64, size: u32) -> Pageable {
        Pageable::at_offset(offset, size).unwrap()
    }

    #[test]
    fn of_computes_offset() {
        let p = Pageable::of(3, 10).unwrap();

        assert_eq!(p.offset(), 30);
        assert_eq!(p.page_size(), 10);
        assert_eq!(p.page_number(), 3);
        assert!(p.sort().is_unsorted());
    }

    #[test]
    fn zero_size_fails() {
        assert!(Pageable::of(0, 0).is_err());
        assert!(Pageable::at_offset(5, 0)
            .unwrap_err()
            .contains("Page size must be at least 1"));
    }

    #[test]
    fn overflowing_page_fails() {
        assert!(Pageable::of(u64::MAX, 2).is_err());
    }

    #[test]
    fn first_short_page_is_its_own_total() {
        assert_eq!(elided_total(&pageable(0, 10), 4), Some(4));
        assert_eq!(elided_total(&pageable(0, 10), 0), Some(0));
    }

    #[test]
    fn first_full_page_needs_count() {
        assert_eq!(elided_total(&pageable(0, 4), 4), None);
    }

    #[test]
    fn later_short_page_adds_offset() {
        assert_eq!(elided_total(&pageable(20, 10), 3), Some(23));
    }

    #[test]
    fn later_empty_page_needs_count() {
        assert_eq!(elided_total(&pageable(20, 10), 0), None);
    }

    #[test]
    fn later_full_page_needs_count() {
        assert_eq!(elided_total(&pageable(1, 2), 2), None);
    }

    #[test]
    fn page_accessors() {
        let page = Page::new(vec![1, 2], Pageable::of(1, 2).unwrap(), 5);

        assert_eq!(page.total_elements(), 5);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.number(), 1);
        assert_eq!(page.size(), 2);
        assert_eq!(page.number_of_elements(), 2);
        assert!(!page.is_first());
        assert!(page.has_next());
        assert!(!page.is_last());
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: Page<i32> = Page::new(vec![], Pageable::of(0, 10).unwrap(), 0);

        assert_eq!(page.total_pages(), 0);
        assert!(page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn stale_total_is_corrected_by_content() {
        let page = Page::new(vec![1, 2, 3], pageable(10, 5), 4);
        assert_eq!(page.total_elements(), 13);
    }

    #[test]
    fn window_at_end_of_range_saturates() {
        let page = Page::new(vec![1], pageable(u64::MAX - 1, 10), 0);

        assert_eq!(page.total_elements(), u64::MAX);
        assert!(page.is_last());
        assert_eq!(elided_total(&pageable(u64::MAX, 10), 3), Some(u64::MAX));
    }

    #[test]
    fn last_possible_page_has_no_next() {
        let page: Page<i32> = Page::new(vec![], pageable(u64::MAX, 1), 0);

        assert!(!page.has_next());
    }

    #[test]
    fn map_keeps_total() {
        let page = Page::new(vec![1, 2], pageable(0, 2), 7).map(|n| n * 10);

        assert_eq!(page.content(), &[10, 20]);
        assert_eq!(page.total_elements(), 7);
    }

    #[tokio::test]
    async fn page_with_count_skips_count_on_last_page() {
        let calls = Cell::new(0);
        let counter = &calls;
        let page = page_with_count(vec!["a", "b"], pageable(4, 5), move || async move {
            counter.set(counter.get() + 1);
            Ok::<u64, String>(100)
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(page.total_elements(), 6);
    }

    #[tokio::test]
    async fn page_with_count_runs_count_on_full_page() {
        let calls = Cell::new(0);
        let counter = &calls;
        let page = page_with_count(vec!["a", "b"], pageable(0, 2), move || async move {
            counter.set(counter.get() + 1);
            Ok::<u64, String>(9)
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(page.total_elements(), 9);
    }

    #[tokio::test]
    async fn page_with_count_propagates_count_error() {
        let result = page_with_count(vec![1], pageable(0, 1), || async {
            Err::<u64, String>("connection reset".to_string())
        })
        .await;

        assert_eq!(result.unwrap_err(), "connection reset");
    }
}
