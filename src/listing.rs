use crate::error::ClientError;
use crate::models::Page;

/// Client-side state of one paginated table.
///
/// Pages are 1-based. `next`/`prev` only move inside the known page
/// range and report whether the page changed, so the caller knows when
/// to fetch again.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
    total_items: u64,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_items: 0,
        }
    }
}

impl<T> PagedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped to the known range.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.total_pages.max(1));
        let moved = target != self.current_page;
        self.current_page = target;
        moved
    }

    /// Replace contents with a freshly fetched page.
    pub fn apply(&mut self, page: Page<T>) {
        self.total_pages = page.total_pages.max(1);
        self.total_items = page.total_items;
        self.items = page.data;
        if self.current_page > self.total_pages {
            self.current_page = self.total_pages;
        }
    }

    /// Fetch the current page with `fetch` and apply it.
    ///
    /// On error the previous contents are left untouched.
    pub fn load<F>(&mut self, fetch: F) -> Result<(), ClientError>
    where
        F: FnOnce(u32) -> Result<Page<T>, ClientError>,
    {
        let page = fetch(self.current_page)?;
        self.apply(page);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(data: Vec<u32>, total_pages: u32) -> Page<u32> {
        Page {
            next_page: None,
            previous_page: None,
            total_items: data.len() as u64,
            total_pages,
            data,
        }
    }

    #[test]
    fn starts_on_first_page() {
        let list: PagedList<u32> = PagedList::new();
        assert_eq!(list.current_page(), 1);
        assert!(!list.has_next());
        assert!(!list.has_prev());
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut list = PagedList::new();
        list.apply(page(vec![1, 2], 2));
        assert!(list.next());
        assert_eq!(list.current_page(), 2);
        assert!(!list.next());
        assert!(list.prev());
        assert!(!list.prev());
        assert_eq!(list.current_page(), 1);
    }

    #[test]
    fn load_passes_current_page() {
        let mut list = PagedList::new();
        list.apply(page(vec![], 3));
        list.go_to(3);
        let mut requested = 0;
        list.load(|p| {
            requested = p;
            Ok(page(vec![9], 3))
        })
        .unwrap();
        assert_eq!(requested, 3);
        assert_eq!(list.items(), &[9]);
    }

    #[test]
    fn failed_load_keeps_previous_items() {
        let mut list = PagedList::new();
        list.apply(page(vec![1], 1));
        let result = list.load(|_| Err(ClientError::Timeout(1)));
        assert!(result.is_err());
        assert_eq!(list.items(), &[1]);
    }

    #[test]
    fn shrinking_page_count_clamps_current_page() {
        let mut list = PagedList::new();
        list.apply(page(vec![], 5));
        list.go_to(5);
        list.apply(page(vec![], 2));
        assert_eq!(list.current_page(), 2);
    }

    #[test]
    fn go_to_clamps() {
        let mut list: PagedList<u32> = PagedList::new();
        list.apply(page(vec![], 4));
        assert!(list.go_to(10));
        assert_eq!(list.current_page(), 4);
        assert!(list.go_to(0));
        assert_eq!(list.current_page(), 1);
    }
}
