// SPDX-License-Identifier: MPL-2.0
//! Derives the single displayed image list from the cache's page sequence.

use crate::cache::CacheEntry;
use crate::model::Image;

/// Concatenates the entry's pages into one ordered image list.
///
/// Page order and intra-page order are preserved as fetched. No
/// deduplication is performed: the backend is assumed never to return the
/// same image twice across pages of one cursor chain. With a stale cursor
/// chain duplicates can appear; that is a consistency assumption on the
/// backend, not a crash-safety concern here.
#[must_use]
pub fn flatten(entry: &CacheEntry) -> Vec<Image> {
    entry
        .pages
        .iter()
        .flat_map(|page| page.data.iter().cloned())
        .collect()
}

/// Memoizing wrapper around [`flatten`].
///
/// Keyed on the entry's revision counter, so the list is recomputed only
/// when the page sequence actually changed rather than on every read.
#[derive(Debug, Default)]
pub struct Flattener {
    cached: Option<(u64, Vec<Image>)>,
}

impl Flattener {
    /// Creates a flattener with no cached view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flattened list for `entry`, reusing the previous result
    /// when the entry's revision is unchanged.
    pub fn view(&mut self, entry: &CacheEntry) -> &[Image] {
        let stale = self
            .cached
            .as_ref()
            .map_or(true, |(revision, _)| *revision != entry.revision);

        if stale {
            self.cached = Some((entry.revision, flatten(entry)));
        }

        match &self.cached {
            Some((_, images)) => images,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FetchStatus;
    use crate::model::Page;

    fn image(id: &str) -> Image {
        Image {
            id: id.to_string(),
            title: format!("image {id}"),
            description: String::new(),
            url: format!("https://cdn.example/{id}.jpg"),
            ts: 0,
        }
    }

    fn entry_with_pages(pages: Vec<Page>, revision: u64) -> CacheEntry {
        CacheEntry {
            pages,
            status: FetchStatus::Success,
            revision,
            ..CacheEntry::default()
        }
    }

    #[test]
    fn flatten_preserves_page_and_intra_page_order() {
        let entry = entry_with_pages(
            vec![
                Page { data: vec![image("a"), image("b")], after: Some("c1".to_string()) },
                Page { data: vec![image("c")], after: None },
            ],
            2,
        );

        let ids: Vec<_> = flatten(&entry).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn flatten_of_empty_terminal_page_is_empty_not_error() {
        let entry = entry_with_pages(vec![Page { data: Vec::new(), after: None }], 1);
        assert!(flatten(&entry).is_empty());
    }

    #[test]
    fn flatten_of_untouched_entry_is_empty() {
        assert!(flatten(&CacheEntry::default()).is_empty());
    }

    #[test]
    fn view_reuses_result_for_same_revision() {
        let entry = entry_with_pages(
            vec![Page { data: vec![image("a")], after: None }],
            1,
        );

        let mut flattener = Flattener::new();
        let first = flattener.view(&entry).as_ptr();
        let second = flattener.view(&entry).as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn view_recomputes_when_revision_changes() {
        let mut flattener = Flattener::new();

        let entry = entry_with_pages(
            vec![Page { data: vec![image("a")], after: Some("c1".to_string()) }],
            1,
        );
        assert_eq!(flattener.view(&entry).len(), 1);

        let entry = entry_with_pages(
            vec![
                Page { data: vec![image("a")], after: Some("c1".to_string()) },
                Page { data: vec![image("b")], after: None },
            ],
            2,
        );
        let ids: Vec<_> = flattener.view(&entry).iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
