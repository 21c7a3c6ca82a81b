//! In-memory pagination and plain-text export of a fully fetched commit list.

use crate::models::{Commit, PaginatedCommits, TextExport};

/// Slice one page out of `commits`.
///
/// `total_pages` is never 0: an empty list still has one (empty) page. A page
/// past the end is clamped to the last page instead of being an error. Page
/// and page size of 0 are treated as 1.
pub fn paginate(commits: Vec<Commit>, page: usize, page_size: usize) -> PaginatedCommits {
    let page_size = page_size.max(1);
    let total = commits.len();
    let total_pages = if total == 0 { 1 } else { total.div_ceil(page_size) };
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);

    let items = commits.into_iter().skip(start).take(end - start).collect();

    PaginatedCommits {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}

/// One `N、author：title` line per commit, numbered from 1.
pub fn render_text(commits: &[Commit]) -> TextExport {
    let content = commits
        .iter()
        .enumerate()
        .map(|(i, commit)| format!("{}、{}：{}", i + 1, commit.author_name, commit.title))
        .collect::<Vec<_>>()
        .join("\n");

    TextExport { content }
}
