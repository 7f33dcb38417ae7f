use crate::model::Manual;

/// Keep the manuals whose search text contains `query`, ignoring case.
///
/// An empty query keeps everything. Order is preserved.
pub fn filter_manuals<'a>(manuals: &'a [Manual], query: &str) -> Vec<&'a Manual> {
    let needle = query.to_lowercase();
    manuals
        .iter()
        .filter(|m| m.search_text().to_lowercase().contains(&needle))
        .collect()
}

/// "1 result", "0 results", "12 results".
pub fn result_count_label(count: usize) -> String {
    format!("{} result{}", count, if count == 1 { "" } else { "s" })
}
