//! Matching ladder: resolve external rows to a brand with a confidence grade.

use std::collections::BTreeSet;

use uuid::Uuid;

use brandscope_core::records::ExternalMetricRow;
use brandscope_core::report::{LinkedEntity, MatchConfidence, MatchMethod};

use crate::normalize::{split_host_path, strip_www};

/// Match external rows against a brand URL.
///
/// Per row, first match wins:
/// 1. Operator-created manual link — accepted as-is, never re-validated.
/// 2. Equal host and equal non-empty path — `exact`/`exact`.
/// 3. Equal host (paths empty or differing) — `normalized`/`high`.
/// 4. Equal host after stripping one leading `www.` — `normalized`/`low`.
///
/// Rows matching none of these are excluded from the result, never guessed.
/// Whether a row should instead link to some other brand is the caller's
/// ordering concern; this function only answers "does this row match this
/// brand".
#[must_use]
pub fn link_rows(
    brand_id: Uuid,
    brand_url: &str,
    rows: &[ExternalMetricRow],
    manual_links: &BTreeSet<String>,
) -> Vec<LinkedEntity> {
    let (brand_host, brand_path) = split_host_path(brand_url);

    let mut linked = Vec::new();
    for row in rows {
        if manual_links.contains(&row.source_id) {
            linked.push(LinkedEntity {
                external_row_id: row.source_id.clone(),
                brand_id,
                match_method: MatchMethod::Manual,
                match_confidence: MatchConfidence::Manual,
            });
            continue;
        }

        let Some((method, confidence)) = match_row(&brand_host, &brand_path, &row.url) else {
            tracing::debug!(
                source_id = %row.source_id,
                url = %row.url,
                "external row did not match brand URL; excluded"
            );
            continue;
        };

        linked.push(LinkedEntity {
            external_row_id: row.source_id.clone(),
            brand_id,
            match_method: method,
            match_confidence: confidence,
        });
    }

    linked
}

fn match_row(
    brand_host: &str,
    brand_path: &str,
    row_url: &str,
) -> Option<(MatchMethod, MatchConfidence)> {
    // An unparseable brand URL has no host; nothing can match it.
    if brand_host.is_empty() {
        return None;
    }

    let (row_host, row_path) = split_host_path(row_url);
    if row_host.is_empty() {
        return None;
    }

    if row_host == brand_host {
        if row_path == brand_path && !row_path.is_empty() {
            return Some((MatchMethod::Exact, MatchConfidence::Exact));
        }
        // Bare-host equality (or a path mismatch) is a host-only match.
        return Some((MatchMethod::Normalized, MatchConfidence::High));
    }

    if strip_www(&row_host) == strip_www(brand_host) {
        return Some((MatchMethod::Normalized, MatchConfidence::Low));
    }

    None
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn brand_id() -> Uuid {
        "4e1b8a6c-9f03-4b2d-8e57-1a2b3c4d5e6f".parse().unwrap()
    }

    fn make_row(source_id: &str, url: &str) -> ExternalMetricRow {
        ExternalMetricRow {
            source_id: source_id.to_owned(),
            url: url.to_owned(),
            display_name: "Example Property".to_owned(),
            metrics: std::collections::BTreeMap::new(),
            period_start: Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(),
            period_end: Utc.with_ymd_and_hms(2026, 7, 31, 0, 0, 0).unwrap(),
        }
    }

    fn link_one(brand_url: &str, row_url: &str) -> Option<LinkedEntity> {
        let rows = vec![make_row("row-1", row_url)];
        link_rows(brand_id(), brand_url, &rows, &BTreeSet::new())
            .into_iter()
            .next()
    }

    #[test]
    fn bare_hosts_match_host_only_high() {
        let entity = link_one("http://example.com", "HTTPS://Example.com/").unwrap();
        assert_eq!(entity.match_method, MatchMethod::Normalized);
        assert_eq!(entity.match_confidence, MatchConfidence::High);
    }

    #[test]
    fn equal_paths_match_exact() {
        let entity = link_one("https://example.com/path", "https://example.com/path").unwrap();
        assert_eq!(entity.match_method, MatchMethod::Exact);
        assert_eq!(entity.match_confidence, MatchConfidence::Exact);
    }

    #[test]
    fn trailing_slash_still_exact() {
        let entity = link_one("https://example.com/path/", "https://example.com/path").unwrap();
        assert_eq!(entity.match_method, MatchMethod::Exact);
        assert_eq!(entity.match_confidence, MatchConfidence::Exact);
    }

    #[test]
    fn differing_paths_match_host_only_high() {
        let entity = link_one("https://example.com/a", "https://example.com/b").unwrap();
        assert_eq!(entity.match_method, MatchMethod::Normalized);
        assert_eq!(entity.match_confidence, MatchConfidence::High);
    }

    #[test]
    fn www_host_matches_low() {
        let entity = link_one("https://example.com", "https://www.example.com").unwrap();
        assert_eq!(entity.match_method, MatchMethod::Normalized);
        assert_eq!(entity.match_confidence, MatchConfidence::Low);
    }

    #[test]
    fn unrelated_host_is_excluded() {
        assert!(link_one("https://example.com", "https://other.org").is_none());
    }

    #[test]
    fn empty_brand_url_matches_nothing() {
        assert!(link_one("", "https://example.com").is_none());
    }

    #[test]
    fn manual_link_bypasses_matching() {
        let rows = vec![make_row("manual-1", "https://totally-unrelated.net")];
        let manual = BTreeSet::from(["manual-1".to_owned()]);
        let linked = link_rows(brand_id(), "https://example.com", &rows, &manual);
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].match_method, MatchMethod::Manual);
        assert_eq!(linked[0].match_confidence, MatchConfidence::Manual);
    }

    #[test]
    fn brand_may_link_to_many_rows() {
        let rows = vec![
            make_row("a", "https://example.com"),
            make_row("b", "https://example.com/pricing"),
            make_row("c", "https://elsewhere.io"),
        ];
        let linked = link_rows(brand_id(), "https://example.com", &rows, &BTreeSet::new());
        let ids: Vec<&str> = linked.iter().map(|l| l.external_row_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn linked_entities_carry_brand_id() {
        let entity = link_one("https://example.com", "https://example.com").unwrap();
        assert_eq!(entity.brand_id, brand_id());
        assert_eq!(entity.external_row_id, "row-1");
    }
}
