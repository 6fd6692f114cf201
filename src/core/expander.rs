use regex::Regex;
use std::collections::HashSet;

/// Ranges wider than this fall back to literal treatment, so a typo like
/// "A1-A999999" cannot blow up the batch.
const MAX_RANGE_SPAN: u64 = 1000;

/// Expands one hybrid SKU field value into literal SKU tokens.
///
/// Accepted shapes, per comma-separated segment:
///   - "AB001 - AB009 - AB017"  -> split on " - ", each token literal
///   - "AB001-AB010"            -> numeric range, zero-padded to the
///                                 start token's digit width
///   - anything else            -> the segment itself, verbatim
///
/// Never fails: malformed or ambiguous input degrades to the literal
/// segment. The backend rejects SKUs that do not exist.
pub fn expand_hybrid_sku(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for segment in trimmed.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        for token in expand_segment(segment) {
            if seen.insert(token.clone()) {
                out.push(token);
            }
        }
    }
    out
}

/// Applies [`expand_hybrid_sku`] across a whole selection and de-duplicates
/// globally, first-seen order.
pub fn expand_selection(selected: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for raw in selected {
        for token in expand_hybrid_sku(raw) {
            if seen.insert(token.clone()) {
                out.push(token);
            }
        }
    }
    out
}

fn expand_segment(segment: &str) -> Vec<String> {
    // " - " separated lists win over range syntax
    if segment.contains(" - ") {
        return segment
            .split(" - ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
    }

    if let Some(expanded) = try_expand_range(segment) {
        return expanded;
    }

    vec![segment.to_string()]
}

/// Returns `None` whenever the segment is not a valid range, so the caller
/// falls through to literal treatment of the whole segment.
fn try_expand_range(segment: &str) -> Option<Vec<String>> {
    // Letter prefix is optional: "1-5" is a valid range with an empty
    // prefix, matching how purely numeric SKUs are entered.
    let re = Regex::new(r"^([A-Za-z]*)(\d+)-([A-Za-z]*)(\d+)$").unwrap();
    let caps = re.captures(segment)?;

    let prefix = caps.get(1).map_or("", |m| m.as_str());
    let end_prefix = caps.get(3).map_or("", |m| m.as_str());
    if prefix != end_prefix {
        return None;
    }

    let start_digits = &caps[2];
    let start: u64 = start_digits.parse().ok()?;
    let end: u64 = caps[4].parse().ok()?;

    // start == end is not a range; padding width comes from the start token
    if start >= end || end - start > MAX_RANGE_SPAN {
        return None;
    }

    let width = start_digits.len();
    Some(
        (start..=end)
            .map(|n| format!("{}{:0width$}", prefix, n, width = width))
            .collect(),
    )
}
