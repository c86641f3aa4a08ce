//! Internal helpers for name normalization.
//!
//! Display names keep their casing but lose redundant whitespace. Uniqueness
//! checks run on a folded key so "José" and "jose" collide.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Trim and collapse inner whitespace, keeping the original casing.
pub(crate) fn normalize_display_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut out = String::new();
    for token in trimmed.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Fold a name into its uniqueness key: NFKD, strip combining marks,
/// lowercase alphanumerics, collapse separators to single spaces.
pub(crate) fn normalize_name_key(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut prev_space = false;
    for ch in trimmed.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_collapses_whitespace() {
        assert_eq!(
            normalize_display_name("  Weekend   Trip "),
            Some("Weekend Trip".to_string())
        );
        assert_eq!(normalize_display_name("   "), None);
    }

    #[test]
    fn name_key_folds_case_and_accents() {
        assert_eq!(normalize_name_key("José"), Some("jose".to_string()));
        assert_eq!(normalize_name_key("ANNA  maria"), Some("anna maria".to_string()));
        assert_eq!(normalize_name_key("Jo-sé"), Some("jo se".to_string()));
    }

    #[test]
    fn name_key_rejects_symbol_only_input() {
        assert_eq!(normalize_name_key("!!!"), None);
    }
}
