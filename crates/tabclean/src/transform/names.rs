//! Column label normalization.

/// Map a raw column label to a lowercase snake_case identifier.
///
/// Surrounding whitespace is trimmed, every character that is not
/// alphanumeric, `_` or whitespace becomes a space, and each whitespace run
/// collapses into a single underscore. Collisions are not resolved here:
/// `"Price ($)"` and `"Price (€)"` both become `price_`.
pub fn standardize_column_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_gap = false;

    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        let ch = if ch.is_alphanumeric() || ch == '_' || ch.is_whitespace() {
            ch
        } else {
            ' '
        };

        if ch.is_whitespace() {
            if !in_gap {
                out.push('_');
                in_gap = true;
            }
        } else {
            out.push(ch);
            in_gap = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_basic() {
        assert_eq!(standardize_column_name("Full Name"), "full_name");
        assert_eq!(standardize_column_name("  Email Address  "), "email_address");
        assert_eq!(standardize_column_name("Amount (USD)"), "amount_usd_");
        assert_eq!(standardize_column_name("first-name"), "first_name");
        assert_eq!(standardize_column_name("a   b\tc"), "a_b_c");
    }

    #[test]
    fn test_standardize_keeps_underscores() {
        assert_eq!(standardize_column_name("already_clean"), "already_clean");
        assert_eq!(standardize_column_name("a__b"), "a__b");
    }

    #[test]
    fn test_standardize_collisions_not_resolved() {
        assert_eq!(
            standardize_column_name("Price ($)"),
            standardize_column_name("Price (€)")
        );
    }

    #[test]
    fn test_standardize_is_idempotent() {
        for raw in ["Full Name", "Amount (USD)", "#id", "  x y  ", "É Café"] {
            let once = standardize_column_name(raw);
            assert_eq!(standardize_column_name(&once), once, "raw: {raw:?}");
        }
    }

    #[test]
    fn test_standardize_symbols_only() {
        assert_eq!(standardize_column_name("#"), "_");
        assert_eq!(standardize_column_name(""), "");
    }
}
