//! Compact rendering of flexible types from their rendered bounds

const MUTABLE_COLLECTION: (&str, &str, &str) = (
    "kotlin.collections.Mutable",
    "kotlin.collections.",
    "kotlin.collections.(Mutable)",
);

const MUTABLE_ENTRY: (&str, &str, &str) = (
    "kotlin.collections.MutableMap.MutableEntry",
    "kotlin.collections.Map.Entry",
    "kotlin.collections.(Mutable)Map.(Mutable)Entry",
);

const ARRAY_VARIANCE: (&str, &str, &str) = ("kotlin.Array<", "kotlin.Array<out ", "kotlin.Array<(out) ");

/// Folds the rendered `lower` and `upper` bounds of a flexible type
///
/// Bounds differing only in nullability become `L!`, known mutability and
/// variance pairs fold into a marked prefix, and anything else is shown as
/// the range `(L..U)`.
pub fn fold_flexible(lower: &str, upper: &str) -> String {
    if differs_only_in_nullability(lower, upper) {
        return if upper.starts_with('(') {
            format!("({lower})!")
        } else {
            format!("{lower}!")
        };
    }

    for (lower_prefix, upper_prefix, folded) in [MUTABLE_ENTRY, MUTABLE_COLLECTION, ARRAY_VARIANCE] {
        if let Some(result) = replace_prefixes(lower, lower_prefix, upper, upper_prefix, folded) {
            return result;
        }
    }

    format!("({lower}..{upper})")
}

/// Whether `upper` is `lower` with nullability markers added
pub fn differs_only_in_nullability(lower: &str, upper: &str) -> bool {
    lower == upper.replace('?', "")
        || (upper.ends_with('?') && format!("{lower}?") == upper)
        || format!("({lower})?") == upper
}

fn replace_prefixes(
    lower: &str,
    lower_prefix: &str,
    upper: &str,
    upper_prefix: &str,
    folded_prefix: &str,
) -> Option<String> {
    let lower_rest = lower.strip_prefix(lower_prefix)?;
    let upper_rest = upper.strip_prefix(upper_prefix)?;
    if lower_rest == upper_rest {
        Some(format!("{folded_prefix}{lower_rest}"))
    } else if differs_only_in_nullability(lower_rest, upper_rest) {
        Some(format!("{folded_prefix}{lower_rest}!"))
    } else {
        None
    }
}
