//! Display fields derived from a variation (model label, name, description).

use crate::{AttributeSet, Variation};

/// Attribute keys that may carry the model label, tried in this order.
///
/// Catalogs have used bare, `attribute_`-prefixed and `pa_` (global taxonomy)
/// spellings over time.
pub const MODEL_ATTRIBUTE_KEYS: [&str; 4] = ["model", "attribute_model", "pa_model", "attribute_pa_model"];

/// Upper bound for the quantity input when stock is not counted.
pub const MAX_QUANTITY_FALLBACK: i64 = 9999;

/// Placeholder shown when a variation has neither a model nor a SKU.
pub const MISSING_LABEL: &str = "-";

const DESCRIPTION_WORD_LIMIT: usize = 15;
const ELLIPSIS: &str = "...";

/// Model column: first non-empty model attribute, then SKU, then `"-"`.
pub fn model_label(variation: &Variation) -> String {
    MODEL_ATTRIBUTE_KEYS
        .iter()
        .filter_map(|key| variation.attributes().get(key))
        .find(|value| !value.is_empty())
        .or_else(|| variation.sku())
        .unwrap_or(MISSING_LABEL)
        .to_string()
}

/// SKU column value, or `"-"` when the variation has none.
pub fn sku_label(variation: &Variation) -> String {
    variation.sku().unwrap_or(MISSING_LABEL).to_string()
}

/// Attribute values joined with `" - "`, falling back to the variation name.
pub fn display_name(variation: &Variation) -> String {
    let name = variation
        .attributes()
        .filled()
        .map(|(_, value)| value)
        .collect::<Vec<_>>()
        .join(" - ");

    if name.is_empty() {
        variation.name().to_string()
    } else {
        name
    }
}

/// Description column: trimmed description, then the specification field,
/// then a generated `"Label: value"` list.
pub fn description(variation: &Variation) -> String {
    let raw = variation.description().trim();
    if !raw.is_empty() {
        return trim_words(raw, DESCRIPTION_WORD_LIMIT);
    }

    if let Some(spec) = variation.specification().map(str::trim).filter(|s| !s.is_empty()) {
        return spec.to_string();
    }

    attribute_summary(variation.attributes())
}

/// `"Label: value"` pairs of the filled attributes, comma separated.
pub fn attribute_summary(attributes: &AttributeSet) -> String {
    attributes
        .filled()
        .map(|(name, value)| format!("{}: {}", attribute_label(name), value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human label for an attribute key (`attribute_pa_screw-size` -> `Screw size`).
pub fn attribute_label(key: &str) -> String {
    let bare = key.strip_prefix("attribute_").unwrap_or(key);
    let bare = bare.strip_prefix("pa_").unwrap_or(bare);
    let spaced = bare.replace(['-', '_'], " ");

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keep the first `limit` words, appending `"..."` when anything was dropped.
pub fn trim_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > limit {
        format!("{}{}", words[..limit].join(" "), ELLIPSIS)
    } else {
        words.join(" ")
    }
}

/// Upper bound for the quantity input of a row.
///
/// Not an authoritative check; submission re-reads live stock.
pub fn stock_ceiling(variation: &Variation) -> i64 {
    match variation.stock().quantity() {
        Some(q) if q > 0 => q,
        _ => MAX_QUANTITY_FALLBACK,
    }
}
