//! Request/response DTOs and JSON mapping helpers for the storefront API.

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::{Map, Value, json};

use quickorder_cart::{FailureEntry, OrderLine, SubmissionResult};
use quickorder_catalog::{AttributeSet, VariationRow};
use quickorder_core::{ProductId, VariationId};
use quickorder_infra::SessionCart;

use crate::widget::RenderedWidget;

/// A number as clients send it: JSON integer, float or numeric string.
/// Anything else deserializes as `Other` so one bad field never rejects the
/// whole body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    /// Integer value, truncating fractions toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawNumber::Int(n) => Some(*n),
            RawNumber::Float(f) => truncate(*f),
            RawNumber::Text(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| s.parse().ok().and_then(truncate))
            }
            RawNumber::Other(_) => None,
        }
    }

    /// Identifier reading: the sign is dropped; unusable input reads as 0.
    fn as_id(&self) -> u64 {
        self.as_i64().map_or(0, i64::unsigned_abs)
    }
}

fn truncate(f: f64) -> Option<i64> {
    // `as` saturates out-of-range floats.
    f.is_finite().then(|| f.trunc() as i64)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitItem {
    #[serde(default, alias = "variation_id")]
    pub variation_id: Option<RawNumber>,
    #[serde(default)]
    pub quantity: Option<RawNumber>,
}

impl SubmitItem {
    /// Items missing either field are ignored. An id that names no variation
    /// becomes an unresolved line; an unreadable quantity reads as 0 (skipped).
    fn to_line(&self) -> Option<OrderLine> {
        let raw_id = self.variation_id.as_ref()?.as_id();
        let quantity = self.quantity.as_ref()?.as_i64().unwrap_or(0);
        Some(match VariationId::new(raw_id) {
            Ok(variation_id) => OrderLine::new(variation_id, quantity),
            Err(_) => OrderLine::unresolved(quantity),
        })
    }
}

/// Add-to-cart request body.
///
/// Every field is read leniently: `items` that is not a list reads as empty,
/// and list entries that are not objects are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default, alias = "security_token", alias = "nonce")]
    pub security_token: Option<Value>,
    #[serde(default, alias = "product_id")]
    pub product_id: Option<RawNumber>,
    #[serde(default)]
    pub items: Value,
}

impl SubmitRequest {
    pub fn security_token(&self) -> &str {
        self.security_token
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn product_id(&self) -> Option<ProductId> {
        ProductId::new(self.product_id.as_ref()?.as_id()).ok()
    }

    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.items
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|item| SubmitItem::deserialize(item).ok())
            .filter_map(|item| item.to_line())
            .collect()
    }
}

/// Query string of the render endpoint. Values arrive as text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderQuery {
    #[serde(default, alias = "product_id")]
    pub product_id: Option<String>,
    #[serde(default, alias = "page_product_id")]
    pub page_product_id: Option<String>,
}

impl RenderQuery {
    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id.as_deref()?.parse().ok()
    }

    pub fn page_product_id(&self) -> Option<ProductId> {
        self.page_product_id.as_deref()?.parse().ok()
    }
}


// ─────────────────────────────────────────────────────────────────────────────
// JSON mapping helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn attributes_to_json(attributes: &AttributeSet) -> Value {
    let map: Map<String, Value> = attributes
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(map)
}

pub fn row_to_json(row: &VariationRow) -> Value {
    json!({
        "variationId": row.variation_id,
        "sku": row.sku,
        "model": row.model,
        "name": row.name,
        "fullName": row.full_name,
        "description": row.description,
        "attributes": attributes_to_json(&row.attributes),
        "stockQuantity": row.stock_quantity,
        "maxQuantity": row.max_quantity,
    })
}

pub fn widget_to_json(widget: &RenderedWidget) -> Value {
    let mut body = Map::new();
    body.insert("rendered".into(), json!(widget.context.widget_emitted));
    body.insert("assets".into(), json!(widget.context.assets()));
    body.insert("client".into(), json!(widget.client));

    if let Some(table) = &widget.table {
        body.insert("productId".into(), json!(table.product.id_typed()));
        body.insert("productName".into(), json!(table.product.name()));
        body.insert(
            "rows".into(),
            Value::Array(table.rows.iter().map(row_to_json).collect()),
        );
    }
    Value::Object(body)
}

fn failure_to_json(entry: &FailureEntry) -> Value {
    json!({
        // 0 marks a line whose id named no variation.
        "variationId": entry.variation_id.map_or(0, |id| id.get()),
        "reason": entry.reason.code(),
        "message": entry.reason.message(),
    })
}

pub fn failures_to_json(failures: &[FailureEntry]) -> Vec<Value> {
    failures.iter().map(failure_to_json).collect()
}

pub fn submission_to_json(result: &SubmissionResult) -> Value {
    json!({
        "ok": true,
        "message": result.message(),
        "addedCount": result.added_count,
        "failedCount": result.failed_count(),
        "failures": failures_to_json(&result.failures),
        "fragments": result.fragments,
    })
}

pub fn cart_to_json(cart: &SessionCart) -> Value {
    let lines: Vec<Value> = cart
        .lines()
        .iter()
        .map(|l| {
            json!({
                "key": l.key,
                "productId": l.product_id,
                "variationId": l.variation_id,
                "quantity": l.quantity,
                "attributes": attributes_to_json(&l.attributes),
                "updatedAt": l.updated_at,
            })
        })
        .collect();

    json!({
        "itemCount": cart.item_count(),
        "lines": lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_strings_and_snake_case_aliases() {
        let req: SubmitRequest = serde_json::from_value(json!({
            "nonce": "tok",
            "product_id": "100",
            "items": [
                { "variation_id": "101", "quantity": "2" },
                { "variationId": 103, "quantity": 1 },
            ]
        }))
        .unwrap();

        assert_eq!(req.security_token(), "tok");
        assert_eq!(req.product_id().map(|p| p.get()), Some(100));
        let lines = req.order_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], OrderLine::new(VariationId::new(101).unwrap(), 2));
    }

    #[test]
    fn items_missing_a_field_are_ignored() {
        let req: SubmitRequest = serde_json::from_value(json!({
            "productId": "abc",
            "items": [
                { "quantity": 2 },
                { "variationId": 101 },
                { "variationId": null, "quantity": 1 },
                { "variationId": 102, "quantity": 0 },
            ]
        }))
        .unwrap();

        assert_eq!(req.product_id(), None);
        assert_eq!(req.order_lines(), vec![OrderLine::new(VariationId::new(102).unwrap(), 0)]);
    }

    #[test]
    fn ids_naming_no_variation_become_unresolved_lines() {
        let req: SubmitRequest = serde_json::from_value(json!({
            "productId": -100,
            "items": [
                { "variationId": "x", "quantity": 1 },
                { "variationId": 0, "quantity": 1 },
                { "variationId": -5, "quantity": 1 },
            ]
        }))
        .unwrap();

        assert_eq!(req.product_id().map(|p| p.get()), Some(100));
        assert_eq!(
            req.order_lines(),
            vec![
                OrderLine::unresolved(1),
                OrderLine::unresolved(1),
                OrderLine::new(VariationId::new(5).unwrap(), 1),
            ]
        );
    }

    #[test]
    fn malformed_values_never_reject_the_body() {
        let req: SubmitRequest = serde_json::from_value(json!({
            "securityToken": 42,
            "productId": 100.0,
            "items": [
                { "variationId": 103, "quantity": 1.5 },
                { "variationId": 101, "quantity": "2.9" },
                { "variationId": 104, "quantity": { "n": 1 } },
                "not an item",
                { "variationId": 1e30, "quantity": -0.5 },
                { "variationId": 102, "quantity": 3 },
            ]
        }))
        .unwrap();

        assert_eq!(req.security_token(), "");
        assert_eq!(req.product_id().map(|p| p.get()), Some(100));
        let vid = |raw| VariationId::new(raw).unwrap();
        assert_eq!(
            req.order_lines(),
            vec![
                OrderLine::new(vid(103), 1),
                OrderLine::new(vid(101), 2),
                OrderLine::new(vid(104), 0),
                OrderLine::new(vid(i64::MAX as u64), 0),
                OrderLine::new(vid(102), 3),
            ]
        );
    }

    #[test]
    fn items_that_are_not_a_list_read_as_empty() {
        let req: SubmitRequest = serde_json::from_value(json!({
            "productId": 100,
            "items": { "variationId": 101, "quantity": 1 }
        }))
        .unwrap();

        assert!(req.order_lines().is_empty());
    }

    #[test]
    fn unresolved_failures_report_id_zero() {
        let entry = FailureEntry {
            variation_id: None,
            reason: quickorder_cart::FailureReason::InvalidVariation,
        };
        assert_eq!(
            failure_to_json(&entry),
            json!({ "variationId": 0, "reason": "invalid_variation", "message": "Invalid variation." })
        );
    }

    #[test]
    fn attributes_render_as_object() {
        let attrs = AttributeSet::from_pairs([("pa_size", "M8"), ("pa_model", "HB-8")]);
        assert_eq!(
            attributes_to_json(&attrs),
            json!({ "pa_size": "M8", "pa_model": "HB-8" })
        );
    }
}
