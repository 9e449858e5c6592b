//! Field readers shared by every upstream shape.
//!
//! Providers are loose about types (numbers as strings, ids as numbers,
//! photos as strings or objects), so every reader accepts the variants seen
//! in practice and treats anything else as absent.

use serde_json::Value;

/// Keys that hold a photo URL inside a photo object.
const PHOTO_URL_KEYS: [&str; 5] = ["url", "photo_url", "src", "image_url", "link"];

/// Reads a trimmed, non-empty string from a string or numeric value.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// First present text among `keys`.
pub(super) fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| raw.get(*k).and_then(as_text))
}

/// First present finite number among `keys`.
pub(super) fn first_f64(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| raw.get(*k).and_then(as_f64))
}

/// First present non-negative count among `keys`; tolerates `"1,204"`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn first_count(raw: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| {
        let value = raw.get(*k)?;
        match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().replace(',', "").parse::<u64>().ok(),
            _ => None,
        }
    })
}

/// Price tier from the first present price field.
///
/// Strings count currency symbols (`"$$"` is 2) and fall back to a plain
/// integer; numbers are rounded. Zero clamps up to 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn first_price_tier(raw: &Value, keys: &[&str]) -> Option<u8> {
    keys.iter().find_map(|k| {
        let tier = match raw.get(*k)? {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite() && *f >= 0.0)?.round(),
            Value::String(s) => {
                let symbols = s.chars().filter(|c| matches!(c, '$' | '€' | '£')).count();
                if symbols > 0 {
                    f64::from(u8::try_from(symbols).unwrap_or(u8::MAX))
                } else {
                    s.trim().parse::<f64>().ok().filter(|f| *f >= 0.0)?.round()
                }
            }
            _ => return None,
        };
        Some(tier.clamp(1.0, f64::from(u8::MAX)) as u8)
    })
}

/// A list of strings from an array field or a comma-separated string.
pub(super) fn string_list(raw: &Value, key: &str) -> Vec<String> {
    match raw.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(as_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn photo_url(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => as_text(value),
        Value::Object(_) => PHOTO_URL_KEYS
            .iter()
            .find_map(|k| value.get(*k).and_then(as_text)),
        _ => None,
    }
}

/// Ordered image candidates: every entry of each array field in
/// `array_keys`, then each single field in `single_keys`.
pub(super) fn image_candidates(
    raw: &Value,
    array_keys: &[&str],
    single_keys: &[&str],
) -> Vec<String> {
    let from_arrays = array_keys.iter().flat_map(|k| {
        raw.get(*k)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(photo_url).collect::<Vec<_>>())
            .unwrap_or_default()
    });
    let from_singles = single_keys
        .iter()
        .filter_map(|k| raw.get(*k).and_then(photo_url));
    from_arrays.chain(from_singles).collect()
}

/// Joins structured address parts as `street, city, state zip`, skipping
/// empty parts without leaving stray separators.
pub(super) fn join_address(
    street: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    zip: Option<&str>,
) -> Option<String> {
    fn clean(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }

    let region = match (clean(state), clean(zip)) {
        (Some(s), Some(z)) => Some(format!("{s} {z}")),
        (Some(s), None) => Some(s.to_string()),
        (None, Some(z)) => Some(z.to_string()),
        (None, None) => None,
    };

    let parts: Vec<String> = [
        clean(street).map(str::to_string),
        clean(city).map(str::to_string),
        region,
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Resolves a single-line address.
///
/// A structured object under `address` wins (its own `fullAddress` first,
/// then the joined parts); otherwise the first flat string in `flat_keys`.
pub(super) fn resolve_address(raw: &Value, flat_keys: &[&str]) -> Option<String> {
    if let Some(obj) = raw.get("address").filter(|v| v.is_object()) {
        let text = |keys: &[&str]| first_text(obj, keys);
        let structured = text(&["fullAddress", "full_address", "formatted"]).or_else(|| {
            join_address(
                text(&["street_addr", "street_address", "street", "address_line1"]).as_deref(),
                text(&["city", "locality"]).as_deref(),
                text(&["state", "region"]).as_deref(),
                text(&["zipcode", "zip", "postal_code"]).as_deref(),
            )
        });
        if structured.is_some() {
            return structured;
        }
    }
    first_text(raw, flat_keys)
}
