use serde_json::Value;

use crate::{RawSchemeDetail, SchemeDetail};

/// Raw provider keys, in [`SchemeDetail`] field order.
const DETAIL_KEYS: [&str; 7] = [
    "fund_house",
    "scheme_type",
    "scheme_category",
    "scheme_code",
    "scheme_name",
    "scheme_start_date",
    "nav",
];

/// Projects a raw record onto the display schema. Missing or `null` fields
/// become [`SchemeDetail::NOT_AVAILABLE`]; present values are not validated.
pub fn project_detail(raw: &RawSchemeDetail) -> SchemeDetail {
    let field = |key: &str| {
        raw.get(key)
            .and_then(display_value)
            .unwrap_or_else(|| String::from(SchemeDetail::NOT_AVAILABLE))
    };

    let [fund_house, scheme_type, scheme_category, scheme_code, scheme_name, start_date, nav] =
        DETAIL_KEYS;

    SchemeDetail {
        fund_house: field(fund_house),
        scheme_type: field(scheme_type),
        scheme_category: field(scheme_category),
        scheme_code: field(scheme_code),
        scheme_name: field(scheme_name),
        scheme_start_date: field(start_date),
        nav_value: field(nav),
    }
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_is_all_fallbacks() {
        let detail = project_detail(&RawSchemeDetail::new());
        for (_, value) in detail.rows() {
            assert_eq!(value, SchemeDetail::NOT_AVAILABLE);
        }
    }

    #[test]
    fn numbers_and_objects_are_rendered_as_json_text() {
        let raw: RawSchemeDetail = [
            ("scheme_code", json!(119551)),
            ("scheme_start_date", json!({ "date": "01-01-2013", "nav": "10.0" })),
            ("nav", Value::Null),
        ]
        .into_iter()
        .collect();

        let detail = project_detail(&raw);
        assert_eq!(detail.scheme_code, "119551");
        assert_eq!(detail.scheme_start_date, r#"{"date":"01-01-2013","nav":"10.0"}"#);
        assert_eq!(detail.nav_value, SchemeDetail::NOT_AVAILABLE);
    }

    #[test]
    fn malformed_nav_passes_through() {
        let raw: RawSchemeDetail = [("nav", json!("12,34"))].into_iter().collect();
        assert_eq!(project_detail(&raw).nav_value, "12,34");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw: RawSchemeDetail = [("isin_growth", json!("INF000000000"))]
            .into_iter()
            .collect();
        let detail = project_detail(&raw);
        assert!(detail
            .rows()
            .iter()
            .all(|(_, value)| *value == SchemeDetail::NOT_AVAILABLE));
    }
}
