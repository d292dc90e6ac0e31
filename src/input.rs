//! Input normalization adapter.
//!
//! Translates externally supplied JSON records into the canonical
//! domain types. Field names may be remapped per deployment via
//! `FieldMap`; values are parsed leniently, falling back to documented
//! sentinel defaults instead of aborting the run.
//!
//! # Date parsing
//!
//! Dates arrive either as a spreadsheet-epoch day count (OADate: days
//! since 1899-12-30, fractional part = time of day) or as text.
//! Accepted textual forms: RFC 3339, `%Y-%m-%dT%H:%M:%S`,
//! `%Y-%m-%d %H:%M:%S`, `%Y-%m-%d`, `%Y/%m/%d`.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use crate::error::PlanError;
use crate::models::{
    CalendarException, ResourceGroup, ResourceItem, WorkOrder, UNKNOWN_ORDER_ID,
};

/// OADate epoch: day zero of the spreadsheet date system.
fn oadate_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .expect("valid epoch date")
        .and_hms_opt(0, 0, 0)
        .expect("valid epoch time")
}

/// The canonical order fields the adapter knows how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    /// `OrderID`
    OrderId,
    /// `ProcessingTime`
    ProcessingTime,
    /// `DueDate`
    DueDate,
    /// `Priority`
    Priority,
    /// `ArrivalTime`
    ArrivalTime,
    /// `ResourceGroupID`
    ResourceGroupId,
}

impl CanonicalField {
    /// The canonical wire name, used when no mapping is configured.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::OrderId => "OrderID",
            Self::ProcessingTime => "ProcessingTime",
            Self::DueDate => "DueDate",
            Self::Priority => "Priority",
            Self::ArrivalTime => "ArrivalTime",
            Self::ResourceGroupId => "ResourceGroupID",
        }
    }
}

/// External-name mapping for order records.
///
/// Unmapped fields fall back to their canonical names, so an empty map
/// reads already-canonical input unchanged.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    mappings: HashMap<CanonicalField, String>,
}

impl FieldMap {
    /// Creates a map with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a canonical field to an external record key.
    pub fn with_mapping(mut self, field: CanonicalField, external: impl Into<String>) -> Self {
        self.mappings.insert(field, external.into());
        self
    }

    /// The record key to read for a canonical field.
    pub fn key_for(&self, field: CanonicalField) -> &str {
        self.mappings
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.canonical_name())
    }
}

/// Parses the raw order collection into canonical work orders.
///
/// Accepts either a JSON array value or a string containing one.
/// A null/absent collection is a batch-level error; individual bad
/// values inside records fall back to defaults (`OrderID` → `"N/A"`,
/// `ProcessingTime` → 0, `DueDate` → none, `Priority` → 1.0,
/// `ArrivalTime` → `now`, `ResourceGroupID` → empty).
pub fn normalize_orders(
    raw: &Value,
    map: &FieldMap,
    now: NaiveDateTime,
) -> Result<Vec<WorkOrder>, PlanError> {
    let records = record_list(raw)?;

    let orders = records
        .iter()
        .map(|record| {
            let order_id = get_string(record, map.key_for(CanonicalField::OrderId))
                .unwrap_or_else(|| UNKNOWN_ORDER_ID.to_string());
            let mut order = WorkOrder::new(order_id);
            order.processing_time =
                get_f64(record, map.key_for(CanonicalField::ProcessingTime)).unwrap_or(0.0);
            order.due_date = get_date(record, map.key_for(CanonicalField::DueDate));
            order.priority = get_f64(record, map.key_for(CanonicalField::Priority)).unwrap_or(1.0);
            order.arrival_time =
                get_date(record, map.key_for(CanonicalField::ArrivalTime)).unwrap_or(now);
            order.resource_group_id =
                get_string(record, map.key_for(CanonicalField::ResourceGroupId))
                    .unwrap_or_default();
            order
        })
        .collect();

    Ok(orders)
}

/// Parses the resource-group list. Null/absent input means no records.
pub fn normalize_groups(raw: &Value) -> Result<Vec<ResourceGroup>, PlanError> {
    if raw.is_null() {
        return Ok(Vec::new());
    }
    let records = record_list(raw)?;
    Ok(records
        .iter()
        .filter_map(|record| {
            let id = get_string(record, "ResourceGroupID")?;
            Some(ResourceGroup::new(id).with_efficiency(get_f64(record, "Efficiency").unwrap_or(1.0)))
        })
        .collect())
}

/// Parses the resource-unit roster. Null/absent input means no records.
pub fn normalize_items(raw: &Value) -> Result<Vec<ResourceItem>, PlanError> {
    if raw.is_null() {
        return Ok(Vec::new());
    }
    let records = record_list(raw)?;
    Ok(records
        .iter()
        .filter_map(|record| {
            let id = get_string(record, "ResourceID")?;
            let group_id = get_string(record, "ResourceGroupID").unwrap_or_default();
            let capacity = get_f64(record, "StandardCapacity").unwrap_or(0.0);
            Some(ResourceItem::new(id, group_id, capacity))
        })
        .collect())
}

/// Parses the calendar-exception list, truncating exception instants
/// to calendar days. Null/absent input means no records.
pub fn normalize_exceptions(raw: &Value) -> Result<Vec<CalendarException>, PlanError> {
    if raw.is_null() {
        return Ok(Vec::new());
    }
    let records = record_list(raw)?;
    Ok(records
        .iter()
        .filter_map(|record| {
            let resource_id = get_string(record, "ResourceID")?;
            let date = get_date(record, "ExceptionDate")?.date();
            let change = get_f64(record, "ChangeValue").unwrap_or(0.0);
            Some(CalendarException::new(resource_id, date, change))
        })
        .collect())
}

/// Resolves the raw collection into a list of JSON objects.
fn record_list(raw: &Value) -> Result<Vec<serde_json::Map<String, Value>>, PlanError> {
    let value = match raw {
        Value::Null => return Err(PlanError::MissingInput),
        Value::String(s) => serde_json::from_str::<Value>(s)?,
        other => other.clone(),
    };
    Ok(serde_json::from_value(value)?)
}

fn get_string(record: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn get_f64(record: &serde_json::Map<String, Value>, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn get_date(record: &serde_json::Map<String, Value>, key: &str) -> Option<NaiveDateTime> {
    parse_date_value(record.get(key)?)
}

/// Parses a date value in either OADate or textual form.
///
/// Returns `None` for nulls and unrecognized values; callers apply
/// their field's sentinel default.
pub fn parse_date_value(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => from_oadate(n.as_f64()?),
        Value::String(s) => parse_date_text(s),
        _ => None,
    }
}

/// Converts an OADate day count to a datetime.
pub fn from_oadate(oadate: f64) -> Option<NaiveDateTime> {
    if !oadate.is_finite() {
        return None;
    }
    let days = oadate.trunc() as i64;
    let day_seconds = (oadate.fract().abs() * 86_400.0).round() as i64;
    oadate_epoch()
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(day_seconds))
}

fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    debug!(value = trimmed, "unparseable date value, falling back to default");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        dt(2025, 6, 1, 8)
    }

    #[test]
    fn test_oadate_whole_days() {
        // 45000 days after 1899-12-30
        assert_eq!(from_oadate(45000.0), Some(dt(2023, 3, 15, 0)));
    }

    #[test]
    fn test_oadate_fractional_time() {
        assert_eq!(from_oadate(45000.5), Some(dt(2023, 3, 15, 12)));
    }

    #[test]
    fn test_text_date_formats() {
        assert_eq!(parse_date_text("2025-06-01"), Some(dt(2025, 6, 1, 0)));
        assert_eq!(parse_date_text("2025/06/01"), Some(dt(2025, 6, 1, 0)));
        assert_eq!(
            parse_date_text("2025-06-01 14:00:00"),
            Some(dt(2025, 6, 1, 14))
        );
        assert_eq!(
            parse_date_text("2025-06-01T14:00:00"),
            Some(dt(2025, 6, 1, 14))
        );
        assert_eq!(
            parse_date_text("2025-06-01T14:00:00+00:00"),
            Some(dt(2025, 6, 1, 14))
        );
        assert_eq!(parse_date_text("not a date"), None);
        assert_eq!(parse_date_text(""), None);
    }

    #[test]
    fn test_normalize_orders_canonical_names() {
        let raw = json!([{
            "OrderID": "WO-1",
            "ProcessingTime": 4.5,
            "DueDate": "2025-06-10",
            "Priority": 2.0,
            "ArrivalTime": "2025-06-01",
            "ResourceGroupID": "CNC",
        }]);
        let orders = normalize_orders(&raw, &FieldMap::new(), now()).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "WO-1");
        assert!((orders[0].processing_time - 4.5).abs() < 1e-10);
        assert_eq!(orders[0].due_date, Some(dt(2025, 6, 10, 0)));
        assert_eq!(orders[0].resource_group_id, "CNC");
    }

    #[test]
    fn test_normalize_orders_defaults() {
        let raw = json!([{}]);
        let orders = normalize_orders(&raw, &FieldMap::new(), now()).unwrap();
        let o = &orders[0];
        assert_eq!(o.order_id, "N/A");
        assert_eq!(o.processing_time, 0.0);
        assert!(o.due_date.is_none());
        assert!((o.priority - 1.0).abs() < 1e-10);
        assert_eq!(o.arrival_time, now());
        assert_eq!(o.resource_group_id, "");
    }

    #[test]
    fn test_normalize_orders_field_mapping() {
        let raw = json!([{
            "wo_no": "WO-9",
            "hours": 3.0,
            "deadline": 45000.0,
        }]);
        let map = FieldMap::new()
            .with_mapping(CanonicalField::OrderId, "wo_no")
            .with_mapping(CanonicalField::ProcessingTime, "hours")
            .with_mapping(CanonicalField::DueDate, "deadline");
        let orders = normalize_orders(&raw, &map, now()).unwrap();
        assert_eq!(orders[0].order_id, "WO-9");
        assert!((orders[0].processing_time - 3.0).abs() < 1e-10);
        assert_eq!(orders[0].due_date, Some(dt(2023, 3, 15, 0)));
    }

    #[test]
    fn test_normalize_orders_from_json_string() {
        let raw = Value::String("[{\"OrderID\": \"WO-1\"}]".to_string());
        let orders = normalize_orders(&raw, &FieldMap::new(), now()).unwrap();
        assert_eq!(orders[0].order_id, "WO-1");
    }

    #[test]
    fn test_normalize_orders_null_is_missing_input() {
        let result = normalize_orders(&Value::Null, &FieldMap::new(), now());
        assert!(matches!(result, Err(PlanError::MissingInput)));
    }

    #[test]
    fn test_normalize_orders_invalid_value_is_parse_error() {
        let result = normalize_orders(&json!({"not": "a list"}), &FieldMap::new(), now());
        assert!(matches!(result, Err(PlanError::Parse(_))));

        let bad_string = Value::String("not json".to_string());
        assert!(matches!(
            normalize_orders(&bad_string, &FieldMap::new(), now()),
            Err(PlanError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_date_falls_back_to_default() {
        let raw = json!([{"OrderID": "WO-1", "DueDate": "someday", "ArrivalTime": "tomorrow"}]);
        let orders = normalize_orders(&raw, &FieldMap::new(), now()).unwrap();
        assert!(orders[0].due_date.is_none());
        assert_eq!(orders[0].arrival_time, now());
    }

    #[test]
    fn test_normalize_groups_and_items() {
        let groups = normalize_groups(&json!([
            {"ResourceGroupID": "CNC", "Efficiency": 0.9},
            {"ResourceGroupID": "WELD"},
        ]))
        .unwrap();
        assert_eq!(groups.len(), 2);
        assert!((groups[0].efficiency - 0.9).abs() < 1e-10);
        assert!((groups[1].efficiency - 1.0).abs() < 1e-10);

        let items = normalize_items(&json!([
            {"ResourceID": "CNC-01", "ResourceGroupID": "CNC", "StandardCapacity": 8.0},
        ]))
        .unwrap();
        assert_eq!(items[0].group_id, "CNC");

        assert!(normalize_groups(&Value::Null).unwrap().is_empty());
        assert!(normalize_items(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_exceptions_truncates_time_of_day() {
        let exceptions = normalize_exceptions(&json!([
            {"ResourceID": "CNC-01", "ExceptionDate": "2025-06-02 14:30:00", "ChangeValue": -8.0},
        ]))
        .unwrap();
        assert_eq!(
            exceptions[0].date,
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        assert!((exceptions[0].change_value + 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_end_to_end_normalized_plan() {
        use crate::dispatching::RuleKind;
        use crate::scheduler::{PlanRequest, RccpScheduler};

        let orders = normalize_orders(
            &json!([
                {"OrderID": "B", "ProcessingTime": 6.0, "DueDate": "2025-06-02", "ResourceGroupID": "CNC"},
                {"OrderID": "A", "ProcessingTime": 6.0, "DueDate": "2025-06-05", "ResourceGroupID": "CNC"},
            ]),
            &FieldMap::new(),
            now(),
        )
        .unwrap();
        let groups = normalize_groups(&json!([{"ResourceGroupID": "CNC"}])).unwrap();
        let items = normalize_items(&json!([
            {"ResourceID": "CNC-01", "ResourceGroupID": "CNC", "StandardCapacity": 8.0},
        ]))
        .unwrap();

        let request = PlanRequest::new(orders, RuleKind::Edd)
            .with_groups(groups)
            .with_items(items)
            .with_plan_start(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        let planned = RccpScheduler::new().plan_at(request, now()).unwrap();

        // B is due first, takes day one; A slips to day two.
        let wire = serde_json::to_value(&planned).unwrap();
        assert_eq!(wire[0]["OrderID"], "B");
        assert_eq!(wire[0]["SequenceNo"], 1);
        assert_eq!(wire[0]["ScheduledDate"], "2025-06-02");
        assert_eq!(wire[0]["CapacityStatus"], "Scheduled");
        assert_eq!(wire[1]["OrderID"], "A");
        assert_eq!(wire[1]["ScheduledDate"], "2025-06-03");
        assert_eq!(wire[1]["IsOverdue"], false);
    }

    #[test]
    fn test_normalize_exceptions_skips_undated_records() {
        let exceptions = normalize_exceptions(&json!([
            {"ResourceID": "CNC-01", "ChangeValue": -8.0},
            {"ResourceID": "CNC-02", "ExceptionDate": "2025-06-02", "ChangeValue": 4.0},
        ]))
        .unwrap();
        assert_eq!(exceptions.len(), 1);
        assert_eq!(exceptions[0].resource_id, "CNC-02");
    }
}
