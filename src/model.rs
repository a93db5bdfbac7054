use anyhow::{Result, bail};
use serde_json::{Map, Value};

/// One report as exported by the data graph. Fields are kept as raw JSON so
/// their runtime kinds can be checked against a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord(Map<String, Value>);

impl ReportRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Numeric strings such as `"12"` count as ids, so sorting, labels and
    /// filters agree with the discover link built from the raw value.
    pub fn incident_id(&self) -> Option<i64> {
        self.get("incident_id")
            .and_then(|value| integral_value(value).or_else(|| integral_string(value)))
    }

    pub fn report_number(&self) -> Option<i64> {
        self.get("report_number").and_then(integral_value)
    }

    pub fn incident_date(&self) -> Option<&Value> {
        self.get("incident_date")
    }

    pub fn date_published(&self) -> Option<&str> {
        self.get("date_published").and_then(Value::as_str)
    }

    /// A record counts as flagged when `flag` carries any non-null value.
    pub fn is_flagged(&self) -> bool {
        self.get("flag").map(|value| !value.is_null()).unwrap_or(false)
    }
}

fn integral_value(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }

    value
        .as_f64()
        .filter(|number| number.fract() == 0.0 && number.abs() < i64::MAX as f64)
        .map(|number| number as i64)
}

fn integral_string(value: &Value) -> Option<i64> {
    value
        .as_str()
        .and_then(|text| text.trim().parse::<i64>().ok())
}

/// All reports sharing one incident. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentGroup {
    reports: Vec<ReportRecord>,
}

impl IncidentGroup {
    pub fn new(reports: Vec<ReportRecord>) -> Result<Self> {
        if reports.is_empty() {
            bail!("incident group must contain at least one report");
        }
        Ok(Self { reports })
    }

    pub fn reports(&self) -> &[ReportRecord] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// The record whose `incident_id` and `incident_date` stand for the group.
    pub fn representative(&self) -> &ReportRecord {
        &self.reports[0]
    }

    pub fn incident_id(&self) -> Option<i64> {
        self.representative().incident_id()
    }
}
