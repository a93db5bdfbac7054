use super::*;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Danger,
    Dark,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Dark => "dark",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    PublicationBeforeIncident,
    IncidentDateMismatch,
    NotInSchema,
    NotString,
    NotNumber,
    EmptyOrNotArray,
    NotBoolean,
    NotObjectId,
}

impl ProblemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PublicationBeforeIncident => "publication_before_incident",
            Self::IncidentDateMismatch => "incident_date_mismatch",
            Self::NotInSchema => "not_in_schema",
            Self::NotString => "not_string",
            Self::NotNumber => "not_number",
            Self::EmptyOrNotArray => "empty_or_not_array",
            Self::NotBoolean => "not_boolean",
            Self::NotObjectId => "not_object_id",
        }
    }

    /// Wording used inside messages. Group-level kinds carry a full sentence.
    pub fn label(self) -> &'static str {
        match self {
            Self::PublicationBeforeIncident => "Publication dates precede the incident date",
            Self::IncidentDateMismatch => "Incident Dates are not consistent",
            Self::NotInSchema => "not in schema",
            Self::NotString => "is not string",
            Self::NotNumber => "is not number",
            Self::EmptyOrNotArray => "is empty or not array",
            Self::NotBoolean => "is not boolean",
            Self::NotObjectId => "is not objectId",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::NotString => Severity::Dark,
            _ => Severity::Danger,
        }
    }
}

/// Builds deep links into the discover app.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscoverLinks {
    base: String,
}

impl DiscoverLinks {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn incident_url(&self, record: &ReportRecord) -> String {
        format!(
            "{}?incident_id={}",
            self.base,
            display_value(record.get("incident_id"))
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IncidentRef {
    pub incident_id: Option<i64>,
    pub report_number: Option<i64>,
    pub href: String,
}

impl IncidentRef {
    pub fn for_record(record: &ReportRecord, links: &DiscoverLinks) -> Self {
        Self {
            incident_id: record.incident_id(),
            report_number: record.report_number(),
            href: links.incident_url(record),
        }
    }

    pub fn for_group(group: &IncidentGroup, links: &DiscoverLinks) -> Self {
        Self {
            report_number: None,
            ..Self::for_record(group.representative(), links)
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Violation {
    pub severity: Severity,
    pub kind: ProblemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    pub reference: IncidentRef,
}

impl Violation {
    pub fn group_level(kind: ProblemKind, reference: IncidentRef) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            field: None,
            message: kind.label().to_string(),
            reference,
        }
    }

    pub fn field_level(
        kind: ProblemKind,
        field: &str,
        value: Option<&Value>,
        reference: IncidentRef,
    ) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            field: Some(field.to_string()),
            message: format!("{field} ({}): {}", kind.label(), display_value(value)),
            reference,
        }
    }
}

/// Text shown after a field-level message. Missing values read `undefined`,
/// arrays join their elements with commas so an empty array shows nothing.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => display_present(value),
    }
}

fn display_present(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => display_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_present(other),
            })
            .collect::<Vec<String>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Whole floats print without a trailing `.0`.
fn display_number(number: &Number) -> String {
    match number.as_f64() {
        Some(float)
            if number.is_f64() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 =>
        {
            (float as i64).to_string()
        }
        _ => number.to_string(),
    }
}
