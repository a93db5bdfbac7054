use super::*;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

/// Parses the ISO-like dates found in report exports. Values without an
/// offset are read as UTC; date-only values resolve to midnight UTC, and the
/// reduced forms `YYYY-MM` and `YYYY` resolve to the first day of the period.
pub fn parse_report_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    let naive = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .unwrap_or(trimmed);
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(parsed.and_utc());
        }
    }

    parse_calendar_date(trimmed)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    match text.len() {
        7 => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok(),
        4 if text.chars().all(|ch| ch.is_ascii_digit()) => text
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        _ => None,
    }
}

/// Most recent parseable `date_published` in the group.
pub fn latest_publication(group: &IncidentGroup) -> Option<DateTime<Utc>> {
    group
        .reports()
        .iter()
        .filter_map(|record| record.date_published().and_then(parse_report_date))
        .max()
}

pub fn group_incident_date(group: &IncidentGroup) -> Option<DateTime<Utc>> {
    group
        .representative()
        .incident_date()
        .and_then(Value::as_str)
        .and_then(parse_report_date)
}

/// True when even the latest publication predates the incident.
pub fn publication_precedes_incident(group: &IncidentGroup) -> bool {
    match (latest_publication(group), group_incident_date(group)) {
        (Some(latest), Some(incident)) => latest < incident,
        _ => false,
    }
}

pub fn incident_dates_disagree(group: &IncidentGroup) -> bool {
    let expected = group.representative().incident_date();
    group
        .reports()
        .iter()
        .any(|record| record.incident_date() != expected)
}

pub fn check_group_consistency(group: &IncidentGroup, links: &DiscoverLinks) -> Vec<Violation> {
    let mut violations = Vec::new();

    if publication_precedes_incident(group) {
        violations.push(Violation::group_level(
            ProblemKind::PublicationBeforeIncident,
            IncidentRef::for_group(group, links),
        ));
    }

    if incident_dates_disagree(group) {
        violations.push(Violation::group_level(
            ProblemKind::IncidentDateMismatch,
            IncidentRef::for_group(group, links),
        ));
    }

    violations
}
