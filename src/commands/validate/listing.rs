use super::*;

/// Plain-text listing: one heading per incident, one line per finding.
pub fn render_listing(findings: &[IncidentFindings]) -> String {
    let mut out = String::new();
    out.push_str(LISTING_TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(LISTING_TITLE.len()));
    out.push('\n');

    for incident in findings {
        let incident_label = incident
            .incident_id
            .map(|incident_id| incident_id.to_string())
            .unwrap_or_else(|| "undefined".to_string());

        out.push('\n');
        out.push_str(&format!(
            "Incident {incident_label} ({})\n",
            incident.discover_url
        ));

        for violation in &incident.violations {
            out.push_str(&render_violation_line(violation));
            out.push('\n');
        }
    }

    out
}

pub fn render_violation_line(violation: &Violation) -> String {
    let severity = violation.severity.as_str();
    match violation.field {
        Some(_) => format!(
            "  [{severity}] {} -> {}",
            violation.message, violation.reference.href
        ),
        None => format!("  [{severity}] {}", violation.message),
    }
}
