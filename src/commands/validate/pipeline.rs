use super::*;

#[derive(Clone, Debug, Serialize)]
pub struct IncidentFindings {
    pub incident_id: Option<i64>,
    pub discover_url: String,
    pub report_count: usize,
    pub violations: Vec<Violation>,
}

impl IncidentFindings {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Sorts the groups, then emits per group: the date-order finding, the
/// incident-date agreement finding, then each report's field findings in
/// input order.
pub fn validate_groups(
    groups: &mut [IncidentGroup],
    validator: &ReportValidator<'_>,
    links: &DiscoverLinks,
) -> Vec<IncidentFindings> {
    sort_groups(groups);

    groups
        .iter()
        .map(|group| validate_group(group, validator, links))
        .collect()
}

pub fn validate_group(
    group: &IncidentGroup,
    validator: &ReportValidator<'_>,
    links: &DiscoverLinks,
) -> IncidentFindings {
    let mut violations = check_group_consistency(group, links);
    for record in group.reports() {
        violations.extend(validator.validate(record, links));
    }

    if !violations.is_empty() {
        debug!(
            incident_id = ?group.incident_id(),
            violations = violations.len(),
            "incident has findings"
        );
    }

    IncidentFindings {
        incident_id: group.incident_id(),
        discover_url: links.incident_url(group.representative()),
        report_count: group.len(),
        violations,
    }
}
