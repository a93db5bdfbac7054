use super::*;

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub report_version: u32,
    pub generated_at: String,
    pub snapshot_path: String,
    pub snapshot_sha256: String,
    pub schema_title: String,
    pub kind_policy: KindPolicy,
    pub summary: ValidationSummary,
    pub incidents: Vec<IncidentFindings>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub incident_count: usize,
    pub report_count: usize,
    pub incidents_with_findings: usize,
    pub flagged_reports_dropped: usize,
    pub violation_count: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_kind: BTreeMap<ProblemKind, usize>,
}

impl ValidationSummary {
    pub fn danger_count(&self) -> usize {
        self.by_severity
            .get(&Severity::Danger)
            .copied()
            .unwrap_or(0)
    }
}

pub fn summarize_findings(findings: &[IncidentFindings]) -> ValidationSummary {
    let mut summary = ValidationSummary {
        incident_count: findings.len(),
        report_count: findings.iter().map(|incident| incident.report_count).sum(),
        incidents_with_findings: findings
            .iter()
            .filter(|incident| incident.has_violations())
            .count(),
        ..ValidationSummary::default()
    };

    for violation in findings.iter().flat_map(|incident| &incident.violations) {
        summary.violation_count += 1;
        *summary.by_severity.entry(violation.severity).or_insert(0) += 1;
        *summary.by_kind.entry(violation.kind).or_insert(0) += 1;
    }

    summary
}
