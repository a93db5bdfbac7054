use super::*;

/// Ascending by representative `incident_id`. Groups without a numeric id go
/// last and keep their input order.
pub fn sort_groups(groups: &mut [IncidentGroup]) {
    groups.sort_by(|left, right| compare_incident_ids(left.incident_id(), right.incident_id()));
}

pub fn compare_incident_ids(left: Option<i64>, right: Option<i64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
