use super::*;

#[derive(Copy, Clone, Debug, Default)]
pub struct LoadOptions {
    pub include_flagged: bool,
}

#[derive(Debug, Default)]
pub struct Snapshot {
    pub groups: Vec<IncidentGroup>,
    pub flagged_reports_dropped: usize,
    pub empty_groups_dropped: usize,
}

impl Snapshot {
    pub fn report_count(&self) -> usize {
        self.groups.iter().map(IncidentGroup::len).sum()
    }

    pub fn retain_incidents(&mut self, incident_ids: &[i64]) {
        if incident_ids.is_empty() {
            return;
        }
        let wanted = incident_ids.iter().copied().collect::<HashSet<i64>>();
        self.groups.retain(|group| {
            group
                .incident_id()
                .map(|incident_id| wanted.contains(&incident_id))
                .unwrap_or(false)
        });
    }
}

pub fn load_snapshot(path: &Path, options: LoadOptions) -> Result<Snapshot> {
    let raw =
        fs::read(path).with_context(|| format!("failed to read snapshot: {}", path.display()))?;
    let value: Value = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse snapshot: {}", path.display()))?;

    parse_snapshot(&value, options)
        .with_context(|| format!("invalid snapshot: {}", path.display()))
}

/// Accepts the data-graph query result, an array of groups (`{"edges": ...}`
/// or plain arrays of records), or a flat array of records.
pub fn parse_snapshot(value: &Value, options: LoadOptions) -> Result<Snapshot> {
    let raw_groups = collect_raw_groups(value)?;

    let mut snapshot = Snapshot::default();
    for (group_index, raw_group) in raw_groups.into_iter().enumerate() {
        if raw_group.is_empty() {
            bail!("group {group_index} has no reports");
        }

        let mut reports = Vec::with_capacity(raw_group.len());
        for (record_index, raw_record) in raw_group.into_iter().enumerate() {
            let Value::Object(fields) = raw_record else {
                bail!("group {group_index} record {record_index} is not a JSON object");
            };

            let record = ReportRecord::new(fields.clone());
            if record.is_flagged() && !options.include_flagged {
                snapshot.flagged_reports_dropped += 1;
                continue;
            }
            reports.push(record);
        }

        if reports.is_empty() {
            debug!(group = group_index, "all reports flagged, dropping group");
            snapshot.empty_groups_dropped += 1;
            continue;
        }

        snapshot.groups.push(IncidentGroup::new(reports)?);
    }

    Ok(snapshot)
}

fn collect_raw_groups(value: &Value) -> Result<Vec<Vec<&Value>>> {
    match value {
        Value::Object(root) => {
            let root = root.get("data").unwrap_or(value);
            let groups = root
                .get(GRAPH_QUERY_ROOT)
                .and_then(|query| query.get("group"))
                .and_then(Value::as_array)
                .with_context(|| format!("snapshot object has no {GRAPH_QUERY_ROOT}.group array"))?;

            groups
                .iter()
                .enumerate()
                .map(|(group_index, group)| edge_nodes(group_index, group))
                .collect()
        }
        Value::Array(items) => {
            let grouped = items.first().map(is_group_like).unwrap_or(false);
            if grouped {
                items
                    .iter()
                    .enumerate()
                    .map(|(group_index, group)| group_members(group_index, group))
                    .collect()
            } else {
                Ok(group_flat_records(items))
            }
        }
        _ => bail!("snapshot must be a JSON object or array"),
    }
}

fn is_group_like(value: &Value) -> bool {
    value.is_array() || value.get("edges").is_some()
}

fn group_members(group_index: usize, group: &Value) -> Result<Vec<&Value>> {
    match group {
        Value::Array(records) => Ok(records.iter().collect()),
        Value::Object(_) => edge_nodes(group_index, group),
        _ => bail!("group {group_index} is neither an array nor an edges object"),
    }
}

fn edge_nodes(group_index: usize, group: &Value) -> Result<Vec<&Value>> {
    let edges = group
        .get("edges")
        .and_then(Value::as_array)
        .with_context(|| format!("group {group_index} has no edges array"))?;

    edges
        .iter()
        .enumerate()
        .map(|(edge_index, edge)| {
            edge.get("node")
                .with_context(|| format!("group {group_index} edge {edge_index} has no node"))
        })
        .collect()
}

/// Groups by `incident_id`, keeping first-appearance order of incidents and
/// input order within each incident.
fn group_flat_records(records: &[Value]) -> Vec<Vec<&Value>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Value>> = Vec::new();

    for record in records {
        let key = record
            .get("incident_id")
            .map(Value::to_string)
            .unwrap_or_default();
        let position = *positions.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[position].push(record);
    }

    groups
}
