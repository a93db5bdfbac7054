use super::*;

pub fn run(args: ValidateArgs) -> Result<()> {
    let schema = match &args.schema_path {
        Some(path) => SchemaDescriptor::load(path)?,
        None => SchemaDescriptor::incident(),
    };
    if schema.kind_of("incident_id").is_none() {
        warn!(
            schema = %schema.title(),
            "schema does not declare incident_id; findings still link by record value"
        );
    }

    let kind_policy = resolve_kind_policy(
        args.kind_policy,
        std::env::var(KIND_POLICY_ENV).ok().as_deref(),
    );
    let links = DiscoverLinks::new(args.discover_base.clone());

    let mut snapshot = load_snapshot(
        &args.snapshot,
        LoadOptions {
            include_flagged: args.include_flagged,
        },
    )?;
    snapshot.retain_incidents(&args.incidents);
    let snapshot_sha256 = sha256_file(&args.snapshot)?;

    info!(
        path = %args.snapshot.display(),
        incidents = snapshot.groups.len(),
        reports = snapshot.report_count(),
        flagged_dropped = snapshot.flagged_reports_dropped,
        empty_groups_dropped = snapshot.empty_groups_dropped,
        schema = %schema.title(),
        fields = schema.fields().len(),
        kind_policy = kind_policy.as_str(),
        "loaded snapshot"
    );

    let validator = ReportValidator::new(&schema, kind_policy);
    let incidents = validate_groups(&mut snapshot.groups, &validator, &links);

    let mut summary = summarize_findings(&incidents);
    summary.flagged_reports_dropped = snapshot.flagged_reports_dropped;

    for (kind, count) in &summary.by_kind {
        info!(kind = kind.as_str(), count = *count, "violations by kind");
    }
    info!(
        incidents = summary.incident_count,
        reports = summary.report_count,
        incidents_with_findings = summary.incidents_with_findings,
        violations = summary.violation_count,
        "validation completed"
    );

    let danger_count = summary.danger_count();
    let report = ValidationReport {
        report_version: REPORT_VERSION,
        generated_at: now_utc_string(),
        snapshot_path: args.snapshot.display().to_string(),
        snapshot_sha256,
        schema_title: schema.title().to_string(),
        kind_policy,
        summary,
        incidents,
    };

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote validation report");
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_listing(&report.incidents)),
        OutputFormat::Json => println!("{}", to_json_pretty(&report)?),
    }

    if args.fail_on_violations && danger_count > 0 {
        bail!("{danger_count} danger-level violations found");
    }

    Ok(())
}
