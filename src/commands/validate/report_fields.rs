use super::*;

const OBJECT_ID_HEX_LEN: usize = 24;

/// Checks one report against a schema. Only schema-declared fields are
/// examined, in declaration order, and each yields at most one violation.
pub struct ReportValidator<'a> {
    schema: &'a SchemaDescriptor,
    policy: KindPolicy,
}

impl<'a> ReportValidator<'a> {
    pub fn new(schema: &'a SchemaDescriptor, policy: KindPolicy) -> Self {
        Self { schema, policy }
    }

    pub fn validate(&self, record: &ReportRecord, links: &DiscoverLinks) -> Vec<Violation> {
        let mut violations = Vec::new();

        for spec in self.schema.fields() {
            let value = record.get(&spec.name);
            let problem = match value {
                None => Some(ProblemKind::NotInSchema),
                Some(value) => self.classify(spec.kind, value),
            };

            if let Some(problem) = problem {
                violations.push(Violation::field_level(
                    problem,
                    &spec.name,
                    value,
                    IncidentRef::for_record(record, links),
                ));
            }
        }

        violations
    }

    /// Problem with a present value, if any.
    pub fn classify(&self, kind: FieldKind, value: &Value) -> Option<ProblemKind> {
        match kind {
            FieldKind::String => (!value.is_string()).then_some(ProblemKind::NotString),
            FieldKind::Int => (!value.is_number()).then_some(ProblemKind::NotNumber),
            FieldKind::Array => match value.as_array() {
                Some(items) if !items.is_empty() => None,
                _ => Some(ProblemKind::EmptyOrNotArray),
            },
            FieldKind::Bool => match self.policy {
                KindPolicy::Literal => None,
                // `flag` is nullable in the export.
                KindPolicy::Strict => {
                    (!(value.is_boolean() || value.is_null())).then_some(ProblemKind::NotBoolean)
                }
            },
            FieldKind::ObjectId => match self.policy {
                KindPolicy::Literal => None,
                KindPolicy::Strict => (!is_object_id(value)).then_some(ProblemKind::NotObjectId),
            },
        }
    }
}

/// The flag wins; otherwise the environment value, otherwise `literal`.
pub fn resolve_kind_policy(flag: Option<KindPolicy>, env_value: Option<&str>) -> KindPolicy {
    match flag {
        Some(policy) => policy,
        None => parse_kind_policy(env_value),
    }
}

pub fn parse_kind_policy(raw: Option<&str>) -> KindPolicy {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("strict") => KindPolicy::Strict,
        Some("literal") | Some("") | None => KindPolicy::Literal,
        Some(other) => {
            warn!(
                env = KIND_POLICY_ENV,
                value = other,
                "unknown kind policy, using literal"
            );
            KindPolicy::Literal
        }
    }
}

/// A 24-digit hex string, or the extended-JSON form `{"$oid": "..."}`.
pub fn is_object_id(value: &Value) -> bool {
    match value {
        Value::String(text) => is_object_id_hex(text),
        Value::Object(fields) if fields.len() == 1 => fields
            .get("$oid")
            .and_then(Value::as_str)
            .map(is_object_id_hex)
            .unwrap_or(false),
        _ => false,
    }
}

fn is_object_id_hex(text: &str) -> bool {
    text.len() == OBJECT_ID_HEX_LEN && text.chars().all(|ch| ch.is_ascii_hexdigit())
}
