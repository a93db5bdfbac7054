use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::{debug, info, warn};

use crate::cli::{KindPolicy, OutputFormat, ValidateArgs};
use crate::model::{IncidentGroup, ReportRecord};
use crate::schema::{FieldKind, SchemaDescriptor};
use crate::util::{now_utc_string, sha256_file, to_json_pretty, write_json_pretty};

const REPORT_VERSION: u32 = 1;
const KIND_POLICY_ENV: &str = "INCIDENT_VALIDATE_KIND_POLICY";
const GRAPH_QUERY_ROOT: &str = "allMongodbAiidprodIncidents";
const LISTING_TITLE: &str = "Incident List";

mod violations;
mod snapshot;
mod ordering;
mod consistency;
mod report_fields;
mod pipeline;
mod summary;
mod listing;
mod run;

use self::violations::*;
use self::snapshot::*;
use self::ordering::*;
use self::consistency::*;
use self::report_fields::*;
use self::pipeline::*;
use self::summary::*;
use self::listing::*;

pub use self::run::run;
