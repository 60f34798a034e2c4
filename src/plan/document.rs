//! Plan document loading.
//!
//! A plan document is read best-effort: only a non-object top level is fatal.
//! Lists that are missing or of the wrong type are read as empty, list entries
//! that are not objects are skipped, and fields of the wrong type are treated
//! as absent.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{InputError, Result, VisualizerError};

use super::value::{AttrValue, Attributes};

/// Top-level key holding the planned resource changes.
pub const RESOURCE_CHANGES_KEY: &str = "resource_changes";

/// Top-level key holding the observed drift.
pub const RESOURCE_DRIFT_KEY: &str = "resource_drift";

/// Action assumed for a record whose action list is empty.
static DEFAULT_ACTION: ChangeAction = ChangeAction::NoOp;

/// A primitive action as it appears in a change record's `actions` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ChangeAction {
    /// The resource will be created.
    Create,
    /// A data source will be read.
    Read,
    /// The resource will be updated in place.
    Update,
    /// The resource will be destroyed.
    Delete,
    /// Nothing will happen.
    NoOp,
    /// An action this tool does not recognise.
    Other(String),
}

impl ChangeAction {
    /// Parses an action string. Unrecognised strings are kept verbatim.
    #[must_use]
    pub fn parse(action: &str) -> Self {
        match action {
            "create" => Self::Create,
            "read" => Self::Read,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "no-op" => Self::NoOp,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the action as written in plan documents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::NoOp => "no-op",
            Self::Other(other) => other,
        }
    }
}

impl From<ChangeAction> for String {
    fn from(action: ChangeAction) -> Self {
        action.as_str().to_string()
    }
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of `resource_changes` or `resource_drift`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    /// Resource address, unique within a document.
    pub address: String,
    /// Resource type (e.g. `aws_instance`), when present.
    pub resource_type: Option<String>,
    /// Primitive actions in document order. The first one is authoritative.
    pub actions: Vec<ChangeAction>,
    /// Prior state.
    pub before: Option<Attributes>,
    /// Planned state.
    pub after: Option<Attributes>,
    /// Marks which `after` fields are not known until apply.
    pub after_unknown: Option<Attributes>,
}

impl ChangeRecord {
    /// Creates a record with the given address and actions and no state.
    #[must_use]
    pub fn new(address: impl Into<String>, actions: Vec<ChangeAction>) -> Self {
        Self {
            address: address.into(),
            resource_type: None,
            actions,
            before: None,
            after: None,
            after_unknown: None,
        }
    }

    /// Sets the prior state.
    #[must_use]
    pub fn with_before(mut self, before: Attributes) -> Self {
        self.before = Some(before);
        self
    }

    /// Sets the planned state.
    #[must_use]
    pub fn with_after(mut self, after: Attributes) -> Self {
        self.after = Some(after);
        self
    }

    /// Sets the unknown-field markers.
    #[must_use]
    pub fn with_after_unknown(mut self, after_unknown: Attributes) -> Self {
        self.after_unknown = Some(after_unknown);
        self
    }

    /// Returns the authoritative action. An empty action list reads as no-op.
    #[must_use]
    pub fn authoritative_action(&self) -> &ChangeAction {
        self.actions.first().unwrap_or(&DEFAULT_ACTION)
    }

    /// Reads a record from a list entry.
    ///
    /// A missing `change` object or `change.actions` list yields `[no-op]`;
    /// non-string actions are skipped.
    #[must_use]
    pub fn from_json(entry: &Map<String, Value>) -> Self {
        let address = entry
            .get("address")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let resource_type = entry.get("type").and_then(Value::as_str).map(String::from);
        let change = entry.get("change").and_then(Value::as_object);

        let actions = change
            .and_then(|c| c.get("actions"))
            .and_then(Value::as_array)
            .map_or_else(
                || vec![ChangeAction::NoOp],
                |actions| {
                    actions
                        .iter()
                        .filter_map(Value::as_str)
                        .map(ChangeAction::parse)
                        .collect()
                },
            );

        let state = |key: &str| {
            change
                .and_then(|c| c.get(key))
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(k, v)| (k.clone(), AttrValue::from(v)))
                        .collect::<Attributes>()
                })
        };

        Self {
            address,
            resource_type,
            actions,
            before: state("before"),
            after: state("after"),
            after_unknown: state("after_unknown"),
        }
    }
}

/// A parsed plan document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanDocument {
    /// Plan format version, when present.
    pub format_version: Option<String>,
    /// Terraform version that produced the plan, when present.
    pub terraform_version: Option<String>,
    /// Planned resource changes in document order.
    pub resource_changes: Vec<ChangeRecord>,
    /// Observed drift in document order.
    pub resource_drift: Vec<ChangeRecord>,
}

impl PlanDocument {
    /// Loads a plan document from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not JSON, or not
    /// an object at the top level.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading plan from: {}", path.display());

        if !path.exists() {
            return Err(VisualizerError::Input(InputError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            VisualizerError::Input(InputError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })?;

        info!("Read {} bytes of plan data", content.len());
        Self::parse_str(&content)
    }

    /// Parses a plan document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or its top level is not an
    /// object.
    pub fn parse_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| VisualizerError::Input(InputError::parse(e.to_string())))?;
        Self::from_json(&value)
    }

    /// Reads a plan document from an already parsed JSON tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the top level is not an object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(root) = value.as_object() else {
            return Err(VisualizerError::Input(InputError::InvalidShape {
                found: json_kind(value).to_string(),
            }));
        };

        let document = Self {
            format_version: root
                .get("format_version")
                .and_then(Value::as_str)
                .map(String::from),
            terraform_version: root
                .get("terraform_version")
                .and_then(Value::as_str)
                .map(String::from),
            resource_changes: read_records(root, RESOURCE_CHANGES_KEY),
            resource_drift: read_records(root, RESOURCE_DRIFT_KEY),
        };

        debug!(
            "Parsed plan: {} resource changes, {} drift records",
            document.resource_changes.len(),
            document.resource_drift.len()
        );
        Ok(document)
    }
}

/// Name of a JSON value's type, for log and error messages.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Reads one of the record lists, degrading to empty when it is unusable.
fn read_records(root: &Map<String, Value>, key: &str) -> Vec<ChangeRecord> {
    match root.get(key) {
        None => {
            debug!("No '{key}' list in plan, treating as empty");
            Vec::new()
        }
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_object)
            .map(ChangeRecord::from_json)
            .collect(),
        Some(other) => {
            warn!(
                "'{key}' is a {} rather than a list, treating as empty",
                json_kind(other)
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_record() {
        let doc = PlanDocument::from_json(&json!({
            "format_version": "1.2",
            "terraform_version": "1.7.5",
            "resource_changes": [{
                "address": "aws_instance.web",
                "type": "aws_instance",
                "change": {
                    "actions": ["update"],
                    "before": {"ami": "ami-1"},
                    "after": {"ami": "ami-2"},
                    "after_unknown": {"id": true}
                }
            }]
        }))
        .expect("object document");

        assert_eq!(doc.terraform_version.as_deref(), Some("1.7.5"));
        assert_eq!(doc.resource_changes.len(), 1);
        assert!(doc.resource_drift.is_empty());

        let record = &doc.resource_changes[0];
        assert_eq!(record.address, "aws_instance.web");
        assert_eq!(record.resource_type.as_deref(), Some("aws_instance"));
        assert_eq!(record.authoritative_action(), &ChangeAction::Update);
        assert_eq!(
            record.before.as_ref().and_then(|b| b.get("ami")),
            Some(&AttrValue::String(String::from("ami-1")))
        );
        assert!(record.after_unknown.is_some());
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = PlanDocument::from_json(&json!([1, 2])).expect_err("array is rejected");
        assert!(matches!(
            err,
            VisualizerError::Input(InputError::InvalidShape { ref found }) if found == "list"
        ));
    }

    #[test]
    fn test_invalid_shape_names_json_type() {
        for (value, expected) in [
            (json!(null), "null"),
            (json!(true), "boolean"),
            (json!(3), "number"),
            (json!("plan"), "string"),
        ] {
            let err = PlanDocument::from_json(&value).expect_err("non-object is rejected");
            assert!(matches!(
                err,
                VisualizerError::Input(InputError::InvalidShape { ref found }) if found == expected
            ));
        }
    }

    #[test]
    fn test_malformed_lists_degrade_to_empty() {
        let doc = PlanDocument::from_json(&json!({
            "resource_changes": "nope",
            "resource_drift": {"address": "x"}
        }))
        .expect("object document");

        assert!(doc.resource_changes.is_empty());
        assert!(doc.resource_drift.is_empty());
    }

    #[test]
    fn test_missing_actions_default_to_noop() {
        let doc = PlanDocument::from_json(&json!({
            "resource_changes": [
                {"address": "a"},
                {"address": "b", "change": {"actions": []}},
                {"address": "c", "change": {"actions": [1, "delete"]}},
                "not an object"
            ]
        }))
        .expect("object document");

        let changes = &doc.resource_changes;
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].actions, vec![ChangeAction::NoOp]);
        assert!(changes[1].actions.is_empty());
        assert_eq!(changes[1].authoritative_action(), &ChangeAction::NoOp);
        assert_eq!(changes[2].actions, vec![ChangeAction::Delete]);
    }

    #[test]
    fn test_non_object_states_are_absent() {
        let doc = PlanDocument::from_json(&json!({
            "resource_changes": [{
                "address": "null_resource.x",
                "change": {"actions": ["create"], "before": null, "after": "oops"}
            }]
        }))
        .expect("object document");

        let record = &doc.resource_changes[0];
        assert!(record.before.is_none());
        assert!(record.after.is_none());
    }

    #[test]
    fn test_unknown_action_is_kept() {
        assert_eq!(
            ChangeAction::parse("forget"),
            ChangeAction::Other(String::from("forget"))
        );
        assert_eq!(ChangeAction::parse("no-op").as_str(), "no-op");
    }

    #[test]
    fn test_parse_str_rejects_invalid_json() {
        let err = PlanDocument::parse_str("{ not json").expect_err("invalid JSON");
        assert!(matches!(err, VisualizerError::Input(InputError::ParseError { .. })));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(
            file,
            r#"{{"resource_changes": [{{"address": "a.b", "change": {{"actions": ["create"]}}}}]}}"#
        )
        .expect("Failed to write plan");

        let doc = PlanDocument::load_file(file.path()).expect("Failed to load plan");
        assert_eq!(doc.resource_changes[0].address, "a.b");
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlanDocument::load_file("/nonexistent/plan.json").expect_err("missing file");
        assert!(err.is_usage_error());
    }
}
