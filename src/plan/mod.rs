//! Plan document model.
//!
//! This module holds the in-memory form of a Terraform plan: the untyped
//! attribute values and the change and drift records that carry them.

mod document;
mod value;

pub use document::{
    ChangeAction, ChangeRecord, PlanDocument, RESOURCE_CHANGES_KEY, RESOURCE_DRIFT_KEY,
};
pub use value::{AttrValue, Attributes};
