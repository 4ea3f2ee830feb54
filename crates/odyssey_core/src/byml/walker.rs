//! Scenario traversal.
//!
//! Walks `BymlRoot/T192` → scenario entries → object lists → objects and
//! resolves every object node. Objects that fail to resolve are reported
//! as [`SkippedObject`]s and the walk carries on; only a missing scenario
//! root stops it.

use thiserror::Error;

use super::document::{XmlDocument, XmlNode};
use super::object::{object_id, resolve_object};
use super::schema::{BYML_ROOT, NAME_ATTR, SCENARIO_ROOT};
use super::types::{ObjectPosition, ResolvedObject, SkippedObject};

/// The document does not have the expected top-level shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("Document root <{root}> has no <BymlRoot> element")]
    MissingBymlRoot { root: String },

    #[error("<BymlRoot> has no scenario root <T192>")]
    MissingScenarioRoot,
}

/// One step of a walk: a resolved object or a skipped one.
pub type WalkItem = Result<ResolvedObject, SkippedObject>;

/// Lazy, document-ordered iterator over the objects of a scenario.
pub struct ObjectWalk<'a> {
    inner: Box<dyn Iterator<Item = WalkItem> + 'a>,
}

impl Iterator for ObjectWalk<'_> {
    type Item = WalkItem;

    fn next(&mut self) -> Option<WalkItem> {
        self.inner.next()
    }
}

/// Everything a walk produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalkOutcome {
    /// Resolved objects in document order
    pub objects: Vec<ResolvedObject>,

    /// Skipped objects in document order
    pub skipped: Vec<SkippedObject>,
}

impl WalkOutcome {
    /// Number of object nodes visited.
    pub fn total(&self) -> usize {
        self.objects.len() + self.skipped.len()
    }
}

/// Locate the scenario root container (`BymlRoot/T192`).
pub fn scenario_root(document: &XmlDocument) -> Result<&XmlNode, StructureError> {
    let byml_root = document
        .root
        .child(BYML_ROOT)
        .ok_or_else(|| StructureError::MissingBymlRoot {
            root: document.root.tag.clone(),
        })?;

    byml_root
        .child(SCENARIO_ROOT)
        .ok_or(StructureError::MissingScenarioRoot)
}

/// Start walking the objects of a scenario document.
///
/// Fails only if the scenario root is missing. Object-level failures are
/// yielded as `Err(SkippedObject)` items and logged.
pub fn walk(document: &XmlDocument) -> Result<ObjectWalk<'_>, StructureError> {
    let root = scenario_root(document)?;
    log::debug!("Scenario root has {} entries", root.children.len());

    let inner = root
        .children
        .iter()
        .enumerate()
        .flat_map(|(scenario, entry)| {
            entry.children.iter().enumerate().flat_map(move |(list, object_list)| {
                let list_name = list_name(object_list, scenario, list);
                object_list
                    .children
                    .iter()
                    .enumerate()
                    .map(move |(object, node)| {
                        let position = ObjectPosition {
                            scenario,
                            list,
                            object,
                        };
                        resolve_at(node, list_name, position)
                    })
            })
        });

    Ok(ObjectWalk {
        inner: Box::new(inner),
    })
}

/// Walk a scenario document and collect the results.
pub fn walk_all(document: &XmlDocument) -> Result<WalkOutcome, StructureError> {
    let mut outcome = WalkOutcome::default();

    for item in walk(document)? {
        match item {
            Ok(object) => outcome.objects.push(object),
            Err(skipped) => outcome.skipped.push(skipped),
        }
    }

    log::debug!(
        "Walked {} objects ({} skipped)",
        outcome.total(),
        outcome.skipped.len()
    );

    Ok(outcome)
}

/// Name of an object list. Unnamed lists group under the empty string.
fn list_name(object_list: &XmlNode, scenario: usize, list: usize) -> &str {
    match object_list.attr(NAME_ATTR) {
        Some(name) => name,
        None => {
            log::warn!(
                "Object list {} in scenario {} has no name, using \"\"",
                list,
                scenario
            );
            ""
        }
    }
}

fn resolve_at(node: &XmlNode, list_name: &str, position: ObjectPosition) -> WalkItem {
    match resolve_object(node, list_name) {
        Ok(object) => {
            log::debug!(
                "Resolved {} object {} ({})",
                object.list_name,
                object.id,
                object.model_name
            );
            Ok(object)
        }
        Err(error) => {
            let skipped = SkippedObject {
                list_name: list_name.to_string(),
                id: object_id(node).map(str::to_string),
                position,
                error,
            };
            log::warn!("Skipping {}", skipped);
            Err(skipped)
        }
    }
}
