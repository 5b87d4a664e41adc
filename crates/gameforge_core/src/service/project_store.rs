//! Project collection store.
//!
//! # Responsibility
//! - Hold the canonical list of projects for the app session.
//! - Mirror every mutation into the gateway as a full JSON snapshot.
//!
//! # Invariants
//! - Project ids are unique in the collection; item ids are unique in their
//!   project. Both hold for loaded data too (duplicates are re-keyed).
//! - In-memory state is authoritative: a failed write never rolls back the
//!   mutation, it is only reported through [`Mutation::persisted`].
//! - Lookup misses are no-ops and do not touch the gateway.

use crate::model::category::Category;
use crate::model::project::{new_id, NewProjectItem, Project, ProjectItem};
use crate::repo::kv_repo::{KeyValueStore, StorageError, StorageResult, PROJECTS_STORAGE_KEY};
use log::{debug, info, warn};
use std::collections::HashSet;

/// Result of a mutating store call.
///
/// `value` reflects the in-memory outcome; `persisted` reports the snapshot
/// write that followed it. Callers that do not care about durability may
/// ignore `persisted`.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub persisted: StorageResult<()>,
}

impl<T> Mutation<T> {
    fn untouched(value: T) -> Self {
        Self {
            value,
            persisted: Ok(()),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted.is_ok()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Single source of truth for user projects.
pub struct ProjectStore<S: KeyValueStore> {
    gateway: S,
    projects: Vec<Project>,
}

impl<S: KeyValueStore> ProjectStore<S> {
    /// Creates an empty store without reading the gateway.
    pub fn new(gateway: S) -> Self {
        Self {
            gateway,
            projects: Vec::new(),
        }
    }

    /// Creates a store and rehydrates it from the gateway.
    pub fn open(gateway: S) -> Self {
        let mut store = Self::new(gateway);
        store.load_all();
        store
    }

    /// Replaces in-memory state with the persisted snapshot.
    ///
    /// A missing key, a read failure or an undecodable snapshot all yield an
    /// empty collection; failures are logged and never surfaced.
    pub fn load_all(&mut self) -> &[Project] {
        self.projects = match self.gateway.get(PROJECTS_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Project>>(&raw) {
                Ok(projects) => {
                    let mut projects = projects;
                    let rekeyed = rekey_duplicate_ids(&mut projects);
                    info!(
                        "event=projects_load module=store status=ok count={} rekeyed={}",
                        projects.len(),
                        rekeyed
                    );
                    projects
                }
                Err(err) => {
                    warn!(
                        "event=projects_load module=store status=error error_code=decode_failed error={}",
                        err
                    );
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=projects_load module=store status=ok count=0 source=empty");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=projects_load module=store status=error error_code=read_failed error={}",
                    err
                );
                Vec::new()
            }
        };
        &self.projects
    }

    /// All projects in creation order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Pure lookup against in-memory state.
    pub fn get_project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == project_id)
    }

    /// Appends a new empty project and persists the snapshot.
    ///
    /// The returned project is usable immediately regardless of the write
    /// outcome. Names are not validated here.
    pub fn create_project(
        &mut self,
        name: impl Into<String>,
        category: Category,
        emoji: impl Into<String>,
    ) -> Mutation<Project> {
        let mut project = Project::new(name, category, emoji);
        while self.get_project(&project.id).is_some() {
            project.id = new_id();
        }
        self.projects.push(project.clone());
        debug!(
            "event=project_create module=store status=ok total={}",
            self.projects.len()
        );
        Mutation {
            value: project,
            persisted: self.persist(),
        }
    }

    /// Appends an item with a fresh id to the project.
    ///
    /// Returns `None` without writing when the project does not exist.
    pub fn add_item(
        &mut self,
        project_id: &str,
        item: NewProjectItem,
    ) -> Mutation<Option<ProjectItem>> {
        let Some(project) = self.project_mut(project_id) else {
            debug!("event=item_add module=store status=skipped reason=project_not_found");
            return Mutation::untouched(None);
        };

        let created = ProjectItem::from_new(item, &project.items);
        project.items.push(created.clone());
        Mutation {
            value: Some(created),
            persisted: self.persist(),
        }
    }

    /// Removes the project; `false` (and no write) when it does not exist.
    pub fn delete_project(&mut self, project_id: &str) -> Mutation<bool> {
        let before = self.projects.len();
        self.projects.retain(|project| project.id != project_id);
        if self.projects.len() == before {
            return Mutation::untouched(false);
        }
        Mutation {
            value: true,
            persisted: self.persist(),
        }
    }

    /// Removes one item, keeping the order of the rest.
    ///
    /// `false` (and no write) when the project or the item does not exist.
    pub fn remove_item(&mut self, project_id: &str, item_id: &str) -> Mutation<bool> {
        let Some(project) = self.project_mut(project_id) else {
            return Mutation::untouched(false);
        };
        let before = project.items.len();
        project.items.retain(|item| item.id != item_id);
        if project.items.len() == before {
            return Mutation::untouched(false);
        }
        Mutation {
            value: true,
            persisted: self.persist(),
        }
    }

    /// Gateway this store writes through.
    pub fn gateway(&self) -> &S {
        &self.gateway
    }

    fn project_mut(&mut self, project_id: &str) -> Option<&mut Project> {
        self.projects
            .iter_mut()
            .find(|project| project.id == project_id)
    }

    fn persist(&self) -> StorageResult<()> {
        let result = serde_json::to_string(&self.projects)
            .map_err(StorageError::from)
            .and_then(|snapshot| self.gateway.set(PROJECTS_STORAGE_KEY, &snapshot));
        if let Err(err) = &result {
            warn!(
                "event=projects_save module=store status=error count={} error={}",
                self.projects.len(),
                err
            );
        }
        result
    }
}

/// Assigns fresh ids to projects/items whose id repeats an earlier one.
///
/// Snapshots written by older builds used millisecond timestamps as ids and
/// may contain collisions. Returns the number of re-keyed records.
fn rekey_duplicate_ids(projects: &mut [Project]) -> usize {
    let mut rekeyed = 0;
    let mut project_ids = HashSet::new();
    for project in projects.iter_mut() {
        while !project_ids.insert(project.id.clone()) {
            project.id = new_id();
            rekeyed += 1;
        }

        let mut item_ids = HashSet::new();
        for item in project.items.iter_mut() {
            while !item_ids.insert(item.id.clone()) {
                item.id = new_id();
                rekeyed += 1;
            }
        }
    }
    rekeyed
}

#[cfg(test)]
mod tests {
    use super::rekey_duplicate_ids;
    use crate::model::category::Category;
    use crate::model::project::{Project, ProjectItem};
    use crate::model::rarity::Rarity;

    fn item(id: &str) -> ProjectItem {
        ProjectItem {
            id: id.to_string(),
            name: "Steak".to_string(),
            emoji: "🥩".to_string(),
            stat: "+8 HP".to_string(),
            rarity: Rarity::Common,
            category: Category::Food,
        }
    }

    #[test]
    fn rekey_leaves_unique_ids_alone() {
        let mut first = Project::new("A", Category::Food, "🍖");
        first.items = vec![item("1"), item("2")];
        let second = Project::new("B", Category::Food, "🍖");
        let mut projects = vec![first.clone(), second.clone()];

        assert_eq!(rekey_duplicate_ids(&mut projects), 0);
        assert_eq!(projects, vec![first, second]);
    }

    #[test]
    fn rekey_fixes_colliding_timestamp_ids() {
        let mut first = Project::new("A", Category::Food, "🍖");
        first.id = "1700000000000".to_string();
        first.items = vec![item("1700000000001"), item("1700000000001")];
        let mut second = first.clone();
        second.name = "B".to_string();
        let mut projects = vec![first, second];

        assert_eq!(rekey_duplicate_ids(&mut projects), 3);
        assert_eq!(projects[0].id, "1700000000000");
        assert_ne!(projects[1].id, projects[0].id);
        assert_eq!(projects[0].items[0].id, "1700000000001");
        assert_ne!(projects[0].items[1].id, projects[0].items[0].id);
        assert_eq!(projects[1].name, "B");
    }
}
