//! Global entity index.
//!
//! One flat map across all domains, because "does this id exist anywhere"
//! must be a single O(1) check; domain scoping is a field on the entry, not
//! a map partition. Canonical paths are computed exactly once here, at
//! build time, and every later comparison reuses the cached value: a
//! single source of truth for the run.

use std::collections::HashMap;

use linkograph_model::{Domain, DomainRecords, PathTemplateRegistry};

use crate::findings::{Category, Finding};

/// What the validators need to know about one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntity {
    pub id: String,
    pub domain: Domain,
    pub canonical_path: String,
    pub display_name: String,
}

/// O(1) id → entity lookup for one validation run.
#[derive(Debug, Default)]
pub struct EntityIndex {
    entities: HashMap<String, IndexedEntity>,
}

impl EntityIndex {
    /// Merge the per-domain maps into the global index.
    ///
    /// Domains are visited in enum order and entity ids in sorted order, so
    /// on a cross-domain id collision the first occurrence deterministically
    /// wins and the later one is reported as a `duplicate_id` error.
    pub fn build(
        domains: &std::collections::BTreeMap<Domain, DomainRecords>,
        templates: &PathTemplateRegistry,
    ) -> (Self, Vec<Finding>) {
        let mut index = EntityIndex::default();
        let mut findings = Vec::new();

        for (&domain, records) in domains {
            for (id, entity) in records {
                if let Some(existing) = index.entities.get(id) {
                    findings.push(
                        Finding::new(
                            Category::DuplicateId,
                            format!(
                                "id `{id}` in {domain} already exists in {}",
                                existing.domain
                            ),
                        )
                        .with_source(id.clone()),
                    );
                    continue;
                }

                let canonical_path = templates.canonical_path(
                    domain,
                    entity.category_or_default(),
                    entity.subcategory_or_default(),
                    id,
                );
                index.entities.insert(
                    id.clone(),
                    IndexedEntity {
                        id: id.clone(),
                        domain,
                        canonical_path,
                        display_name: entity.display_name(id).to_string(),
                    },
                );
            }
        }

        tracing::debug!(entities = index.len(), "built entity index");
        (index, findings)
    }

    pub fn get(&self, id: &str) -> Option<&IndexedEntity> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
