//! Relation hydration over many-to-many join tables.
//!
//! Hydration runs in two dependent stages. First the join rows for every
//! owner id are fetched, then exactly the referenced lookup entities. When
//! two relations are loaded together (a tool's categories and tags) each
//! stage is issued for both relations concurrently before moving on.
//!
//! The backend is reached only through [`RelationSource`], so the whole
//! pipeline can be exercised with in-memory sources.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use futures::join;

use crate::error::CoreError;
use crate::relations::RelatedEntity;
use crate::types::DbId;

/// One row of a join table such as `tool_tags (tool_id, tag_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinRow {
    pub owner_id: DbId,
    pub related_id: DbId,
}

/// Owner id -> related entities, in join-row order.
pub type RelationMap<T> = HashMap<DbId, Vec<T>>;

/// A join table plus the lookup table it points into.
#[async_trait]
pub trait RelationSource: Send + Sync {
    type Entity: RelatedEntity + Clone + Send + Sync;

    /// Join rows whose owner id is in `owner_ids`.
    async fn join_rows(&self, owner_ids: &[DbId]) -> Result<Vec<JoinRow>, CoreError>;

    /// Lookup entities with the given ids. Never called with an empty slice.
    async fn lookup(&self, ids: &[DbId]) -> Result<Vec<Self::Entity>, CoreError>;
}

/// Distinct related ids in order of first appearance.
pub fn distinct_related_ids(rows: &[JoinRow]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .map(|row| row.related_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Group looked-up entities by owner, dropping ids with no matching entity.
pub fn assemble<T: RelatedEntity + Clone>(rows: &[JoinRow], entities: Vec<T>) -> RelationMap<T> {
    let by_id: HashMap<DbId, T> = entities
        .into_iter()
        .map(|entity| (entity.entity_id(), entity))
        .collect();

    let mut grouped: RelationMap<T> = HashMap::new();
    for row in rows {
        if let Some(entity) = by_id.get(&row.related_id) {
            grouped
                .entry(row.owner_id)
                .or_default()
                .push(entity.clone());
        }
    }
    grouped
}

/// Look up the entities referenced by `rows`, skipping the query when there are none.
async fn lookup_referenced<S: RelationSource>(
    source: &S,
    rows: Option<&Vec<JoinRow>>,
) -> Result<Vec<S::Entity>, CoreError> {
    let Some(rows) = rows else {
        return Ok(Vec::new());
    };
    let ids = distinct_related_ids(rows);
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    source.lookup(&ids).await
}

/// Load a single relation for the given owners.
///
/// An empty `owner_ids` returns an empty map without touching the source.
pub async fn load_relation<S: RelationSource>(
    source: &S,
    owner_ids: &[DbId],
) -> Result<RelationMap<S::Entity>, CoreError> {
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = source.join_rows(owner_ids).await?;
    let entities = lookup_referenced(source, Some(&rows)).await?;
    Ok(assemble(&rows, entities))
}

/// Load two relations for the same owners, stage by stage.
///
/// Each relation fails independently: an error in one leaves the other
/// intact so the caller can degrade just the broken relation.
pub async fn load_relation_pair<A, B>(
    first: &A,
    second: &B,
    owner_ids: &[DbId],
) -> (
    Result<RelationMap<A::Entity>, CoreError>,
    Result<RelationMap<B::Entity>, CoreError>,
)
where
    A: RelationSource,
    B: RelationSource,
{
    if owner_ids.is_empty() {
        return (Ok(HashMap::new()), Ok(HashMap::new()));
    }

    let (first_rows, second_rows) = join!(first.join_rows(owner_ids), second.join_rows(owner_ids));

    let (first_entities, second_entities) = join!(
        lookup_referenced(first, first_rows.as_ref().ok()),
        lookup_referenced(second, second_rows.as_ref().ok()),
    );

    let first_map = first_rows.and_then(|rows| Ok(assemble(&rows, first_entities?)));
    let second_map = second_rows.and_then(|rows| Ok(assemble(&rows, second_entities?)));

    (first_map, second_map)
}
