//! Entity trait: records identified by id rather than by their field values.

/// Stock records are replaced wholesale on every change; the id is what ties
/// a new snapshot to the one it supersedes.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// True when `other` is a snapshot of the same entity, whatever its state.
    fn is_same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// First entity in `entities` carrying `id`.
pub fn find_by_id<'a, E: Entity>(entities: &'a [E], id: &E::Id) -> Option<&'a E> {
    entities.iter().find(|e| e.id() == id)
}

/// Put `entity` in place of the snapshot with the same id, or append it.
///
/// Returns `true` when an existing snapshot was replaced.
pub fn upsert<E: Entity>(entities: &mut Vec<E>, entity: E) -> bool {
    match entities.iter_mut().find(|e| e.is_same_entity(&entity)) {
        Some(slot) => {
            *slot = entity;
            true
        }
        None => {
            entities.push(entity);
            false
        }
    }
}
