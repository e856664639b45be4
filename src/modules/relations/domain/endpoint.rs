/// Relation endpoints - the containers an entity holds for one side of a relation.
///
/// Endpoints only hand out copies of what they hold. The mutating methods are
/// crate-private so that nothing outside the relation protocol can change the
/// shape of the graph.
use serde::{Deserialize, Serialize};

/// Collection side of a relation (zero or more counterparts, no duplicates)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManyEndpoint<Id> {
    members: Vec<Id>,
}

impl<Id> Default for ManyEndpoint<Id> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<Id: Copy + Eq> ManyEndpoint<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A freshly allocated copy of the members, in insertion order
    pub fn snapshot(&self) -> Vec<Id> {
        self.members.clone()
    }

    /// Returns false when the id was already present
    pub(crate) fn insert(&mut self, id: Id) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.push(id);
        true
    }

    /// Returns false when the id was not present
    pub(crate) fn remove(&mut self, id: &Id) -> bool {
        let original_len = self.members.len();
        self.members.retain(|member| member != id);
        self.members.len() < original_len
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Id> {
        self.members.iter()
    }
}

/// Single-valued side of a relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SingleEndpoint<Id> {
    target: Option<Id>,
}

impl<Id> Default for SingleEndpoint<Id> {
    fn default() -> Self {
        Self { target: None }
    }
}

impl<Id: Copy + Eq> SingleEndpoint<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Id> {
        self.target
    }

    pub fn is(&self, id: &Id) -> bool {
        self.target.as_ref() == Some(id)
    }

    pub fn is_set(&self) -> bool {
        self.target.is_some()
    }

    /// Installs `id` and hands back the previous value
    pub(crate) fn replace(&mut self, id: Id) -> Option<Id> {
        self.target.replace(id)
    }

    pub(crate) fn clear(&mut self) -> Option<Id> {
        self.target.take()
    }

    /// Clears only when the endpoint currently points at `id`
    pub(crate) fn clear_if(&mut self, id: &Id) -> bool {
        if self.is(id) {
            self.target = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn many_insert_is_idempotent() {
        let mut endpoint = ManyEndpoint::new();
        assert!(endpoint.insert(1));
        assert!(!endpoint.insert(1));
        assert_eq!(endpoint.len(), 1);
    }

    #[test]
    fn many_remove_absent_is_noop() {
        let mut endpoint = ManyEndpoint::new();
        endpoint.insert(1);
        assert!(!endpoint.remove(&2));
        assert!(endpoint.remove(&1));
        assert!(endpoint.is_empty());
    }

    #[test]
    fn snapshot_is_detached_from_endpoint() {
        let mut endpoint = ManyEndpoint::new();
        endpoint.insert(7);

        let mut first = endpoint.snapshot();
        let second = endpoint.snapshot();
        assert_ne!(first.as_ptr(), second.as_ptr());

        first.push(8);
        first.clear();
        assert_eq!(endpoint.snapshot(), vec![7]);
    }

    #[test]
    fn single_replace_returns_previous() {
        let mut endpoint = SingleEndpoint::new();
        assert_eq!(endpoint.replace(1), None);
        assert_eq!(endpoint.replace(2), Some(1));
        assert!(!endpoint.clear_if(&1));
        assert!(endpoint.clear_if(&2));
        assert!(!endpoint.is_set());
    }
}
