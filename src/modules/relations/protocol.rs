//! The association protocol shared by every relation in the graph.
//!
//! Each relation is described once as a constant (`ManyToMany`, `OneToMany` or
//! `DirectedLink`) holding accessors for its two endpoints. The operations
//! below validate both ids up front, then mutate the origin side followed by
//! the reciprocal side in the same frame. The "already linked" / "already
//! unlinked" test on the origin side is the only guard needed: when it fires
//! nothing is touched, otherwise each side is mutated exactly once.
//!
//! All operations return `Ok(true)` when the graph changed and `Ok(false)` for
//! an idempotent no-op. Errors are raised before any mutation.
use super::domain::{ManyEndpoint, RelationChange, RelationEvent, RelationKind, SingleEndpoint};
use super::store::{Entity, EntityStore, RelationJournal};
use crate::log_warn;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

fn require<S, E>(store: &S, id: &E::Id) -> AppResult<()>
where
    S: EntityStore<E>,
    E: Entity,
{
    let what = format!("{} {}", E::KIND, id);
    Validator::require_present(<S as EntityStore<E>>::entity(store, id), &what).map(|_| ())
}

fn fetch<'s, S, E>(store: &'s mut S, id: &E::Id) -> AppResult<&'s mut E>
where
    S: EntityStore<E>,
    E: Entity,
{
    <S as EntityStore<E>>::entity_mut(store, id).ok_or_else(|| {
        AppError::InternalError(format!("{} {} vanished during a relation update", E::KIND, id))
    })
}

fn reject_self_link<A: Entity, B: Entity>(
    relation: RelationKind,
    a: A::Id,
    b: B::Id,
) -> AppResult<()> {
    if A::entity_ref(a) == B::entity_ref(b) {
        return Err(AppError::InvariantViolation(format!(
            "{} cannot link {} to itself",
            relation,
            A::entity_ref(a)
        )));
    }
    Ok(())
}

fn apply_many<Id: Copy + Eq>(endpoint: &mut ManyEndpoint<Id>, id: Id, change: RelationChange) -> bool {
    match change {
        RelationChange::Linked => endpoint.insert(id),
        RelationChange::Unlinked => endpoint.remove(&id),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// MANY <-> MANY relation, e.g. groups and students
pub struct ManyToMany<L: Entity, R: Entity> {
    pub relation: RelationKind,
    pub left: fn(&mut L) -> &mut ManyEndpoint<R::Id>,
    pub right: fn(&mut R) -> &mut ManyEndpoint<L::Id>,
}

impl<L: Entity, R: Entity> ManyToMany<L, R> {
    /// `left.add(right)`
    pub fn link<S>(&self, store: &mut S, left: L::Id, right: R::Id) -> AppResult<bool>
    where
        S: EntityStore<L> + EntityStore<R> + RelationJournal,
    {
        self.apply(store, left, right, RelationChange::Linked, Side::Left)
    }

    /// `right.add(left)`
    pub fn link_from_right<S>(&self, store: &mut S, right: R::Id, left: L::Id) -> AppResult<bool>
    where
        S: EntityStore<L> + EntityStore<R> + RelationJournal,
    {
        self.apply(store, left, right, RelationChange::Linked, Side::Right)
    }

    /// `left.remove(right)`
    pub fn unlink<S>(&self, store: &mut S, left: L::Id, right: R::Id) -> AppResult<bool>
    where
        S: EntityStore<L> + EntityStore<R> + RelationJournal,
    {
        self.apply(store, left, right, RelationChange::Unlinked, Side::Left)
    }

    /// `right.remove(left)`
    pub fn unlink_from_right<S>(&self, store: &mut S, right: R::Id, left: L::Id) -> AppResult<bool>
    where
        S: EntityStore<L> + EntityStore<R> + RelationJournal,
    {
        self.apply(store, left, right, RelationChange::Unlinked, Side::Right)
    }

    fn apply<S>(
        &self,
        store: &mut S,
        left: L::Id,
        right: R::Id,
        change: RelationChange,
        origin: Side,
    ) -> AppResult<bool>
    where
        S: EntityStore<L> + EntityStore<R> + RelationJournal,
    {
        require::<S, L>(store, &left)?;
        require::<S, R>(store, &right)?;
        if change == RelationChange::Linked {
            reject_self_link::<L, R>(self.relation, left, right)?;
        }

        let changed = match origin {
            Side::Left => apply_many((self.left)(fetch::<S, L>(store, &left)?), right, change),
            Side::Right => apply_many((self.right)(fetch::<S, R>(store, &right)?), left, change),
        };
        if !changed {
            return Ok(false);
        }

        // Reciprocal step; idempotent if a corrupted graph already had it
        match origin {
            Side::Left => apply_many((self.right)(fetch::<S, R>(store, &right)?), left, change),
            Side::Right => apply_many((self.left)(fetch::<S, L>(store, &left)?), right, change),
        };

        store.record(RelationEvent::new(
            self.relation,
            change,
            L::entity_ref(left),
            R::entity_ref(right),
        ));
        Ok(true)
    }
}

/// ONE <-> MANY relation with replace semantics on the single side,
/// e.g. a building and its class rooms or a lesson and its subject.
pub struct OneToMany<O: Entity, D: Entity> {
    pub relation: RelationKind,
    /// Whether the owner is the left entity of `relation` (for event orientation)
    pub owner_is_left: bool,
    pub owner: fn(&mut O) -> &mut ManyEndpoint<D::Id>,
    pub dependent: fn(&mut D) -> &mut SingleEndpoint<O::Id>,
}

impl<O: Entity, D: Entity> OneToMany<O, D> {
    /// Collection side adds `dependent`. A dependent already pointing at
    /// `owner` is a no-op; one pointing elsewhere is moved.
    pub fn add_owner<S>(&self, store: &mut S, owner: O::Id, dependent: D::Id) -> AppResult<bool>
    where
        S: EntityStore<O> + EntityStore<D> + RelationJournal,
    {
        self.check_link(store, owner, dependent)?;
        self.attach(store, owner, dependent)
    }

    /// Single side is assigned `owner`. The previous owner, if any, loses its
    /// backward reference before the new one is installed.
    pub fn add_dependent<S>(&self, store: &mut S, dependent: D::Id, owner: O::Id) -> AppResult<bool>
    where
        S: EntityStore<O> + EntityStore<D> + RelationJournal,
    {
        self.check_link(store, owner, dependent)?;
        self.attach(store, owner, dependent)
    }

    /// Collection side drops `dependent`
    pub fn remove_owned<S>(&self, store: &mut S, owner: O::Id, dependent: D::Id) -> AppResult<bool>
    where
        S: EntityStore<O> + EntityStore<D> + RelationJournal,
    {
        require::<S, O>(store, &owner)?;
        require::<S, D>(store, &dependent)?;

        if !(self.owner)(fetch::<S, O>(store, &owner)?).remove(&dependent) {
            return Ok(false);
        }
        (self.dependent)(fetch::<S, D>(store, &dependent)?).clear_if(&owner);
        self.record(store, RelationChange::Unlinked, owner, dependent);
        Ok(true)
    }

    /// Single side drops `owner`, if that is what it currently points at
    pub fn remove_dependent<S>(
        &self,
        store: &mut S,
        dependent: D::Id,
        owner: O::Id,
    ) -> AppResult<bool>
    where
        S: EntityStore<O> + EntityStore<D> + RelationJournal,
    {
        require::<S, O>(store, &owner)?;
        require::<S, D>(store, &dependent)?;

        if !(self.dependent)(fetch::<S, D>(store, &dependent)?).clear_if(&owner) {
            return Ok(false);
        }
        (self.owner)(fetch::<S, O>(store, &owner)?).remove(&dependent);
        self.record(store, RelationChange::Unlinked, owner, dependent);
        Ok(true)
    }

    /// Single side drops whatever it points at
    pub fn release<S>(&self, store: &mut S, dependent: D::Id) -> AppResult<bool>
    where
        S: EntityStore<O> + EntityStore<D> + RelationJournal,
    {
        require::<S, D>(store, &dependent)?;

        match (self.dependent)(fetch::<S, D>(store, &dependent)?).clear() {
            Some(previous) => {
                self.evict(store, previous, dependent);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn check_link<S>(&self, store: &S, owner: O::Id, dependent: D::Id) -> AppResult<()>
    where
        S: EntityStore<O> + EntityStore<D>,
    {
        require::<S, O>(store, &owner)?;
        require::<S, D>(store, &dependent)?;
        reject_self_link::<O, D>(self.relation, owner, dependent)
    }

    /// Shared by both add operations. When the dependent already points at
    /// `owner` only the collection can lag behind.
    fn attach<S>(&self, store: &mut S, owner: O::Id, dependent: D::Id) -> AppResult<bool>
    where
        S: EntityStore<O> + EntityStore<D> + RelationJournal,
    {
        if (self.dependent)(fetch::<S, D>(store, &dependent)?).is(&owner) {
            let repaired = (self.owner)(fetch::<S, O>(store, &owner)?).insert(dependent);
            if repaired {
                self.record(store, RelationChange::Linked, owner, dependent);
            }
            return Ok(repaired);
        }
        self.install(store, owner, dependent)?;
        Ok(true)
    }

    fn install<S>(&self, store: &mut S, owner: O::Id, dependent: D::Id) -> AppResult<()>
    where
        S: EntityStore<O> + EntityStore<D> + RelationJournal,
    {
        let previous = (self.dependent)(fetch::<S, D>(store, &dependent)?).replace(owner);
        if let Some(previous) = previous {
            self.evict(store, previous, dependent);
        }
        (self.owner)(fetch::<S, O>(store, &owner)?).insert(dependent);
        self.record(store, RelationChange::Linked, owner, dependent);
        Ok(())
    }

    /// Remove `dependent` from a former owner's collection
    fn evict<S>(&self, store: &mut S, previous: O::Id, dependent: D::Id)
    where
        S: EntityStore<O> + EntityStore<D> + RelationJournal,
    {
        match <S as EntityStore<O>>::entity_mut(store, &previous) {
            Some(old) => {
                (self.owner)(old).remove(&dependent);
            }
            None => log_warn!(
                "{}: previous {} {} is missing, nothing to evict {} {} from",
                self.relation,
                O::KIND,
                previous,
                D::KIND,
                dependent
            ),
        }
        self.record(store, RelationChange::Unlinked, previous, dependent);
    }

    fn record<S: RelationJournal>(
        &self,
        store: &mut S,
        change: RelationChange,
        owner: O::Id,
        dependent: D::Id,
    ) {
        let (left, right) = if self.owner_is_left {
            (O::entity_ref(owner), D::entity_ref(dependent))
        } else {
            (D::entity_ref(dependent), O::entity_ref(owner))
        };
        store.record(RelationEvent::new(self.relation, change, left, right));
    }
}

/// Single-valued reference without a reciprocal collection. The target only
/// remembers the source that most recently pointed at it.
pub struct DirectedLink<A: Entity, B: Entity> {
    pub relation: RelationKind,
    pub forward: fn(&mut A) -> &mut SingleEndpoint<B::Id>,
    pub latest: fn(&mut B) -> &mut SingleEndpoint<A::Id>,
}

impl<A: Entity, B: Entity> DirectedLink<A, B> {
    pub fn assign<S>(&self, store: &mut S, source: A::Id, target: B::Id) -> AppResult<bool>
    where
        S: EntityStore<A> + EntityStore<B> + RelationJournal,
    {
        require::<S, A>(store, &source)?;
        require::<S, B>(store, &target)?;

        let forward = (self.forward)(fetch::<S, A>(store, &source)?);
        if forward.is(&target) {
            return Ok(false);
        }
        let previous = forward.replace(target);
        if let Some(previous) = previous {
            self.forget(store, source, previous);
        }
        (self.latest)(fetch::<S, B>(store, &target)?).replace(source);
        store.record(RelationEvent::new(
            self.relation,
            RelationChange::Linked,
            A::entity_ref(source),
            B::entity_ref(target),
        ));
        Ok(true)
    }

    pub fn unassign<S>(&self, store: &mut S, source: A::Id, target: B::Id) -> AppResult<bool>
    where
        S: EntityStore<A> + EntityStore<B> + RelationJournal,
    {
        require::<S, A>(store, &source)?;
        require::<S, B>(store, &target)?;

        if !(self.forward)(fetch::<S, A>(store, &source)?).clear_if(&target) {
            return Ok(false);
        }
        self.forget(store, source, target);
        Ok(true)
    }

    pub fn release<S>(&self, store: &mut S, source: A::Id) -> AppResult<bool>
    where
        S: EntityStore<A> + EntityStore<B> + RelationJournal,
    {
        require::<S, A>(store, &source)?;

        match (self.forward)(fetch::<S, A>(store, &source)?).clear() {
            Some(previous) => {
                self.forget(store, source, previous);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn forget<S>(&self, store: &mut S, source: A::Id, target: B::Id)
    where
        S: EntityStore<A> + EntityStore<B> + RelationJournal,
    {
        if let Some(old) = <S as EntityStore<B>>::entity_mut(store, &target) {
            (self.latest)(old).clear_if(&source);
        }
        store.record(RelationEvent::new(
            self.relation,
            RelationChange::Unlinked,
            A::entity_ref(source),
            B::entity_ref(target),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::people::domain::PersonRef;
    use crate::modules::relations::domain::{Edge, EntityRef};
    use crate::shared::domain::{BuildingId, GroupId, StudentId};
    use std::collections::{BTreeMap, HashMap};

    // Minimal entities so the protocol can be exercised without the campus graph

    struct Team {
        id: GroupId,
        players: ManyEndpoint<StudentId>,
    }

    struct Player {
        id: StudentId,
        teams: ManyEndpoint<GroupId>,
        club: SingleEndpoint<BuildingId>,
    }

    struct Club {
        id: BuildingId,
        players: ManyEndpoint<StudentId>,
    }

    impl Entity for Team {
        type Id = GroupId;
        const KIND: &'static str = "team";
        fn id(&self) -> GroupId {
            self.id
        }
        fn entity_ref(id: GroupId) -> EntityRef {
            EntityRef::Group(id)
        }
        fn edges(&self) -> Vec<Edge> {
            self.players
                .iter()
                .map(|player| Edge::new(RelationKind::GroupStudents, Self::entity_ref(self.id), Player::entity_ref(*player)))
                .collect()
        }
    }

    impl Entity for Player {
        type Id = StudentId;
        const KIND: &'static str = "player";
        fn id(&self) -> StudentId {
            self.id
        }
        fn entity_ref(id: StudentId) -> EntityRef {
            EntityRef::Person(PersonRef::Student(id))
        }
        fn edges(&self) -> Vec<Edge> {
            let me = Self::entity_ref(self.id);
            let mut edges: Vec<Edge> = self
                .teams
                .iter()
                .map(|team| Edge::new(RelationKind::GroupStudents, Team::entity_ref(*team), me))
                .collect();
            if let Some(club) = self.club.get() {
                edges.push(Edge::new(RelationKind::BuildingClassRooms, Club::entity_ref(club), me));
            }
            edges
        }
    }

    impl Entity for Club {
        type Id = BuildingId;
        const KIND: &'static str = "club";
        fn id(&self) -> BuildingId {
            self.id
        }
        fn entity_ref(id: BuildingId) -> EntityRef {
            EntityRef::Building(id)
        }
        fn edges(&self) -> Vec<Edge> {
            self.players
                .iter()
                .map(|player| Edge::new(RelationKind::BuildingClassRooms, Self::entity_ref(self.id), Player::entity_ref(*player)))
                .collect()
        }
    }

    /// Counts every mutable fetch so tests can see how often each side is touched
    #[derive(Default)]
    struct CountingStore {
        teams: BTreeMap<GroupId, Team>,
        players: BTreeMap<StudentId, Player>,
        clubs: BTreeMap<BuildingId, Club>,
        mutable_fetches: HashMap<&'static str, usize>,
        events: Vec<RelationEvent>,
    }

    impl CountingStore {
        fn team(&mut self) -> GroupId {
            let id = GroupId::new();
            self.teams.insert(
                id,
                Team {
                    id,
                    players: ManyEndpoint::new(),
                },
            );
            id
        }

        fn player(&mut self) -> StudentId {
            let id = StudentId::new();
            self.players.insert(
                id,
                Player {
                    id,
                    teams: ManyEndpoint::new(),
                    club: SingleEndpoint::new(),
                },
            );
            id
        }

        fn club(&mut self) -> BuildingId {
            let id = BuildingId::new();
            self.clubs.insert(
                id,
                Club {
                    id,
                    players: ManyEndpoint::new(),
                },
            );
            id
        }

        fn fetches(&self, kind: &str) -> usize {
            self.mutable_fetches.get(kind).copied().unwrap_or(0)
        }

        fn reset_counts(&mut self) {
            self.mutable_fetches.clear();
            self.events.clear();
        }
    }

    impl EntityStore<Team> for CountingStore {
        fn entity(&self, id: &GroupId) -> Option<&Team> {
            self.teams.get(id)
        }
        fn entity_mut(&mut self, id: &GroupId) -> Option<&mut Team> {
            *self.mutable_fetches.entry(Team::KIND).or_default() += 1;
            self.teams.get_mut(id)
        }
    }

    impl EntityStore<Player> for CountingStore {
        fn entity(&self, id: &StudentId) -> Option<&Player> {
            self.players.get(id)
        }
        fn entity_mut(&mut self, id: &StudentId) -> Option<&mut Player> {
            *self.mutable_fetches.entry(Player::KIND).or_default() += 1;
            self.players.get_mut(id)
        }
    }

    impl EntityStore<Club> for CountingStore {
        fn entity(&self, id: &BuildingId) -> Option<&Club> {
            self.clubs.get(id)
        }
        fn entity_mut(&mut self, id: &BuildingId) -> Option<&mut Club> {
            *self.mutable_fetches.entry(Club::KIND).or_default() += 1;
            self.clubs.get_mut(id)
        }
    }

    impl RelationJournal for CountingStore {
        fn record(&mut self, event: RelationEvent) {
            self.events.push(event);
        }
    }

    const TEAM_PLAYERS: ManyToMany<Team, Player> = ManyToMany {
        relation: RelationKind::GroupStudents,
        left: |team| &mut team.players,
        right: |player| &mut player.teams,
    };

    const CLUB_PLAYERS: OneToMany<Club, Player> = OneToMany {
        relation: RelationKind::BuildingClassRooms,
        owner_is_left: true,
        owner: |club| &mut club.players,
        dependent: |player| &mut player.club,
    };

    #[test]
    fn link_touches_each_side_exactly_once() {
        let mut store = CountingStore::default();
        let team = store.team();
        let player = store.player();

        assert!(TEAM_PLAYERS.link(&mut store, team, player).unwrap());

        assert_eq!(store.fetches(Team::KIND), 1);
        assert_eq!(store.fetches(Player::KIND), 1);
        assert_eq!(store.events.len(), 1);
        assert!(store.teams[&team].players.contains(&player));
        assert!(store.players[&player].teams.contains(&team));
    }

    #[test]
    fn second_link_stops_at_the_origin_side() {
        let mut store = CountingStore::default();
        let team = store.team();
        let player = store.player();
        TEAM_PLAYERS.link(&mut store, team, player).unwrap();
        store.reset_counts();

        assert!(!TEAM_PLAYERS.link(&mut store, team, player).unwrap());
        assert!(!TEAM_PLAYERS.link_from_right(&mut store, player, team).unwrap());

        // one look at the origin side per call, reciprocal never reached
        assert_eq!(store.fetches(Team::KIND), 1);
        assert_eq!(store.fetches(Player::KIND), 1);
        assert!(store.events.is_empty());
        assert_eq!(store.teams[&team].players.len(), 1);
    }

    #[test]
    fn unlink_from_either_side_clears_both() {
        let mut store = CountingStore::default();
        let team = store.team();
        let player = store.player();
        TEAM_PLAYERS.link(&mut store, team, player).unwrap();

        assert!(TEAM_PLAYERS.unlink_from_right(&mut store, player, team).unwrap());
        assert!(store.teams[&team].players.is_empty());
        assert!(store.players[&player].teams.is_empty());

        assert!(!TEAM_PLAYERS.unlink(&mut store, team, player).unwrap());
    }

    #[test]
    fn absent_counterpart_fails_before_mutation() {
        let mut store = CountingStore::default();
        let team = store.team();
        let ghost = StudentId::new();

        let err = TEAM_PLAYERS.link(&mut store, team, ghost).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(store.fetches(Team::KIND), 0);
        assert!(store.teams[&team].players.is_empty());
        assert!(store.events.is_empty());
    }

    #[test]
    fn add_dependent_evicts_previous_owner() {
        let mut store = CountingStore::default();
        let first = store.club();
        let second = store.club();
        let player = store.player();

        CLUB_PLAYERS.add_dependent(&mut store, player, first).unwrap();
        CLUB_PLAYERS.add_dependent(&mut store, player, second).unwrap();

        assert_eq!(store.players[&player].club.get(), Some(second));
        assert!(!store.clubs[&first].players.contains(&player));
        assert!(store.clubs[&second].players.contains(&player));

        let changes: Vec<_> = store.events.iter().map(|e| e.change).collect();
        assert_eq!(
            changes,
            vec![
                RelationChange::Linked,
                RelationChange::Unlinked,
                RelationChange::Linked
            ]
        );
    }

    #[test]
    fn add_owner_moves_dependent_between_collections() {
        let mut store = CountingStore::default();
        let first = store.club();
        let second = store.club();
        let player = store.player();

        assert!(CLUB_PLAYERS.add_owner(&mut store, first, player).unwrap());
        assert!(!CLUB_PLAYERS.add_owner(&mut store, first, player).unwrap());
        assert!(CLUB_PLAYERS.add_owner(&mut store, second, player).unwrap());

        assert!(store.clubs[&first].players.is_empty());
        assert_eq!(store.clubs[&second].players.snapshot(), vec![player]);
    }

    #[test]
    fn add_owner_completes_a_half_link_like_add_dependent() {
        let mut store = CountingStore::default();
        let club = store.club();
        let first = store.player();
        let second = store.player();
        store.players.get_mut(&first).unwrap().club.replace(club);
        store.players.get_mut(&second).unwrap().club.replace(club);

        assert!(CLUB_PLAYERS.add_owner(&mut store, club, first).unwrap());
        assert!(CLUB_PLAYERS.add_dependent(&mut store, second, club).unwrap());
        assert_eq!(store.clubs[&club].players.snapshot(), vec![first, second]);
        assert_eq!(store.events.len(), 2);

        assert!(!CLUB_PLAYERS.add_owner(&mut store, club, first).unwrap());
        assert!(!CLUB_PLAYERS.add_dependent(&mut store, second, club).unwrap());
        assert_eq!(store.events.len(), 2);
    }

    #[test]
    fn remove_owned_and_release() {
        let mut store = CountingStore::default();
        let club = store.club();
        let player = store.player();
        CLUB_PLAYERS.add_owner(&mut store, club, player).unwrap();

        assert!(CLUB_PLAYERS.remove_owned(&mut store, club, player).unwrap());
        assert!(!store.players[&player].club.is_set());
        assert!(!CLUB_PLAYERS.remove_owned(&mut store, club, player).unwrap());

        CLUB_PLAYERS.add_owner(&mut store, club, player).unwrap();
        assert!(CLUB_PLAYERS.release(&mut store, player).unwrap());
        assert!(store.clubs[&club].players.is_empty());
        assert!(!CLUB_PLAYERS.release(&mut store, player).unwrap());
    }

    #[test]
    fn remove_dependent_ignores_other_owner() {
        let mut store = CountingStore::default();
        let club = store.club();
        let other = store.club();
        let player = store.player();
        CLUB_PLAYERS.add_owner(&mut store, club, player).unwrap();

        assert!(!CLUB_PLAYERS.remove_dependent(&mut store, player, other).unwrap());
        assert!(store.clubs[&club].players.contains(&player));

        assert!(CLUB_PLAYERS.remove_dependent(&mut store, player, club).unwrap());
        assert!(store.clubs[&club].players.is_empty());
    }
}
