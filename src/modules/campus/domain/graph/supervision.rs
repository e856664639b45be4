use super::CampusGraph;
use crate::modules::people::domain::Admin;
use crate::shared::domain::AdminId;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use std::collections::{BTreeSet, VecDeque};

impl CampusGraph {
    /// Admins without a supervisor
    pub fn superadmins(&self) -> Vec<AdminId> {
        self.admins
            .values()
            .filter(|admin| admin.is_superadmin())
            .map(Admin::id)
            .collect()
    }

    /// Supervisors of `admin` from the direct one up to its superadmin.
    ///
    /// The walk stops at the first admin seen twice, so a corrupted cycle
    /// ends in an invariant error instead of looping.
    pub fn supervisors_of(&self, admin: &AdminId) -> AppResult<Vec<AdminId>> {
        let what = format!("admin {}", admin);
        let mut current = Validator::require_present(self.admins.get(admin), &what)?;
        let mut chain = Vec::new();
        let mut seen = BTreeSet::from([*admin]);

        while let Some(supervisor) = current.supervisor() {
            if !seen.insert(supervisor) {
                return Err(AppError::InvariantViolation(format!(
                    "supervision cycle through admin {}",
                    supervisor
                )));
            }
            chain.push(supervisor);
            current = match self.admins.get(&supervisor) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(chain)
    }

    /// Everyone below `admin`, breadth first
    pub fn subordinates_of(&self, admin: &AdminId) -> AppResult<Vec<AdminId>> {
        let what = format!("admin {}", admin);
        let root = Validator::require_present(self.admins.get(admin), &what)?;
        let mut seen = BTreeSet::from([*admin]);
        let mut queue: VecDeque<AdminId> = root.subordinates().into();
        let mut out = Vec::new();

        while let Some(next) = queue.pop_front() {
            if !seen.insert(next) {
                continue;
            }
            out.push(next);
            if let Some(sub) = self.admins.get(&next) {
                queue.extend(sub.subordinates());
            }
        }
        Ok(out)
    }

    /// Whether making `supervisor` the supervisor of `subordinate` would
    /// close a loop, including the trivial self case
    pub fn would_create_cycle(
        &self,
        subordinate: &AdminId,
        supervisor: &AdminId,
    ) -> AppResult<bool> {
        if subordinate == supervisor {
            return Ok(true);
        }
        Ok(self.supervisors_of(supervisor)?.contains(subordinate))
    }

    /// Admin ids that sit on a supervision cycle, one entry per cycle
    pub(super) fn supervision_cycles(&self) -> Vec<Vec<AdminId>> {
        let mut reported: BTreeSet<AdminId> = BTreeSet::new();
        let mut cycles = Vec::new();

        for start in self.admins.keys() {
            let mut path = vec![*start];
            let mut current = *start;
            while let Some(next) = self.admins.get(&current).and_then(Admin::supervisor) {
                if let Some(pos) = path.iter().position(|id| *id == next) {
                    let cycle: Vec<AdminId> = path[pos..].to_vec();
                    if cycle.iter().all(|id| !reported.contains(id)) {
                        reported.extend(cycle.iter().copied());
                        cycles.push(cycle);
                    }
                    break;
                }
                if reported.contains(&next) {
                    break;
                }
                path.push(next);
                current = next;
            }
        }
        cycles
    }
}
