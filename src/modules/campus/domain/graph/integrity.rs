//! Whole-graph consistency check, run on every load.
//!
//! The relation protocol keeps a graph consistent as long as it is the only
//! thing mutating it; a document edited by hand or written by another tool
//! may not be. Every entity's edge list is compared against its
//! counterparts' lists.
use super::CampusGraph;
use crate::modules::relations::{Edge, EntityRef, RelationKind};
use crate::shared::domain::AdminId;
use crate::shared::errors::{AppError, AppResult};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegrityViolation {
    /// An edge points at an entity that does not exist
    Dangling { holder: EntityRef, edge: Edge },
    /// An edge is not mirrored by the counterpart
    Asymmetric { holder: EntityRef, edge: Edge },
    /// The same link is stored twice on one entity
    Duplicate { holder: EntityRef, edge: Edge },
    /// An entity is linked to itself
    SelfLink { holder: EntityRef, relation: RelationKind },
    SupervisionCycle { admins: Vec<AdminId> },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityViolation::Dangling { holder, edge } => {
                write!(f, "{} holds dangling link {}", holder, edge)
            }
            IntegrityViolation::Asymmetric { holder, edge } => {
                write!(f, "{} holds unmirrored link {}", holder, edge)
            }
            IntegrityViolation::Duplicate { holder, edge } => {
                write!(f, "{} holds link {} more than once", holder, edge)
            }
            IntegrityViolation::SelfLink { holder, relation } => {
                write!(f, "{} is linked to itself through {}", holder, relation)
            }
            IntegrityViolation::SupervisionCycle { admins } => {
                let ids: Vec<String> = admins.iter().map(ToString::to_string).collect();
                write!(f, "supervision cycle through admins {}", ids.join(" -> "))
            }
        }
    }
}

/// Whether the counterpart must hold the same edge.
///
/// Lesson -> Teacher is one-directional: a lesson's teacher need not point
/// back, but a teacher's latest lesson must be pointing at that teacher.
fn must_be_mirrored(edge: &Edge, holder: &EntityRef) -> bool {
    edge.relation.is_bidirectional() || &edge.right == holder
}

impl CampusGraph {
    pub fn verify_integrity(&self) -> Vec<IntegrityViolation> {
        let all = self.all_edges();
        let index: HashMap<EntityRef, HashSet<Edge>> = all
            .iter()
            .map(|(holder, edges)| (*holder, edges.iter().copied().collect()))
            .collect();

        let mut violations = Vec::new();
        for (holder, edges) in &all {
            let mut seen = HashSet::new();
            for edge in edges {
                if !seen.insert(*edge) {
                    violations.push(IntegrityViolation::Duplicate {
                        holder: *holder,
                        edge: *edge,
                    });
                    continue;
                }
                if edge.left == edge.right {
                    violations.push(IntegrityViolation::SelfLink {
                        holder: *holder,
                        relation: edge.relation,
                    });
                    continue;
                }

                let counterpart = edge.counterpart_of(holder);
                match index.get(&counterpart) {
                    None => violations.push(IntegrityViolation::Dangling {
                        holder: *holder,
                        edge: *edge,
                    }),
                    Some(mirror) if must_be_mirrored(edge, holder) && !mirror.contains(edge) => {
                        violations.push(IntegrityViolation::Asymmetric {
                            holder: *holder,
                            edge: *edge,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        violations.extend(
            self.supervision_cycles()
                .into_iter()
                .map(|admins| IntegrityViolation::SupervisionCycle { admins }),
        );
        violations
    }

    /// `verify_integrity` as a single error listing every violation
    pub fn ensure_integrity(&self) -> AppResult<()> {
        let violations = self.verify_integrity();
        if violations.is_empty() {
            return Ok(());
        }
        let listed: Vec<String> = violations.iter().map(ToString::to_string).collect();
        Err(AppError::IntegrityError(format!(
            "{} violation(s): {}",
            violations.len(),
            listed.join("; ")
        )))
    }
}
