//! Session progress and the objectives it completes.

use std::collections::{BTreeMap, BTreeSet};

use alchemy_grid_core::{ElementId, Event, Objective, ObjectiveKind, PatternKind, PuzzleKind};
use log::info;

/// What the player has achieved so far in the session.
#[derive(Clone, Debug)]
pub(crate) struct Progress {
    discovered: BTreeSet<ElementId>,
    placements: BTreeMap<ElementId, u32>,
    structures: BTreeSet<PatternKind>,
    puzzles: BTreeSet<PuzzleKind>,
}

impl Progress {
    /// Fresh progress where only the basic elements are known.
    pub(crate) fn new() -> Self {
        Self {
            discovered: ElementId::BASIC.into_iter().collect(),
            placements: BTreeMap::new(),
            structures: BTreeSet::new(),
            puzzles: BTreeSet::new(),
        }
    }

    /// Marks the element as discovered, returning whether it was new.
    pub(crate) fn discover(&mut self, element: ElementId) -> bool {
        self.discovered.insert(element)
    }

    pub(crate) fn record_placement(&mut self, element: ElementId) {
        let count = self.placements.entry(element).or_insert(0);
        *count = count.saturating_add(1);
    }

    pub(crate) fn record_structure(&mut self, pattern: PatternKind) {
        let _ = self.structures.insert(pattern);
    }

    pub(crate) fn record_puzzle(&mut self, puzzle: PuzzleKind) {
        let _ = self.puzzles.insert(puzzle);
    }

    pub(crate) fn discovered(&self) -> &BTreeSet<ElementId> {
        &self.discovered
    }

    pub(crate) fn placements(&self, element: ElementId) -> u32 {
        self.placements.get(&element).copied().unwrap_or(0)
    }

    fn is_satisfied(&self, kind: ObjectiveKind, score: u64) -> bool {
        match kind {
            ObjectiveKind::CreateElement { element }
            | ObjectiveKind::CreateCombination { element } => self.discovered.contains(&element),
            ObjectiveKind::PlaceElement { element, count } => self.placements(element) >= count,
            ObjectiveKind::BuildStructure { pattern } => self.structures.contains(&pattern),
            ObjectiveKind::SolvePuzzle { puzzle } => self.puzzles.contains(&puzzle),
            ObjectiveKind::ReachScore { score: threshold } => score >= threshold,
        }
    }
}

/// Completes every objective the progress satisfies and awards its points.
///
/// Awarded points may satisfy score objectives further down the list, so the
/// objectives are re-checked until a pass completes nothing.
pub(crate) fn complete_objectives(
    objectives: &mut [Objective],
    progress: &Progress,
    score: &mut u64,
    out_events: &mut Vec<Event>,
) {
    loop {
        let mut changed = false;
        for objective in objectives.iter_mut().filter(|o| !o.completed) {
            if !progress.is_satisfied(objective.kind, *score) {
                continue;
            }
            objective.completed = true;
            changed = true;
            *score = score.saturating_add(u64::from(objective.points));
            info!(
                "objective {} completed for {} points",
                objective.id.get(),
                objective.points
            );
            out_events.push(Event::ObjectiveCompleted {
                objective: objective.id,
                points: objective.points,
            });
            if objective.points > 0 {
                out_events.push(Event::ScoreChanged {
                    delta: objective.points,
                    score: *score,
                });
            }
        }
        if !changed {
            break;
        }
    }
}
