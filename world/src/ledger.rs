//! Economy ledger: stockpile, blueprint unlocks, construction, and the
//! one-time experience credits.

use std::collections::BTreeSet;

use deadhold_core::{
    Blueprint, BuildError, Event, Progress, ResourceId, ResourceKind, Stockpile, TilePosition,
    UnlockError, ZombieId, PLACEMENT_BLOCKERS,
};

use crate::World;

/// Experience credited once per distinct tile and blueprint built.
const BUILD_EXPERIENCE: u32 = 1;

#[derive(Clone, Debug)]
pub(crate) struct Economy {
    stockpile: Stockpile,
    unlocked: BTreeSet<Blueprint>,
    selected: Blueprint,
}

impl Economy {
    pub(crate) fn new(starting_wood: u32) -> Self {
        Self {
            stockpile: Stockpile::new(starting_wood, 0),
            unlocked: Blueprint::ALL
                .into_iter()
                .filter(|blueprint| blueprint.unlocked_by_default())
                .collect(),
            selected: Blueprint::ALL[0],
        }
    }

    pub(crate) fn restore(
        stockpile: Stockpile,
        unlocked: impl IntoIterator<Item = Blueprint>,
        selected: Blueprint,
    ) -> Self {
        Self {
            stockpile,
            unlocked: unlocked.into_iter().collect(),
            selected,
        }
    }

    pub(crate) fn stockpile(&self) -> Stockpile {
        self.stockpile
    }

    /// Unlocked blueprints in catalog order.
    pub(crate) fn unlocked(&self) -> impl Iterator<Item = Blueprint> + '_ {
        self.unlocked.iter().copied()
    }

    pub(crate) fn selected(&self) -> Blueprint {
        self.selected
    }

    pub(crate) fn deposit(&mut self, kind: ResourceKind, amount: u32) {
        self.stockpile = self.stockpile.deposit(kind, amount);
    }
}

/// Remembers which events already paid out experience.
#[derive(Clone, Debug, Default)]
pub(crate) struct CreditLedger {
    kills: BTreeSet<ZombieId>,
    harvests: BTreeSet<ResourceId>,
    builds: BTreeSet<(TilePosition, Blueprint)>,
}

impl CreditLedger {
    /// Returns `true` the first time a zombie's death is recorded.
    pub(crate) fn record_kill(&mut self, zombie: ZombieId) -> bool {
        self.kills.insert(zombie)
    }

    /// Returns `true` the first time a resource node's harvest is recorded.
    pub(crate) fn record_harvest(&mut self, resource: ResourceId) -> bool {
        self.harvests.insert(resource)
    }

    /// Returns `true` the first time a blueprint is built on a tile.
    pub(crate) fn record_build(&mut self, tile: TilePosition, blueprint: Blueprint) -> bool {
        self.builds.insert((tile, blueprint))
    }

    pub(crate) fn builds(&self) -> impl Iterator<Item = (TilePosition, Blueprint)> + '_ {
        self.builds.iter().copied()
    }
}

impl World {
    pub(crate) fn select_blueprint(&mut self, blueprint: Blueprint, out_events: &mut Vec<Event>) {
        if self.economy.selected == blueprint {
            return;
        }
        self.economy.selected = blueprint;
        out_events.push(Event::BlueprintSelected { blueprint });
    }

    /// Builds `blueprint` on the colonist's tile. The cost is deducted if and
    /// only if the structure is placed.
    pub(crate) fn build(&mut self, blueprint: Blueprint, out_events: &mut Vec<Event>) {
        if !self.colonist_alive() {
            return;
        }
        if let Err(reason) = self.try_build(blueprint, out_events) {
            out_events.push(Event::BuildRejected { blueprint, reason });
        }
    }

    fn try_build(
        &mut self,
        blueprint: Blueprint,
        out_events: &mut Vec<Event>,
    ) -> Result<(), BuildError> {
        if !self.economy.unlocked.contains(&blueprint) {
            return Err(BuildError::Locked);
        }
        let remaining = self
            .economy
            .stockpile
            .spend(blueprint.cost())
            .ok_or(BuildError::Unaffordable)?;

        let tile = self.colonist.tile;
        if self.store.is_blocked(tile, &PLACEMENT_BLOCKERS) {
            return Err(BuildError::Occupied);
        }

        let kind = blueprint.structure();
        let structure = self
            .store
            .insert_structure(tile, kind.max_health(), kind.initial_state())
            .ok_or(BuildError::Occupied)?;
        self.economy.stockpile = remaining;
        out_events.push(Event::StructureBuilt {
            structure,
            blueprint,
            tile,
        });

        if self.credits.record_build(tile, blueprint) {
            self.award_experience(BUILD_EXPERIENCE, out_events);
        }
        Ok(())
    }

    /// Spends one skill point to unlock `blueprint`. Unlocks carry no
    /// prerequisites.
    pub(crate) fn unlock_blueprint(&mut self, blueprint: Blueprint, out_events: &mut Vec<Event>) {
        let reason = if self.economy.unlocked.contains(&blueprint) {
            UnlockError::AlreadyUnlocked
        } else if self.progress.skill_points == 0 {
            UnlockError::NoSkillPoints
        } else {
            self.progress.skill_points -= 1;
            let _ = self.economy.unlocked.insert(blueprint);
            out_events.push(Event::BlueprintUnlocked { blueprint });
            return;
        };
        out_events.push(Event::UnlockRejected { blueprint, reason });
    }

    pub(crate) fn award_experience(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        self.progress.xp = self.progress.xp.saturating_add(amount);
        out_events.push(Event::ExperienceAwarded { amount });
    }

    pub(crate) fn apply_progress(&mut self, progress: Progress, out_events: &mut Vec<Event>) {
        let previous = self.progress.level;
        self.progress = progress;
        for level in previous.saturating_add(1)..=progress.level {
            out_events.push(Event::LeveledUp { level });
        }
    }
}
