//! Colonist intents: turning, walking, melee, and interaction.

use deadhold_core::{
    DamageSource, Direction, Event, StructureState, TilePosition, COLONIST_BLOCKERS,
};

use crate::World;

/// Damage dealt by the colonist's melee attack.
const MELEE_DAMAGE: u32 = 50;
/// Experience credited once per harvested tree or rock.
const HARVEST_EXPERIENCE: u32 = 1;

impl World {
    pub(crate) fn face_colonist(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !self.colonist_alive() || self.colonist.facing == direction {
            return;
        }
        self.colonist.facing = direction;
        out_events.push(Event::ColonistTurned { direction });
    }

    /// Turns the colonist and moves one tile unless the destination is off
    /// the grid or blocked. A blocked step is a silent no-op.
    pub(crate) fn step_colonist(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !self.colonist_alive() {
            return;
        }
        self.face_colonist(direction, out_events);

        let from = self.colonist.tile;
        let Some(to) = from.step(direction) else {
            return;
        };
        if !self.in_bounds(to) || self.store.is_blocked(to, &COLONIST_BLOCKERS) {
            return;
        }

        self.colonist.tile = to;
        out_events.push(Event::ColonistMoved { from, to });
    }

    fn faced_tile(&self) -> Option<TilePosition> {
        self.colonist
            .tile
            .step(self.colonist.facing)
            .filter(|tile| self.in_bounds(*tile))
    }

    /// Resolves exactly one melee outcome on the faced tile, in priority
    /// order: wound a living zombie, harvest a tree or rock, toggle a door.
    pub(crate) fn attack(&mut self, out_events: &mut Vec<Event>) {
        if !self.colonist_alive() {
            return;
        }
        let Some(target) = self.faced_tile() else {
            return;
        };

        if let Some(zombie) = self.store.living_zombie_at(target) {
            if let Some(entry) = self.store.zombie_mut(zombie) {
                entry.health = entry.health.damaged(MELEE_DAMAGE);
                out_events.push(Event::ZombieDamaged {
                    zombie,
                    amount: MELEE_DAMAGE,
                    source: DamageSource::Melee,
                });
            }
            return;
        }

        if let Some((resource, kind)) = self.store.deplete_resource_at(target) {
            let amount = kind.harvest_yield();
            self.economy.deposit(kind, amount);
            out_events.push(Event::ResourceHarvested {
                resource,
                kind,
                amount,
            });
            if self.credits.record_harvest(resource) {
                self.award_experience(HARVEST_EXPERIENCE, out_events);
            }
            return;
        }

        let Some(structure) = self.store.structure_at_mut(target) else {
            return;
        };
        if !structure.health.is_alive() {
            return;
        }
        let id = structure.id;
        if let StructureState::Door { open } = &mut structure.state {
            *open = !*open;
            out_events.push(Event::StructureToggled {
                structure: id,
                active: *open,
            });
        }
    }

    /// Operates the door, campfire, or workbench on the faced tile.
    pub(crate) fn interact(&mut self, out_events: &mut Vec<Event>) {
        if !self.colonist_alive() {
            return;
        }
        let Some(target) = self.faced_tile() else {
            return;
        };
        let Some(structure) = self.store.structure_at_mut(target) else {
            return;
        };
        if !structure.health.is_alive() {
            return;
        }

        let id = structure.id;
        let active = match &mut structure.state {
            StructureState::Door { open } => {
                *open = !*open;
                *open
            }
            StructureState::Campfire { lit, fuel } => {
                if !*lit && *fuel == 0 {
                    return;
                }
                *lit = !*lit;
                *lit
            }
            StructureState::Workbench {
                in_use,
                craft_timer,
            } => {
                *in_use = !*in_use;
                if !*in_use {
                    *craft_timer = 0;
                }
                *in_use
            }
            _ => return,
        };
        out_events.push(Event::StructureToggled {
            structure: id,
            active,
        });
    }
}
