#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Deadhold simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what actually happened. Systems consume event streams, query
//! immutable snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Deadhold. Gather, build, survive the night.";

/// Maximum health of the colonist.
pub const COLONIST_MAX_HEALTH: Health = Health::new(100);

/// Baseline health assigned to freshly spawned zombies.
pub const ZOMBIE_MAX_HEALTH: Health = Health::new(100);

/// Manhattan radius within which a turret acquires targets.
pub const TURRET_RANGE: u32 = 5;

/// Number of ticks a turret waits after firing before it may fire again.
pub const TURRET_COOLDOWN_TICKS: u32 = 10;

/// Campfire fuel level when a campfire is first built.
pub const CAMPFIRE_MAX_FUEL: u32 = 100;

/// Location of a single tile expressed as column (`x`) and row (`y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    x: u32,
    y: u32,
}

impl TilePosition {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two tiles.
    #[must_use]
    pub fn manhattan_distance(self, other: TilePosition) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Signed offset that leads from `self` to `other`.
    #[must_use]
    pub fn delta_to(self, other: TilePosition) -> (i64, i64) {
        (
            i64::from(other.x) - i64::from(self.x),
            i64::from(other.y) - i64::from(self.y),
        )
    }

    /// Tile one unit step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds depend on the grid and are checked by the world.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<TilePosition> {
        let (dx, dy) = direction.offset();
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

/// Cardinal directions used for facing, movement, and projectile travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward increasing row indices.
    #[default]
    South,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset `(dx, dy)` associated with the direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Snaps an offset onto a single axis.
    ///
    /// The axis with the larger magnitude wins and ties resolve toward the
    /// vertical axis. A zero offset resolves to [`Direction::North`].
    #[must_use]
    pub fn toward(dx: i64, dy: i64) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0 {
                Self::East
            } else {
                Self::West
            }
        } else if dy > 0 {
            Self::South
        } else {
            Self::North
        }
    }
}

/// Hit points carried by every damageable entity.
///
/// Health may drop below zero when several damage sources land in the same
/// tick; anything at or below zero counts as dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Health(i32);

impl Health {
    /// Creates a health value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw hit point value.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Reports whether the owner is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.0 > 0
    }

    /// Returns the health remaining after taking `amount` damage.
    #[must_use]
    pub const fn damaged(self, amount: u32) -> Self {
        let amount = if amount > i32::MAX as u32 {
            i32::MAX
        } else {
            amount as i32
        };
        Self(self.0.saturating_sub(amount))
    }
}

/// Unique identifier assigned to a zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZombieId(u32);

impl ZombieId {
    /// Creates a new zombie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureId(u32);

impl StructureId {
    /// Creates a new structure identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tree or rock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Creates a new resource identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Material a wall is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WallMaterial {
    /// Cheap wooden wall.
    Wood,
    /// Sturdy stone wall.
    Stone,
}

/// Kinds of structures that can stand on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StructureKind {
    /// Impassable wall.
    Wall(WallMaterial),
    /// Door that blocks only while closed.
    Door,
    /// Floor spikes that wound zombies standing on them.
    Spike,
    /// Pit that wounds and pins zombies standing in it.
    TrapPit,
    /// Automatic turret firing bullets at nearby zombies.
    Turret,
    /// Crafting station.
    Workbench,
    /// Fuel-burning campfire.
    Campfire,
}

impl StructureKind {
    /// Health assigned to a freshly built structure of this kind.
    #[must_use]
    pub const fn max_health(self) -> Health {
        match self {
            Self::Wall(WallMaterial::Wood) => Health::new(100),
            Self::Wall(WallMaterial::Stone) => Health::new(300),
            Self::Door => Health::new(100),
            Self::Spike => Health::new(50),
            Self::TrapPit => Health::new(75),
            Self::Turret => Health::new(100),
            Self::Workbench => Health::new(150),
            Self::Campfire => Health::new(75),
        }
    }

    /// Per-kind state assigned to a freshly built structure.
    #[must_use]
    pub const fn initial_state(self) -> StructureState {
        match self {
            Self::Wall(material) => StructureState::Wall { material },
            Self::Door => StructureState::Door { open: false },
            Self::Spike => StructureState::Spike,
            Self::TrapPit => StructureState::TrapPit,
            Self::Turret => StructureState::Turret { cooldown: 0 },
            Self::Workbench => StructureState::Workbench {
                in_use: false,
                craft_timer: 0,
            },
            Self::Campfire => StructureState::Campfire {
                lit: false,
                fuel: CAMPFIRE_MAX_FUEL,
            },
        }
    }
}

/// Mutable per-kind state carried by a structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructureState {
    /// Wall state.
    Wall {
        /// Material of the wall.
        material: WallMaterial,
    },
    /// Door state.
    Door {
        /// Whether the door currently lets traffic through.
        open: bool,
    },
    /// Spike state.
    Spike,
    /// Trap pit state.
    TrapPit,
    /// Turret state.
    Turret {
        /// Ticks remaining until the turret may fire again.
        cooldown: u32,
    },
    /// Workbench state.
    Workbench {
        /// Whether the colonist is working at the bench.
        in_use: bool,
        /// Ticks spent crafting since the bench was taken into use.
        craft_timer: u32,
    },
    /// Campfire state.
    Campfire {
        /// Whether the fire burns.
        lit: bool,
        /// Remaining fuel, 0 to [`CAMPFIRE_MAX_FUEL`].
        fuel: u32,
    },
}

impl StructureState {
    /// Kind of structure described by the state.
    #[must_use]
    pub const fn kind(&self) -> StructureKind {
        match self {
            Self::Wall { material } => StructureKind::Wall(*material),
            Self::Door { .. } => StructureKind::Door,
            Self::Spike => StructureKind::Spike,
            Self::TrapPit => StructureKind::TrapPit,
            Self::Turret { .. } => StructureKind::Turret,
            Self::Workbench { .. } => StructureKind::Workbench,
            Self::Campfire { .. } => StructureKind::Campfire,
        }
    }
}

/// Harvestable resource node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Tree yielding wood when cut down.
    Tree,
    /// Rock yielding stone when mined.
    Rock,
}

impl ResourceKind {
    /// Units yielded by harvesting a node of this kind once.
    #[must_use]
    pub const fn harvest_yield(self) -> u32 {
        match self {
            Self::Tree | Self::Rock => 2,
        }
    }
}

/// Resource price of a blueprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cost {
    /// Wood required.
    pub wood: u32,
    /// Stone required.
    pub stone: u32,
}

impl Cost {
    /// Creates a cost from wood and stone amounts.
    #[must_use]
    pub const fn new(wood: u32, stone: u32) -> Self {
        Self { wood, stone }
    }
}

/// Wood and stone held by the colony. Counters never go negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Stockpile {
    wood: u32,
    stone: u32,
}

impl Stockpile {
    /// Stockpile a fresh colony starts with.
    pub const STARTING: Stockpile = Stockpile::new(10, 0);

    /// Creates a stockpile holding the provided amounts.
    #[must_use]
    pub const fn new(wood: u32, stone: u32) -> Self {
        Self { wood, stone }
    }

    /// Wood on hand.
    #[must_use]
    pub const fn wood(&self) -> u32 {
        self.wood
    }

    /// Stone on hand.
    #[must_use]
    pub const fn stone(&self) -> u32 {
        self.stone
    }

    /// Reports whether every entry of `cost` is covered.
    #[must_use]
    pub const fn can_afford(&self, cost: Cost) -> bool {
        self.wood >= cost.wood && self.stone >= cost.stone
    }

    /// Stockpile left after paying `cost`, or `None` when it cannot be paid.
    #[must_use]
    pub fn spend(self, cost: Cost) -> Option<Self> {
        Some(Self {
            wood: self.wood.checked_sub(cost.wood)?,
            stone: self.stone.checked_sub(cost.stone)?,
        })
    }

    /// Stockpile after depositing `amount` units harvested from `kind`.
    #[must_use]
    pub fn deposit(self, kind: ResourceKind, amount: u32) -> Self {
        match kind {
            ResourceKind::Tree => Self {
                wood: self.wood.saturating_add(amount),
                ..self
            },
            ResourceKind::Rock => Self {
                stone: self.stone.saturating_add(amount),
                ..self
            },
        }
    }
}

impl Default for Stockpile {
    fn default() -> Self {
        Self::STARTING
    }
}

/// Named buildable structure definitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Blueprint {
    /// Wooden wall.
    WoodWall,
    /// Stone wall.
    StoneWall,
    /// Door.
    Door,
    /// Spike trap.
    Spike,
    /// Trap pit.
    TrapPit,
    /// Turret.
    Turret,
    /// Workbench.
    Workbench,
    /// Campfire.
    Campfire,
}

impl Blueprint {
    /// Catalog order used for cycling and for the persisted selection index.
    pub const ALL: [Blueprint; 8] = [
        Blueprint::WoodWall,
        Blueprint::StoneWall,
        Blueprint::Door,
        Blueprint::Spike,
        Blueprint::TrapPit,
        Blueprint::Turret,
        Blueprint::Workbench,
        Blueprint::Campfire,
    ];

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WoodWall => "wood wall",
            Self::StoneWall => "stone wall",
            Self::Door => "door",
            Self::Spike => "spike",
            Self::TrapPit => "trap pit",
            Self::Turret => "turret",
            Self::Workbench => "workbench",
            Self::Campfire => "campfire",
        }
    }

    /// Resources consumed by building the blueprint.
    #[must_use]
    pub const fn cost(self) -> Cost {
        match self {
            Self::WoodWall => Cost::new(2, 0),
            Self::StoneWall => Cost::new(0, 2),
            Self::Door => Cost::new(3, 0),
            Self::Spike => Cost::new(2, 1),
            Self::TrapPit => Cost::new(1, 3),
            Self::Turret => Cost::new(3, 5),
            Self::Workbench => Cost::new(5, 0),
            Self::Campfire => Cost::new(3, 2),
        }
    }

    /// Structure instantiated by the blueprint.
    #[must_use]
    pub const fn structure(self) -> StructureKind {
        match self {
            Self::WoodWall => StructureKind::Wall(WallMaterial::Wood),
            Self::StoneWall => StructureKind::Wall(WallMaterial::Stone),
            Self::Door => StructureKind::Door,
            Self::Spike => StructureKind::Spike,
            Self::TrapPit => StructureKind::TrapPit,
            Self::Turret => StructureKind::Turret,
            Self::Workbench => StructureKind::Workbench,
            Self::Campfire => StructureKind::Campfire,
        }
    }

    /// Reports whether a new colony starts with the blueprint unlocked.
    #[must_use]
    pub const fn unlocked_by_default(self) -> bool {
        matches!(self, Self::WoodWall | Self::Door)
    }

    /// Position of the blueprint within [`Blueprint::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(0)
    }

    /// Blueprint stored at `index` within [`Blueprint::ALL`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Blueprint following `self` in catalog order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Experience and leveling state of the colonist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progress {
    /// Experience accumulated toward the next level.
    pub xp: u32,
    /// Current level, starting at 1.
    pub level: u32,
    /// Unspent skill points.
    pub skill_points: u32,
    /// Experience required to reach the next level.
    pub xp_to_next: u32,
}

impl Progress {
    /// Progress of a fresh colonist.
    pub const STARTING: Progress = Progress {
        xp: 0,
        level: 1,
        skill_points: 0,
        xp_to_next: 10,
    };
}

impl Default for Progress {
    fn default() -> Self {
        Self::STARTING
    }
}

/// In-game wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    /// Hour, 0 to 23.
    pub hour: u32,
    /// Minute, 0 to 59.
    pub minute: u32,
}

impl TimeOfDay {
    /// Night spans every hour outside 06:00 to 20:59.
    #[must_use]
    pub const fn is_night(&self) -> bool {
        !(self.hour >= 6 && self.hour < 21)
    }
}

/// Entity categories considered by tile blocking queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blocker {
    /// Any wall.
    Wall,
    /// A door that is currently closed.
    ClosedDoor,
    /// Any structure, regardless of kind or state.
    AnyStructure,
    /// A tree that has not been cut down.
    Tree,
    /// A rock that has not been mined.
    Rock,
}

/// Blockers that stop the colonist from walking onto a tile.
pub const COLONIST_BLOCKERS: [Blocker; 4] = [
    Blocker::Wall,
    Blocker::ClosedDoor,
    Blocker::Tree,
    Blocker::Rock,
];

/// Blockers that reject construction on a tile.
pub const PLACEMENT_BLOCKERS: [Blocker; 3] =
    [Blocker::AnyStructure, Blocker::Tree, Blocker::Rock];

/// Combat stages resolved by the world in a fixed order every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombatPhase {
    /// Every cooling turret decrements its cooldown.
    TurretCooldowns,
    /// Bullets travel, expire, and hit zombies.
    Projectiles,
    /// Spikes and trap pits wound the zombies standing on them.
    Hazards,
    /// Every living zombie advances its action counter.
    ZombiePhases,
    /// Zombies sharing the colonist's tile wound the colonist.
    Contact,
    /// Dead zombies and structures are removed and credited.
    Casualties,
}

/// Sources of damage dealt to zombies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageSource {
    /// The colonist's melee attack.
    Melee,
    /// A turret bullet.
    Bullet,
    /// A spike trap.
    Spike,
    /// A trap pit.
    TrapPit,
}

/// Reasons a build request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildError {
    /// The blueprint has not been unlocked yet.
    Locked,
    /// The stockpile does not cover the blueprint's cost.
    Unaffordable,
    /// The colonist's tile already holds a blocking entity.
    Occupied,
}

/// Reasons an unlock request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnlockError {
    /// The blueprint is unlocked already.
    AlreadyUnlocked,
    /// No skill point is available to spend.
    NoSkillPoints,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one tick.
    Tick,
    /// Requests a new zombie on the provided tile.
    SpawnZombie {
        /// Tile the zombie appears on.
        tile: TilePosition,
    },
    /// Turns the colonist without moving.
    FaceColonist {
        /// New facing.
        direction: Direction,
    },
    /// Turns the colonist and attempts a single step.
    StepColonist {
        /// Direction of travel.
        direction: Direction,
    },
    /// Resolves the colonist's melee action against the faced tile.
    Attack,
    /// Operates the door, campfire, or workbench on the faced tile.
    Interact,
    /// Changes the blueprint selected for construction.
    SelectBlueprint {
        /// Blueprint to select.
        blueprint: Blueprint,
    },
    /// Builds the blueprint on the colonist's tile.
    Build {
        /// Blueprint to construct.
        blueprint: Blueprint,
    },
    /// Spends a skill point to unlock a blueprint.
    UnlockBlueprint {
        /// Blueprint to unlock.
        blueprint: Blueprint,
    },
    /// Fires a bullet from a ready turret.
    FireTurret {
        /// Turret that fires.
        turret: StructureId,
        /// Axis-snapped travel direction of the bullet.
        direction: Direction,
    },
    /// Moves a zombie one tile, or bumps the wall or closed door in its way.
    StepZombie {
        /// Zombie that acts.
        zombie: ZombieId,
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Resolves one of the world-internal combat stages.
    ResolveCombatPhase {
        /// Stage to resolve.
        phase: CombatPhase,
    },
    /// Replaces the colonist's progress after a level-up reconciliation.
    ApplyProgress {
        /// Reconciled progress.
        progress: Progress,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced one tick.
    TimeAdvanced {
        /// Tick counter after advancing.
        tick: u64,
    },
    /// Announces that the clock crossed 06:00 and a new day began.
    DayStarted {
        /// Day count after the increment.
        day: u32,
    },
    /// Confirms that a zombie entered the world.
    ZombieSpawned {
        /// Identifier assigned to the zombie.
        zombie: ZombieId,
        /// Tile the zombie occupies.
        tile: TilePosition,
    },
    /// Confirms that the colonist changed facing.
    ColonistTurned {
        /// New facing.
        direction: Direction,
    },
    /// Confirms that the colonist moved between two tiles.
    ColonistMoved {
        /// Tile left behind.
        from: TilePosition,
        /// Tile entered.
        to: TilePosition,
    },
    /// Reports damage dealt to the colonist by a zombie on its tile.
    ColonistWounded {
        /// Zombie that dealt the damage.
        zombie: ZombieId,
        /// Health after the wound.
        health: Health,
    },
    /// Announces that the colonist died. Emitted once.
    ColonistDied,
    /// Confirms that a zombie moved between two tiles.
    ZombieAdvanced {
        /// Zombie that moved.
        zombie: ZombieId,
        /// Tile left behind.
        from: TilePosition,
        /// Tile entered.
        to: TilePosition,
    },
    /// Reports damage dealt to a zombie.
    ZombieDamaged {
        /// Zombie that took the damage.
        zombie: ZombieId,
        /// Damage dealt.
        amount: u32,
        /// Origin of the damage.
        source: DamageSource,
    },
    /// Confirms that a dead zombie was removed from the world.
    ZombieKilled {
        /// Zombie that died.
        zombie: ZombieId,
        /// Tile the zombie died on.
        tile: TilePosition,
    },
    /// Reports a zombie battering a wall or closed door.
    StructureDamaged {
        /// Structure that took the damage.
        structure: StructureId,
        /// Damage dealt.
        amount: u32,
    },
    /// Confirms that a destroyed structure was removed from the world.
    StructureDestroyed {
        /// Structure that was destroyed.
        structure: StructureId,
        /// Kind of the destroyed structure.
        kind: StructureKind,
        /// Tile the structure stood on.
        tile: TilePosition,
    },
    /// Confirms that a tree was cut down or a rock mined.
    ResourceHarvested {
        /// Harvested node.
        resource: ResourceId,
        /// Kind of the node.
        kind: ResourceKind,
        /// Units added to the stockpile.
        amount: u32,
    },
    /// Reports a door, campfire, or workbench switching state.
    StructureToggled {
        /// Structure that switched.
        structure: StructureId,
        /// Whether the door is open, the fire lit, or the bench in use.
        active: bool,
    },
    /// Announces that a lit campfire ran out of fuel.
    CampfireBurnedOut {
        /// Campfire that went out.
        structure: StructureId,
    },
    /// Confirms that the selected blueprint changed.
    BlueprintSelected {
        /// Newly selected blueprint.
        blueprint: Blueprint,
    },
    /// Confirms that a structure was built.
    StructureBuilt {
        /// Identifier assigned to the structure.
        structure: StructureId,
        /// Blueprint that was built.
        blueprint: Blueprint,
        /// Tile the structure occupies.
        tile: TilePosition,
    },
    /// Reports that a build request was rejected.
    BuildRejected {
        /// Blueprint requested.
        blueprint: Blueprint,
        /// Specific reason the build failed.
        reason: BuildError,
    },
    /// Confirms that a blueprint was unlocked.
    BlueprintUnlocked {
        /// Unlocked blueprint.
        blueprint: Blueprint,
    },
    /// Reports that an unlock request was rejected.
    UnlockRejected {
        /// Blueprint requested.
        blueprint: Blueprint,
        /// Specific reason the unlock failed.
        reason: UnlockError,
    },
    /// Confirms that a turret fired.
    TurretFired {
        /// Turret that fired.
        turret: StructureId,
        /// Travel direction of the bullet.
        direction: Direction,
    },
    /// Reports a one-time experience credit.
    ExperienceAwarded {
        /// Experience granted.
        amount: u32,
    },
    /// Announces that the colonist reached a new level.
    LeveledUp {
        /// Level reached.
        level: u32,
    },
}

/// Immutable representation of the colonist used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColonistSnapshot {
    /// Tile occupied by the colonist.
    pub tile: TilePosition,
    /// Current health.
    pub health: Health,
    /// Current facing.
    pub facing: Direction,
}

/// Immutable representation of a single zombie's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZombieSnapshot {
    /// Unique identifier assigned to the zombie.
    pub id: ZombieId,
    /// Tile currently occupied by the zombie.
    pub tile: TilePosition,
    /// Current health.
    pub health: Health,
    /// Current facing.
    pub facing: Direction,
    /// Indicates whether the zombie's action counter permits acting this tick.
    pub ready_to_act: bool,
}

/// Read-only snapshot describing all zombies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZombieView {
    snapshots: Vec<ZombieSnapshot>,
}

impl ZombieView {
    /// Creates a new zombie view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ZombieSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured zombie snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ZombieSnapshot> {
        self.snapshots.iter()
    }

    /// Number of zombies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no zombies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a single structure used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructureSnapshot {
    /// Identifier allocated to the structure by the world.
    pub id: StructureId,
    /// Tile occupied by the structure.
    pub tile: TilePosition,
    /// Current health.
    pub health: Health,
    /// Per-kind state.
    pub state: StructureState,
}

/// Read-only snapshot describing all structures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructureView {
    snapshots: Vec<StructureSnapshot>,
}

impl StructureView {
    /// Creates a new structure view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<StructureSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured structure snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &StructureSnapshot> {
        self.snapshots.iter()
    }
}

/// Immutable representation of a tree or rock used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceSnapshot {
    /// Identifier allocated to the node.
    pub id: ResourceId,
    /// Tile the node stands on.
    pub tile: TilePosition,
    /// Kind of node.
    pub kind: ResourceKind,
    /// Whether the node was cut down or mined.
    pub depleted: bool,
}

/// Immutable representation of a bullet in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletSnapshot {
    /// Tile the bullet occupies.
    pub tile: TilePosition,
    /// Travel direction.
    pub direction: Direction,
    /// Ticks the bullet has been travelling.
    pub age: u32,
}

/// Read-only economy state consumed by the builder system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EconomySnapshot {
    /// Resources on hand.
    pub stockpile: Stockpile,
    /// Blueprints available for construction, in catalog order.
    pub unlocked: Vec<Blueprint>,
    /// Blueprint currently selected.
    pub selected: Blueprint,
    /// Unspent skill points.
    pub skill_points: u32,
}

impl EconomySnapshot {
    /// Reports whether the blueprint is available for construction.
    #[must_use]
    pub fn is_unlocked(&self, blueprint: Blueprint) -> bool {
        self.unlocked.contains(&blueprint)
    }
}
