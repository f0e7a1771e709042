//! The growth engine: a bounded pool of road-builder agents depositing
//! brightness onto an [`IntensityGrid`].
//!
//! Each [`GrowthEngine::step`] tick runs, in order:
//! 1. Advance the step counter.
//! 2. If the scheduled bright-node step is reached, place a bright node
//!    (core + halo bloom, a handful of fresh agents) and reschedule.
//! 3. Update every live agent: deposit road intensity, occasionally add
//!    lights, maybe turn or branch, move, bounce off the edge inset with
//!    a life penalty, and sometimes respawn immediately on death.
//! 4. Apply the rare global decay pass.
//! 5. Safety net: if too few agents are alive, respawn dead slots so
//!    the road network keeps growing.
//!
//! All randomness flows through the injected [`Rng`], so a seeded RNG
//! makes a full run bit-reproducible.

use glam::IVec2;
use rand::Rng;

use crate::agent::{Agent, CARDINALS, random_cardinal, turn_left, turn_right};
use crate::config::Config;
use crate::grid::IntensityGrid;

/// Random cells examined when choosing a respawn anchor.
const RESPAWN_SAMPLES: u32 = 15;
/// Respawn anchors must be lit but not yet saturated.
const RESPAWN_SATURATION_LIMIT: u8 = 200;
/// Random cells examined when choosing a bright-node center.
const BRIGHT_NODE_SAMPLES: u32 = 20;
/// Agents spawned around a fresh bright node, capacity permitting.
const BRIGHT_SPAWN_COUNT: usize = 5;
/// Half-width of the spawn window around a bright-node center.
const BRIGHT_SPAWN_SPREAD: i32 = 10;
/// Life lost when an agent bounces off the edge inset.
const BOUNCE_LIFE_PENALTY: u8 = 30;
/// Life of the four agents seeded at reset.
const SEED_AGENT_LIFE: u8 = 255;

/// Agent-based procedural city generator.
///
/// Owns the intensity grid, a fixed-capacity agent pool, and the
/// simulation clock. The pool is an arena: slots are appended up to
/// `cfg.max_agents` and then only ever reused in place; a dead slot
/// (`life == 0`) waits for a respawn. The host calls [`step`] some
/// number of times per frame and then reads cells back with [`get`]
/// (or [`IntensityGrid::cells`] on the public `grid` field).
///
/// No operation after construction can fail: a full pool drops spawn
/// requests, deposits saturate, and positions clamp.
///
/// [`step`]: GrowthEngine::step
/// [`get`]: GrowthEngine::get
pub struct GrowthEngine<R: Rng> {
    /// The brightness field the simulation draws into.
    pub grid: IntensityGrid,
    /// Agent arena; indices stay valid for the engine's lifetime.
    pub agents: Vec<Agent>,
    /// Tunable dynamics, safe to edit between steps.
    pub cfg: Config,

    seed: IVec2,
    steps: u64,
    next_bright_node: u64,
    rng: R,
}

impl<R: Rng> GrowthEngine<R> {
    /// Creates an engine with a `width × height` grid and immediately
    /// performs a [`reset`](GrowthEngine::reset).
    ///
    /// ### Parameters
    /// - `width`, `height` - Grid dimensions; at least 5 each so the
    ///   edge-inset agent region `[1, W-2] × [1, H-2]` and the respawn
    ///   sampling window are nonempty.
    /// - `cfg` - Simulation parameters.
    /// - `rng` - The engine's sole randomness source; pass a seeded RNG
    ///   for reproducible runs.
    ///
    /// ### Panics
    /// Panics if a dimension is below 5.
    pub fn new(width: usize, height: usize, cfg: Config, rng: R) -> Self {
        assert!(
            width >= 5 && height >= 5,
            "grid too small for the edge-inset agent region"
        );

        let mut engine = Self {
            grid: IntensityGrid::new(width, height),
            agents: Vec::with_capacity(cfg.max_agents),
            cfg,
            seed: IVec2::ZERO,
            steps: 0,
            next_bright_node: 0,
            rng,
        };
        engine.reset();
        engine
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Intensity at `(x, y)`; panics out of range, like
    /// [`IntensityGrid::get`].
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.grid.get(x, y)
    }

    /// Ticks elapsed since the last reset.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Step at which the next bright-node event is due.
    #[inline]
    pub fn next_bright_node_step(&self) -> u64 {
        self.next_bright_node
    }

    /// Number of agents currently alive.
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Returns the simulation to its initial state.
    ///
    /// Clears the grid, empties the pool, seeds four full-life agents
    /// at the grid center (one per cardinal direction), applies the
    /// initial "downtown" bloom, zeroes the step counter, and draws the
    /// first bright-node step from `[bright_first_min, bright_first_max)`.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.agents.clear();

        self.seed = IVec2::new(self.width() as i32 / 2, self.height() as i32 / 2);
        for dir in CARDINALS {
            self.add_agent(self.seed, dir, SEED_AGENT_LIFE);
        }

        self.grid.bloom(
            self.seed.x,
            self.seed.y,
            self.cfg.seed_bloom_radius,
            self.cfg.seed_bloom_strength,
        );

        self.steps = 0;
        self.next_bright_node = self
            .rng
            .random_range(self.cfg.bright_first_min..self.cfg.bright_first_max);
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) {
        self.steps += 1;

        if self.steps >= self.next_bright_node {
            self.place_bright_node();
            self.next_bright_node = self.steps
                + self
                    .rng
                    .random_range(self.cfg.bright_interval_min..self.cfg.bright_interval_max);
        }

        // Agents branched during this pass land at the end of the pool
        // and are visited in the same tick, in pool order.
        let mut i = 0;
        while i < self.agents.len() {
            if !self.agents[i].is_alive() {
                i += 1;
                continue;
            }
            let mut a = self.agents[i];

            // Road mark, plus the occasional light along it.
            self.grid
                .deposit(a.pos.x as usize, a.pos.y as usize, self.cfg.road_strength);
            if self.rng.random_range(0..100) < self.cfg.light_chance_pct {
                self.grid
                    .deposit(a.pos.x as usize, a.pos.y as usize, self.cfg.light_strength);
            }

            // One draw decides between a left turn, a right turn, or
            // carrying straight on.
            let r = self.rng.random_range(0..1000);
            if r < self.cfg.turn_chance_pm {
                a.dir = turn_left(a.dir);
            } else if r < self.cfg.turn_chance_pm * 2 {
                a.dir = turn_right(a.dir);
            }

            // Branch a side road when the pool has room. The capacity
            // check comes first so a full pool consumes no randomness.
            if self.agents.len() < self.cfg.max_agents
                && self.rng.random_range(0..1000) < self.cfg.branch_chance_pm
            {
                let dir = if self.rng.random_range(0..2) == 0 {
                    turn_left(a.dir)
                } else {
                    turn_right(a.dir)
                };
                let life = self
                    .rng
                    .random_range(self.cfg.branch_life_min..self.cfg.branch_life_max);
                self.agents.push(Agent::new(a.pos, dir, life));
            }

            a.pos += a.dir;

            // Bounce off the one-cell edge inset with a life penalty;
            // otherwise age by one tick.
            let max = IVec2::new(self.width() as i32 - 2, self.height() as i32 - 2);
            if a.pos.x < 1 || a.pos.y < 1 || a.pos.x > max.x || a.pos.y > max.y {
                a.pos = a.pos.clamp(IVec2::ONE, max);
                a.dir = -a.dir;
                a.life = a.life.saturating_sub(BOUNCE_LIFE_PENALTY);
            } else {
                a.life -= 1;
            }

            // Agents that just died sometimes come straight back near
            // the lit fringe instead of waiting for the safety net.
            if a.life == 0 && self.rng.random_range(0..100) < self.cfg.respawn_chance_pct {
                a = self.respawned();
            }

            self.agents[i] = a;
            i += 1;
        }

        if self.cfg.decay_interval > 0 && self.steps % self.cfg.decay_interval == 0 {
            self.grid.decay(self.cfg.decay_amount);
        }

        // Safety net: keep enough agents drawing roads even after an
        // unlucky run of expirations.
        let mut active = self.alive_count();
        if active < self.cfg.min_active {
            for i in 0..self.agents.len() {
                if active >= self.cfg.target_active {
                    break;
                }
                if !self.agents[i].is_alive() {
                    self.agents[i] = self.respawned();
                    active += 1;
                }
            }
        }
    }

    /// Appends an agent if the pool has room; otherwise a no-op.
    fn add_agent(&mut self, pos: IVec2, dir: IVec2, life: u8) {
        if self.agents.len() >= self.cfg.max_agents {
            return;
        }
        self.agents.push(Agent::new(pos, dir, life));
    }

    /// Builds a replacement agent near the fringe of the lit city.
    ///
    /// Samples random cells and anchors on the brightest one that is
    /// lit but not saturated, which biases regrowth toward the edges of
    /// existing districts; a fully dark (or fully saturated) sample set
    /// falls back to the seed point.
    fn respawned(&mut self) -> Agent {
        let w = self.width() as i32;
        let h = self.height() as i32;

        let mut best = self.seed;
        let mut best_val = 0u8;
        for _ in 0..RESPAWN_SAMPLES {
            let x = self.rng.random_range(2..w - 2);
            let y = self.rng.random_range(2..h - 2);
            let v = self.grid.get(x as usize, y as usize);
            if v > best_val && v < RESPAWN_SATURATION_LIMIT {
                best_val = v;
                best = IVec2::new(x, y);
            }
        }

        let dir = random_cardinal(&mut self.rng);
        let life = self
            .rng
            .random_range(self.cfg.respawn_life_min..self.cfg.respawn_life_max);
        Agent::new(best, dir, life)
    }

    /// Drops a high-intensity cluster (stadium / dense district).
    ///
    /// The center is the brightest of a handful of random samples
    /// (first-found wins ties; seed point if everything sampled is
    /// dark). Applies the dense core and soft halo blooms, then spawns
    /// up to [`BRIGHT_SPAWN_COUNT`] agents in a window around the
    /// center so new roads radiate out of the district.
    fn place_bright_node(&mut self) {
        let w = self.width() as i32;
        let h = self.height() as i32;

        let mut center = self.seed;
        let mut best_val = 0u8;
        for _ in 0..BRIGHT_NODE_SAMPLES {
            let x = self.rng.random_range(2..w - 2);
            let y = self.rng.random_range(2..h - 2);
            let v = self.grid.get(x as usize, y as usize);
            if v > best_val {
                best_val = v;
                center = IVec2::new(x, y);
            }
        }

        self.grid.bloom(
            center.x,
            center.y,
            self.cfg.bright_core_radius,
            self.cfg.bright_core_strength,
        );
        self.grid.bloom(
            center.x,
            center.y,
            self.cfg.bright_halo_radius,
            self.cfg.bright_halo_strength,
        );

        for _ in 0..BRIGHT_SPAWN_COUNT {
            if self.agents.len() >= self.cfg.max_agents {
                break;
            }
            let off = IVec2::new(
                self.rng.random_range(-BRIGHT_SPAWN_SPREAD..=BRIGHT_SPAWN_SPREAD),
                self.rng.random_range(-BRIGHT_SPAWN_SPREAD..=BRIGHT_SPAWN_SPREAD),
            );
            let pos = (center + off).clamp(IVec2::splat(2), IVec2::new(w - 3, h - 3));
            let dir = random_cardinal(&mut self.rng);
            let life = self
                .rng
                .random_range(self.cfg.respawn_life_min..self.cfg.respawn_life_max);
            self.agents.push(Agent::new(pos, dir, life));
        }
    }
}
