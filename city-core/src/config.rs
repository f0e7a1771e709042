/// Tunable parameters for the growth dynamics.
///
/// Defaults reproduce the original night-city behavior; the viewer
/// edits these live. Chances ending in `_pct` are percentages drawn
/// over `[0, 100)`, chances ending in `_pm` are per-mill draws over
/// `[0, 1000)`. Life and scheduling ranges are half-open `[min, max)`
/// and require `min < max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Agent pool capacity; spawns beyond it are silently dropped.
    pub max_agents: usize,

    /// Intensity deposited at an agent's cell every tick.
    pub road_strength: u8,
    /// Extra intensity occasionally deposited along roads.
    pub light_strength: u8,
    /// Chance per tick of the extra light deposit.
    pub light_chance_pct: u32,

    /// Chance per tick of a 90° turn, per side; left and right are
    /// mutually exclusive outcomes of one draw over `[0, 1000)`.
    pub turn_chance_pm: u32,
    /// Chance per tick of branching a new agent off sideways.
    pub branch_chance_pm: u32,
    /// Life range for branched agents.
    pub branch_life_min: u8,
    pub branch_life_max: u8,

    /// Chance of an immediate respawn the tick an agent dies.
    pub respawn_chance_pct: u32,
    /// Life range for respawned and bright-node agents.
    pub respawn_life_min: u8,
    pub respawn_life_max: u8,

    /// Uniform fade subtracted from every cell each decay pass.
    /// 0 keeps the city fully persistent.
    pub decay_amount: u8,
    /// Steps between decay passes; 0 disables decay entirely.
    pub decay_interval: u64,

    /// Safety net: when fewer than `min_active` agents are alive, dead
    /// slots are respawned until `target_active` are alive.
    pub min_active: usize,
    pub target_active: usize,

    /// Initial "downtown" bloom applied at reset.
    pub seed_bloom_radius: i32,
    pub seed_bloom_strength: u8,

    /// Step window for the first bright-node event after reset.
    pub bright_first_min: u64,
    pub bright_first_max: u64,
    /// Step window between subsequent bright-node events.
    pub bright_interval_min: u64,
    pub bright_interval_max: u64,
    /// Dense core bloom of a bright node.
    pub bright_core_radius: i32,
    pub bright_core_strength: u8,
    /// Wider, softer halo bloom around the core.
    pub bright_halo_radius: i32,
    pub bright_halo_strength: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_agents: 60,
            road_strength: 35,
            light_strength: 45,
            light_chance_pct: 25,
            turn_chance_pm: 40,
            branch_chance_pm: 30,
            branch_life_min: 140,
            branch_life_max: 240,
            respawn_chance_pct: 15,
            respawn_life_min: 200,
            respawn_life_max: 255,
            decay_amount: 1,
            decay_interval: 500,
            min_active: 8,
            target_active: 12,
            seed_bloom_radius: 6,
            seed_bloom_strength: 120,
            bright_first_min: 400,
            bright_first_max: 1000,
            bright_interval_min: 600,
            bright_interval_max: 1800,
            bright_core_radius: 10,
            bright_core_strength: 220,
            bright_halo_radius: 18,
            bright_halo_strength: 90,
        }
    }
}
