//! Simulation configuration.

/// Configuration for a batch of simulated events.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent event simulations to run
    pub num_runs: u32,

    /// Rounds played per simulated event
    pub rounds_per_run: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Participants cash out once the multiplier reaches a personal target,
    /// drawn uniformly from this window per round
    pub target_min: f64,
    pub target_max: f64,

    /// Log verbosity (0 = silent, 1 = summary)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            rounds_per_run: 300,
            seed: None,
            target_min: 1.2,
            target_max: 4.5,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking how long stock survives a busy event
    pub fn depletion_test(rounds_per_run: u32) -> Self {
        Self {
            num_runs: 50,
            rounds_per_run,
            ..Default::default()
        }
    }

    /// Quick config for greedy participants chasing the top tiers
    pub fn greedy_crowd() -> Self {
        Self {
            target_min: 3.0,
            target_max: 8.0,
            ..Default::default()
        }
    }
}
