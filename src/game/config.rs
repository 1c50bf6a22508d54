use serde::{Deserialize, Serialize};

/// Configuration for a game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the level-1 grid
    pub base_grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Score awarded per food item
    pub food_points: u32,
    /// Life regained per food item
    pub food_life_bonus: f32,
    /// Upper bound on life
    pub max_life: f32,
    /// Score interval between level-ups
    pub level_score_step: u32,
    /// Highest score at which a level-up can still trigger
    pub level_score_cap: u32,
    /// Starting tick rate in ticks per second
    pub initial_tick_rate: u32,
    /// Lowest tick rate the speed controls allow
    pub min_tick_rate: u32,
    /// Highest tick rate the speed controls allow
    pub max_tick_rate: u32,
    /// Period of the hazard spawn timer, in milliseconds
    pub obstacle_period_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_grid_size: 10,
            initial_snake_length: 1,
            food_points: 10,
            food_life_bonus: 0.2,
            max_life: 100.0,
            level_score_step: 70,
            level_score_cap: 420,
            initial_tick_rate: 3,
            min_tick_rate: 1,
            max_tick_rate: 10,
            obstacle_period_ms: 10_000,
        }
    }
}

impl GameConfig {
    /// Default rules with a custom starting tick rate
    pub fn with_tick_rate(tick_rate: u32) -> Self {
        Self {
            initial_tick_rate: tick_rate,
            ..Default::default()
        }
    }

    /// Grid side length for a given level
    pub fn grid_size_for_level(&self, level: u32) -> usize {
        self.base_grid_size + level.saturating_sub(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.base_grid_size, 10);
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.food_points, 10);
        assert_eq!(config.level_score_step, 70);
        assert_eq!(config.level_score_cap, 420);
    }

    #[test]
    fn test_custom_tick_rate() {
        let config = GameConfig::with_tick_rate(7);
        assert_eq!(config.initial_tick_rate, 7);
        assert_eq!(config.base_grid_size, 10);
    }

    #[test]
    fn test_grid_size_per_level() {
        let config = GameConfig::default();
        // Grid grows by one cell per level: level + 9 with the default base
        assert_eq!(config.grid_size_for_level(1), 10);
        assert_eq!(config.grid_size_for_level(2), 11);
        assert_eq!(config.grid_size_for_level(7), 16);
    }
}
