use rand::Rng;

use super::state::Position;

/// Kind of hazard sitting on the board. Each kind carries a fixed amount of
/// damage dealt when the snake runs into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Bush,
    Tree,
    Rock,
}

impl ObstacleKind {
    /// Life subtracted when the snake hits this kind
    pub fn damage(&self) -> f32 {
        match self {
            ObstacleKind::Bush => 5.0,
            ObstacleKind::Tree => 10.0,
            ObstacleKind::Rock => 20.0,
        }
    }

    /// Map a uniform roll in [0, 1) onto the spawn weights:
    /// 75% bush, 20% tree, 5% rock
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.75 {
            ObstacleKind::Bush
        } else if roll < 0.95 {
            ObstacleKind::Tree
        } else {
            ObstacleKind::Rock
        }
    }

    /// Draw a kind with the spawn weights
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen::<f64>())
    }
}

/// A single-use hazard cell, removed on contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub pos: Position,
    pub kind: ObstacleKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_values() {
        assert_eq!(ObstacleKind::Bush.damage(), 5.0);
        assert_eq!(ObstacleKind::Tree.damage(), 10.0);
        assert_eq!(ObstacleKind::Rock.damage(), 20.0);
    }

    #[test]
    fn test_spawn_weights() {
        assert_eq!(ObstacleKind::from_roll(0.0), ObstacleKind::Bush);
        assert_eq!(ObstacleKind::from_roll(0.7499), ObstacleKind::Bush);
        assert_eq!(ObstacleKind::from_roll(0.75), ObstacleKind::Tree);
        assert_eq!(ObstacleKind::from_roll(0.9499), ObstacleKind::Tree);
        assert_eq!(ObstacleKind::from_roll(0.95), ObstacleKind::Rock);
        assert_eq!(ObstacleKind::from_roll(0.9999), ObstacleKind::Rock);
    }
}
