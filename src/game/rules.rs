//! Match parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Tunable parameters for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side of the square grid.
    pub grid_size: usize,
    pub mines_per_player: usize,
    pub highland_cells: usize,
    pub wormholes: usize,
    /// Stairways are drawn per layer, so a board carries twice this many.
    pub stairways_per_layer: usize,
    pub initial_hand: usize,
    pub hand_cap: usize,
    /// Presentation pause between the two wormhole broadcasts.
    #[serde(with = "millis")]
    pub wormhole_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            mines_per_player: 3,
            highland_cells: 30,
            wormholes: 4,
            stairways_per_layer: 4,
            initial_hand: 4,
            hand_cap: 5,
            wormhole_delay: Duration::from_millis(1500),
        }
    }
}

impl GameConfig {
    pub fn cell_count(&self) -> usize { self.grid_size * self.grid_size }

    pub fn total_mines(&self) -> usize { self.mines_per_player * 2 }

    pub fn total_stairways(&self) -> usize { self.stairways_per_layer * 2 }

    /// Checks that a board with these parameters can actually be generated
    /// and filled with every player's mines.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        let cells = self.cell_count();
        if self.highland_cells > cells {
            return Err(ConfigError::TooMuchHighland { highland: self.highland_cells, cells });
        }
        let ground = cells - self.highland_cells;
        if self.stairways_per_layer > ground || self.stairways_per_layer > self.highland_cells {
            return Err(ConfigError::TooManyStairways { per_layer: self.stairways_per_layer });
        }
        let free = cells - self.total_stairways();
        if self.wormholes > free {
            return Err(ConfigError::TooManyWormholes { wormholes: self.wormholes, free });
        }
        let plain = free - self.wormholes;
        if self.total_mines() > plain {
            return Err(ConfigError::TooManyMines { mines: self.total_mines(), free: plain });
        }
        if self.hand_cap == 0 {
            return Err(ConfigError::ZeroHandCap);
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_more_stairways_than_highland() {
        let config = GameConfig { highland_cells: 3, stairways_per_layer: 4, ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::TooManyStairways { per_layer: 4 }));
    }

    #[test]
    fn rejects_mines_that_cannot_fit() {
        let config = GameConfig {
            grid_size: 3,
            highland_cells: 4,
            stairways_per_layer: 1,
            wormholes: 2,
            mines_per_player: 3,
            ..GameConfig::default()
        };
        // 9 cells - 2 stairways - 2 wormholes leaves 5 plain cells for 6 mines
        assert_eq!(config.validate(), Err(ConfigError::TooManyMines { mines: 6, free: 5 }));
    }
}
