//! Configuration utilities (ports, static assets, match parameters).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use std::{env, net::{Ipv4Addr, SocketAddr}};

use crate::game::{ConfigError, GameConfig};

/// Socket address to bind the server to.
///
/// Reads the `PORT` env var or defaults to 8080, binds to 0.0.0.0.
pub fn server_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, var_or("PORT", 8080)))
}

/// Directory holding the client bundle, `STATIC_DIR` or `./public`.
pub fn static_dir() -> PathBuf {
    env::var("STATIC_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("./public"))
}

/// Match parameters from `MINEDUEL_*` env vars, falling back to the defaults.
pub fn game_config() -> Result<GameConfig, ConfigError> {
    let defaults = GameConfig::default();
    let config = GameConfig {
        grid_size: var_or("MINEDUEL_GRID_SIZE", defaults.grid_size),
        mines_per_player: var_or("MINEDUEL_MINES_PER_PLAYER", defaults.mines_per_player),
        highland_cells: var_or("MINEDUEL_HIGHLAND_CELLS", defaults.highland_cells),
        wormholes: var_or("MINEDUEL_WORMHOLES", defaults.wormholes),
        stairways_per_layer: var_or("MINEDUEL_STAIRWAYS_PER_LAYER", defaults.stairways_per_layer),
        initial_hand: var_or("MINEDUEL_INITIAL_HAND", defaults.initial_hand),
        hand_cap: var_or("MINEDUEL_HAND_CAP", defaults.hand_cap),
        wormhole_delay: Duration::from_millis(var_or(
            "MINEDUEL_WORMHOLE_DELAY_MS",
            defaults.wormhole_delay.as_millis() as u64,
        )),
    };
    config.validate()?;
    Ok(config)
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparseable env var, using default");
            default
        }),
        Err(_) => default,
    }
}
