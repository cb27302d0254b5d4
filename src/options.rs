use std::time::Duration;

use serde::{Deserialize, Serialize};


pub const DEFAULT_LOBBY_LOCATION: &str = "/omok/lobby";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    // How long a player's chat message stays above their panel.
    #[serde(with = "humantime_serde")]
    pub bubble_duration: Duration,
    // Pause between the game-over notice and leaving for the lobby.
    #[serde(with = "humantime_serde")]
    pub navigation_delay: Duration,
    pub lobby_location: String,
    // Lets the client tell whether a `GAME_END` winner id is us. Without it a player reads any
    // winner id as their own win.
    pub my_user_id: Option<i64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            bubble_duration: Duration::from_secs(3),
            navigation_delay: Duration::from_millis(300),
            lobby_location: DEFAULT_LOBBY_LOCATION.to_owned(),
            my_user_id: None,
        }
    }
}
