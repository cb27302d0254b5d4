use std::path::Path;

use anyhow::Context;
use omok_client::options::SessionOptions;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientRole {
    Player,
    Spectator,
}

impl ClientRole {
    pub fn as_query_value(self) -> &'static str {
        match self {
            ClientRole::Player => "player",
            ClientRole::Spectator => "spectator",
        }
    }
}

pub struct ClientConfig {
    pub server_address: String,
    pub room_id: String,
    pub role: ClientRole,
    // Value of the server's `JSESSIONID` cookie: the server finds the user by HTTP session.
    pub session_cookie: Option<String>,
    pub session_options: SessionOptions,
}

impl ClientConfig {
    pub fn game_url(&self) -> String {
        format!(
            "ws://{}/omok/ws/game/{}?role={}",
            self.server_address,
            self.room_id,
            self.role.as_query_value()
        )
    }
}

// File content is a yaml-serialized `SessionOptions`; missing fields keep their defaults.
pub fn read_session_options(path: &Path) -> anyhow::Result<SessionOptions> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'.", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{}'.", path.display()))
}
