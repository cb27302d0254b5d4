use serde::{Deserialize, Serialize};

use crate::stone::StoneColor;


#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub profile_img: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeavePayload {
    #[serde(default)]
    pub reason: Option<String>,
}

// Server sends either a plain flag or the id of the winning user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Winner {
    Flag(bool),
    UserId(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SenderRole {
    Player,
    // Anything that is not a player is shown as a spectator.
    #[serde(other)]
    Spectator,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub sender_role: SenderRole,
    #[serde(default)]
    pub player_index: Option<i64>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerError {
    pub code: String,
    pub message: String,
}

// Some server paths send only an error code instead of a `{code, message}` object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorPayload {
    Detailed { code: String, message: String },
    Code(String),
}

impl From<ErrorPayload> for ServerError {
    fn from(payload: ErrorPayload) -> Self {
        match payload {
            ErrorPayload::Detailed { code, message } => ServerError { code, message },
            ErrorPayload::Code(code) => ServerError { message: code.clone(), code },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OmokServerEvent {
    Join(JoinPayload),
    Leave(LeavePayload),
    RoomWait,
    Countdown {
        sec: i64,
    },
    GameStart {
        first_turn: StoneColor,
        my_color: Option<StoneColor>, // `None` for spectators
    },
    MoveOk {
        x: i32,
        y: i32,
        color: StoneColor,
    },
    GameEnd {
        winner: Option<Winner>,
        reason: Option<String>,
    },
    Chat(ChatPayload),
    Error(ServerError),
    // Message kind this client does not know about. Kept (rather than failing to parse) so that
    // the dispatcher can report and drop it.
    Unknown {
        kind: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OmokClientEvent {
    Move { x: i32, y: i32 },
    Chat(String),
}
