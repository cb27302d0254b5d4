// Wire format: every message is a JSON object `{"type": <KIND>, "payload": <kind-specific>}`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::event::{ChatPayload, ErrorPayload, OmokClientEvent, OmokServerEvent, Winner};
use crate::stone::StoneColor;


#[derive(Debug)]
pub enum CommunicationError {
    Serde(serde_json::Error),
}

impl From<serde_json::Error> for CommunicationError {
    fn from(err: serde_json::Error) -> Self { CommunicationError::Serde(err) }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Deserialize)]
struct CountdownPayload {
    sec: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameStartPayload {
    first_turn: StoneColor,
    #[serde(default)]
    my_color: Option<StoneColor>,
}

#[derive(Deserialize)]
struct MoveOkPayload {
    x: i32,
    y: i32,
    color: StoneColor,
}

#[derive(Deserialize)]
struct GameEndPayload {
    #[serde(default)]
    winner: Option<Winner>,
    #[serde(default)]
    reason: Option<String>,
}

// Parses one text frame. Unknown kinds are not an error here: they become
// `OmokServerEvent::Unknown`. A known kind with a malformed payload is.
pub fn parse_server_event(s: &str) -> Result<OmokServerEvent, CommunicationError> {
    let Envelope { kind, payload } = serde_json::from_str(s)?;
    use OmokServerEvent::*;
    let event = match kind.as_str() {
        "JOIN" => Join(parse_payload(payload)?),
        "LEAVE" => Leave(parse_payload(payload)?),
        "ROOM_WAIT" => RoomWait,
        "COUNTDOWN" => {
            let CountdownPayload { sec } = parse_payload(payload)?;
            Countdown { sec }
        }
        "GAME_START" => {
            let GameStartPayload { first_turn, my_color } = parse_payload(payload)?;
            GameStart { first_turn, my_color }
        }
        "MOVE_OK" => {
            let MoveOkPayload { x, y, color } = parse_payload(payload)?;
            MoveOk { x, y, color }
        }
        "GAME_END" => {
            let GameEndPayload { winner, reason } = parse_payload(payload)?;
            GameEnd { winner, reason }
        }
        "CHAT" => Chat(parse_payload::<ChatPayload>(payload)?),
        "ERROR" => Error(parse_payload::<ErrorPayload>(payload)?.into()),
        _ => Unknown { kind },
    };
    Ok(event)
}

pub fn serialize_client_event(event: &OmokClientEvent) -> Result<String, CommunicationError> {
    Ok(serde_json::to_string(event)?)
}

// Missing payload is treated as an empty object, so that payloads with only optional fields can
// be omitted entirely.
fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    let payload = match payload {
        Value::Null => Value::Object(Default::default()),
        v => v,
    };
    serde_json::from_value(payload)
}
