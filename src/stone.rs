use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};


#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Display, Enum, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum StoneColor {
    Black,
    White,
}

impl StoneColor {
    pub fn opposite(self) -> StoneColor {
        match self {
            StoneColor::Black => StoneColor::White,
            StoneColor::White => StoneColor::Black,
        }
    }

    pub fn side(self) -> PlayerSide {
        match self {
            StoneColor::Black => PlayerSide::Left,
            StoneColor::White => PlayerSide::Right,
        }
    }
}

// Player panels around the board. Black always sits on the left.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter)]
pub enum PlayerSide {
    Left,
    Right,
}
