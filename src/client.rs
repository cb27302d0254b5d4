use std::sync::mpsc;

use instant::Instant;

use crate::board::{Board, InvalidPlacement};
use crate::coord::Coord;
use crate::event::{ChatPayload, OmokClientEvent, OmokServerEvent, SenderRole, ServerError, Winner};
use crate::expiry::ExpiryTimer;
use crate::notice::{BubbleSlot, NoticeBoard};
use crate::options::SessionOptions;
use crate::render::{RenderError, RenderSurface, Renderer};
use crate::stone::StoneColor;


pub const MAX_CHAT_MESSAGE_LENGTH: usize = 500;

pub const WAITING_STATUS: &str = "Waiting for opponent...";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GamePhase {
    Idle,
    Waiting,
    Countdown,
    Playing,
    Ended,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    Victory,
    Defeat,
    Reason(String),
    Unspecified,
}

impl GameOutcome {
    pub fn to_readable_string(&self) -> String {
        match self {
            GameOutcome::Victory => "Game over! You won!".to_owned(),
            GameOutcome::Defeat => "Game over! You lost.".to_owned(),
            GameOutcome::Reason(reason) => format!("Game over: {reason}"),
            GameOutcome::Unspecified => "Game over.".to_owned(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    None,
    GameStarted,
    StonePlaced { coord: Coord, color: StoneColor },
    GameOver(GameOutcome),
    ServerError(ServerError),
    NavigatedTo(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    // Server confirmed a move that contradicts the local board.
    InvalidPlacement(InvalidPlacement),
    // Server confirmed a move that cannot be shown, e.g. before the game started.
    Render(RenderError),
    UnknownKind(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CommandError {
    NoGameInProgress,
    NoSuchCell(Coord),
    IllegalPlacement(InvalidPlacement),
    EmptyChatMessage,
    ChatMessageTooLong,
    NotConnected,
}

// Everything the client knows about the current room. Server events are applied one at a time via
// `process_server_event`; time-based effects (hiding chat bubbles, leaving the room after the game)
// happen in `tick`. Server is authoritative: the state here is only a mirror used for rendering.
pub struct ClientState<S> {
    options: SessionOptions,
    events_tx: mpsc::Sender<OmokClientEvent>,
    phase: GamePhase,
    // Set by the first `GAME_START` that carries it and kept until `reset`.
    my_color: Option<StoneColor>,
    turn: Option<StoneColor>,
    board: Board,
    renderer: Renderer<S>,
    notices: NoticeBoard,
    navigation_timer: ExpiryTimer,
}

impl<S: RenderSurface> ClientState<S> {
    pub fn new(
        options: SessionOptions, surface: S, events_tx: mpsc::Sender<OmokClientEvent>,
    ) -> Self {
        ClientState {
            options,
            events_tx,
            phase: GamePhase::Idle,
            my_color: None,
            turn: None,
            board: Board::new(),
            renderer: Renderer::new(surface),
            notices: NoticeBoard::new(),
            navigation_timer: ExpiryTimer::new(),
        }
    }

    pub fn options(&self) -> &SessionOptions { &self.options }
    pub fn phase(&self) -> GamePhase { self.phase }
    pub fn my_color(&self) -> Option<StoneColor> { self.my_color }
    pub fn turn(&self) -> Option<StoneColor> { self.turn }
    pub fn board(&self) -> &Board { &self.board }
    pub fn notices(&self) -> &NoticeBoard { &self.notices }
    pub fn surface(&self) -> &S { self.renderer.surface() }
    pub fn surface_mut(&mut self) -> &mut S { self.renderer.surface_mut() }
    pub fn is_my_turn(&self) -> bool { self.my_color.is_some() && self.my_color == self.turn }
    pub fn navigation_pending(&self) -> bool { self.navigation_timer.is_armed() }

    // Forgets the session: the next `GAME_START` may bind a new color. The surface is kept, and
    // everything the session has drawn on it is taken down.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.my_color = None;
        self.turn = None;
        self.board.reset();
        self.notices.clear(self.renderer.surface_mut());
        self.navigation_timer.cancel();
        self.renderer.clear_stones();
        self.renderer.highlight_active_player(None);
        self.renderer.clear_countdown();
        self.renderer.show_status("");
    }

    pub fn activate_cell(&mut self, coord: Coord) -> Result<(), CommandError> {
        if self.phase != GamePhase::Playing {
            return Err(CommandError::NoGameInProgress);
        }
        self.renderer.check_cell(coord).map_err(|_| CommandError::NoSuchCell(coord))?;
        self.board.check_placement(coord).map_err(CommandError::IllegalPlacement)?;
        self.send(OmokClientEvent::Move { x: coord.x, y: coord.y })
    }

    pub fn send_chat(&mut self, text: &str) -> Result<(), CommandError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CommandError::EmptyChatMessage);
        }
        if text.chars().count() > MAX_CHAT_MESSAGE_LENGTH {
            return Err(CommandError::ChatMessageTooLong);
        }
        self.send(OmokClientEvent::Chat(text.to_owned()))
    }

    pub fn process_server_event(
        &mut self, event: OmokServerEvent, now: Instant,
    ) -> Result<NotableEvent, EventError> {
        use OmokServerEvent::*;
        match event {
            Join(payload) => {
                log::info!("Player joined: {:?}", payload.user_id);
                Ok(NotableEvent::None)
            }
            Leave(payload) => {
                log::info!("Player left: {:?}", payload.reason);
                Ok(NotableEvent::None)
            }
            RoomWait => {
                self.renderer.clear_countdown();
                self.renderer.show_status(WAITING_STATUS);
                self.phase = GamePhase::Waiting;
                Ok(NotableEvent::None)
            }
            Countdown { sec } => {
                if sec < 0 {
                    log::warn!("Negative countdown: {sec}");
                }
                self.renderer.show_countdown(sec);
                self.phase = GamePhase::Countdown;
                Ok(NotableEvent::None)
            }
            GameStart { first_turn, my_color } => {
                self.start_game(first_turn, my_color);
                Ok(NotableEvent::GameStarted)
            }
            MoveOk { x, y, color } => {
                let coord = Coord::new(x, y);
                self.apply_move(coord, color)?;
                Ok(NotableEvent::StonePlaced { coord, color })
            }
            GameEnd { winner, reason } => {
                let outcome = self.game_outcome(winner, reason);
                log::info!("Game over: {outcome:?}");
                let text = outcome.to_readable_string();
                self.renderer.show_status(&text);
                self.renderer.show_alert(&text);
                self.navigation_timer.arm(now, self.options.navigation_delay);
                self.phase = GamePhase::Ended;
                Ok(NotableEvent::GameOver(outcome))
            }
            Chat(payload) => {
                self.show_chat(payload, now);
                Ok(NotableEvent::None)
            }
            Error(err) => {
                log::warn!("Server error {}: {}", err.code, err.message);
                self.renderer.show_alert(&err.message);
                Ok(NotableEvent::ServerError(err))
            }
            Unknown { kind } => {
                log::warn!("Dropping message of unknown type {kind:?}");
                Err(EventError::UnknownKind(kind))
            }
        }
    }

    pub fn tick(&mut self, now: Instant) -> NotableEvent {
        self.notices.tick(self.renderer.surface_mut(), now);
        if self.navigation_timer.fire_if_expired(now) {
            let location = self.options.lobby_location.clone();
            log::info!("Leaving for {location}");
            self.renderer.navigate(&location);
            return NotableEvent::NavigatedTo(location);
        }
        NotableEvent::None
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.notices.next_deadline().into_iter().chain(self.navigation_timer.deadline()).min()
    }

    fn send(&mut self, event: OmokClientEvent) -> Result<(), CommandError> {
        self.events_tx.send(event).map_err(|_| CommandError::NotConnected)
    }

    fn start_game(&mut self, first_turn: StoneColor, my_color: Option<StoneColor>) {
        match (self.my_color, my_color) {
            (None, Some(color)) => {
                log::info!("Playing as {color}");
                self.my_color = Some(color);
            }
            (Some(bound), Some(color)) if bound != color => {
                log::warn!("Ignoring color {color}: already playing as {bound}");
            }
            _ => {}
        }
        self.board.reset();
        self.renderer.render_board_grid();
        self.renderer.clear_countdown();
        self.renderer.show_status(&match self.my_color {
            Some(color) => format!("You play {color}"),
            None => "Spectating".to_owned(),
        });
        self.turn = Some(first_turn);
        self.renderer.highlight_active_player(self.turn);
        self.phase = GamePhase::Playing;
    }

    // Rejected moves leave both the board and the picture untouched.
    fn apply_move(&mut self, coord: Coord, color: StoneColor) -> Result<(), EventError> {
        if self.phase != GamePhase::Playing {
            log::warn!("Move at {coord:?} confirmed outside of a game ({:?})", self.phase);
        }
        let check = self
            .board
            .check_placement(coord)
            .map_err(EventError::InvalidPlacement)
            .and_then(|()| self.renderer.check_cell(coord).map(|_| ()).map_err(EventError::Render));
        if let Err(err) = check {
            log::error!("Cannot apply move {color} at {coord:?}: {err:?}");
            return Err(err);
        }
        self.board.place(coord, color).map_err(EventError::InvalidPlacement)?;
        self.renderer.draw_stone(coord, color).map_err(EventError::Render)?;
        self.turn = Some(self.turn.unwrap_or(color).opposite());
        self.renderer.highlight_active_player(self.turn);
        self.phase = GamePhase::Playing;
        Ok(())
    }

    fn show_chat(&mut self, payload: ChatPayload, now: Instant) {
        let ChatPayload { sender_role, player_index, message } = payload;
        let surface = self.renderer.surface_mut();
        match sender_role {
            SenderRole::Player => match player_index.and_then(BubbleSlot::from_player_index) {
                Some(slot) => self.notices.show_bubble(
                    surface,
                    slot,
                    &message,
                    self.options.bubble_duration,
                    now,
                ),
                // Only 1 and 2 have a bubble; other indices are not folded into player 2.
                None => log::warn!("Chat from unknown player index {player_index:?}"),
            },
            SenderRole::Spectator => self.notices.append_log(surface, &message),
        }
    }

    fn game_outcome(&self, winner: Option<Winner>, reason: Option<String>) -> GameOutcome {
        match winner {
            Some(Winner::Flag(true)) => GameOutcome::Victory,
            // Zero is not a valid user id: the server uses it for "no winner".
            Some(Winner::UserId(id)) if id != 0 => {
                match (self.options.my_user_id, self.my_color) {
                    (Some(me), _) if me == id => GameOutcome::Victory,
                    (Some(_), _) => GameOutcome::Defeat,
                    (None, Some(_)) => GameOutcome::Victory,
                    (None, None) => GameOutcome::Unspecified,
                }
            }
            Some(Winner::Flag(false) | Winner::UserId(_)) | None => match reason {
                Some(reason) => GameOutcome::Reason(reason),
                None => GameOutcome::Unspecified,
            },
        }
    }
}
