// Improvement potential. Drive the console front end against a scripted WebSocket server.

mod common;

use std::time::Duration;

use common::*;
use omok_client::board::InvalidPlacement;
use omok_client::client::{
    CommandError, EventError, GameOutcome, GamePhase, NotableEvent, WAITING_STATUS,
};
use omok_client::coord::{BOARD_SIZE, Coord};
use omok_client::event::{OmokClientEvent, ServerError};
use omok_client::notice::BubbleSlot;
use omok_client::options::SessionOptions;
use omok_client::render::RenderError;
use omok_client::stone::PlayerSide;
use omok_client::stone::StoneColor::{Black, White};
use pretty_assertions::assert_eq;


const MS: Duration = Duration::from_millis(1);

const GAME_START_AS_WHITE: &str =
    r#"{"type":"GAME_START","payload":{"firstTurn":"BLACK","myColor":"WHITE"}}"#;
const GAME_START_AS_BLACK: &str =
    r#"{"type":"GAME_START","payload":{"firstTurn":"BLACK","myColor":"BLACK"}}"#;
const GAME_START_SPECTATOR: &str = r#"{"type":"GAME_START","payload":{"firstTurn":"BLACK"}}"#;

fn playing_client() -> Client {
    let mut client = Client::new();
    client.receive(GAME_START_AS_WHITE).unwrap();
    client
}


#[test]
fn wait_start_move_end() {
    let mut client = Client::new();
    assert_eq!(client.state.phase(), GamePhase::Idle);

    client.receive(r#"{"type":"ROOM_WAIT"}"#).unwrap();
    assert_eq!(client.state.phase(), GamePhase::Waiting);
    assert_eq!(client.surface().status, WAITING_STATUS);

    assert_eq!(client.receive(GAME_START_AS_WHITE).unwrap(), NotableEvent::GameStarted);
    assert_eq!(client.state.phase(), GamePhase::Playing);
    assert_eq!(client.state.my_color(), Some(White));
    assert_eq!(client.state.turn(), Some(Black));
    assert_eq!(client.surface().grids_created, 1);
    assert_eq!(client.surface().active_side(), Some(PlayerSide::Left));

    assert_eq!(client.receive(&move_ok(3, 3, "BLACK")).unwrap(), NotableEvent::StonePlaced {
        coord: Coord::new(3, 3),
        color: Black,
    });
    assert_eq!(client.surface().cell(Coord::new(3, 3)), Some(Black));
    assert_eq!(client.state.board().get(Coord::new(3, 3)), Some(Black));
    assert_eq!(client.state.turn(), Some(White));
    assert!(client.state.is_my_turn());
    assert_eq!(client.surface().active_side(), Some(PlayerSide::Right));

    assert_eq!(
        client.receive(r#"{"type":"GAME_END","payload":{"winner":true}}"#).unwrap(),
        NotableEvent::GameOver(GameOutcome::Victory)
    );
    assert_eq!(client.state.phase(), GamePhase::Ended);
    assert_eq!(client.surface().alerts, vec!["Game over! You won!"]);
    assert!(client.state.navigation_pending());
    assert!(client.surface().navigations.is_empty());
}

#[test]
fn navigation_after_game_end() {
    let mut client = playing_client();
    client.receive(r#"{"type":"GAME_END","payload":{"reason":"PLAYER GG"}}"#).unwrap();
    assert_eq!(client.state.next_deadline(), Some(client.now() + 300 * MS));
    assert_eq!(client.advance(299 * MS), NotableEvent::None);
    assert_eq!(client.advance(1 * MS), NotableEvent::NavigatedTo("/omok/lobby".to_owned()));
    assert_eq!(client.advance(Duration::from_secs(10)), NotableEvent::None);
    assert_eq!(client.surface().navigations, vec!["/omok/lobby"]);
    assert_eq!(client.state.phase(), GamePhase::Ended);
}

#[test]
fn turn_alternates() {
    for n in 0..12 {
        let mut client = playing_client();
        for i in 0..n {
            let color = if i % 2 == 0 { "BLACK" } else { "WHITE" };
            client.receive(&move_ok(i, 0, color)).unwrap();
        }
        let expected = if n % 2 == 0 { Black } else { White };
        assert_eq!(client.state.turn(), Some(expected), "after {n} moves");
        assert_eq!(client.state.board().num_stones(), n as usize);
    }
}

#[test]
fn color_is_bound_once() {
    let mut client = Client::new();
    client.receive(GAME_START_AS_WHITE).unwrap();
    client.receive(&move_ok(0, 0, "BLACK")).unwrap();

    client.receive(GAME_START_AS_BLACK).unwrap();
    assert_eq!(client.state.my_color(), Some(White));
    client.receive(GAME_START_SPECTATOR).unwrap();
    assert_eq!(client.state.my_color(), Some(White));

    // New game still starts from an empty board, drawn on the same grid.
    assert_eq!(client.state.board().num_stones(), 0);
    assert_eq!(client.surface().num_marked_cells(), 0);
    assert_eq!(client.surface().grids_created, 1);
    assert_eq!(client.state.turn(), Some(Black));
}

#[test]
fn reset_allows_new_binding() {
    let mut client = playing_client();
    client.receive(&move_ok(1, 1, "BLACK")).unwrap();
    client.state.reset();
    assert_eq!(client.state.phase(), GamePhase::Idle);
    assert_eq!(client.state.my_color(), None);
    assert_eq!(client.state.turn(), None);
    assert_eq!(client.state.board().num_stones(), 0);

    client.receive(GAME_START_AS_BLACK).unwrap();
    assert_eq!(client.state.my_color(), Some(Black));
}

#[test]
fn reset_takes_down_session_notices() {
    let mut client = playing_client();
    client.receive(&move_ok(2, 2, "BLACK")).unwrap();
    client
        .receive(r#"{"type":"CHAT","payload":{"senderRole":"PLAYER","playerIndex":1,"message":"hi"}}"#)
        .unwrap();
    client.state.reset();
    assert_eq!(client.surface().bubble(BubbleSlot::Player1), Some(("hi".to_owned(), false)));
    assert_eq!(client.state.next_deadline(), None);
    assert_eq!(client.surface().num_marked_cells(), 0);
    assert_eq!(client.surface().active_side(), None);
    assert_eq!(client.surface().countdown, "");
    assert_eq!(client.surface().status, "");

    client.advance(Duration::from_secs(60));
    assert_eq!(client.surface().bubble(BubbleSlot::Player1), Some(("hi".to_owned(), false)));
    assert!(client.surface().navigations.is_empty());
}

#[test]
fn spectator_start() {
    let mut client = Client::new();
    client.receive(GAME_START_SPECTATOR).unwrap();
    assert_eq!(client.state.phase(), GamePhase::Playing);
    assert_eq!(client.state.my_color(), None);
    assert!(!client.state.is_my_turn());
    assert_eq!(client.surface().status, "Spectating");
}

#[test]
fn occupied_cell_is_rejected() {
    let mut client = playing_client();
    client.receive(&move_ok(5, 6, "BLACK")).unwrap();
    let picture_before = board_picture(client.surface(), 8);

    let c = Coord::new(5, 6);
    assert_eq!(
        client.receive(&move_ok(5, 6, "WHITE")),
        Err(EventError::InvalidPlacement(InvalidPlacement::Occupied { coord: c, by: Black }))
    );
    assert_eq!(client.state.board().get(c), Some(Black));
    assert_eq!(client.state.turn(), Some(White));
    assert_eq!(board_picture(client.surface(), 8), picture_before);
    assert_eq!(picture_before, [
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . X . .",
        ". . . . . . . .",
    ].join("\n"));
}

#[test]
fn out_of_range_move_is_rejected() {
    let mut client = playing_client();
    let size = BOARD_SIZE as i32;
    for (x, y) in [(-1, 0), (0, -1), (size, 0), (0, size)] {
        assert_eq!(
            client.receive(&move_ok(x, y, "BLACK")),
            Err(EventError::InvalidPlacement(InvalidPlacement::OutOfBounds(Coord::new(x, y))))
        );
    }
    assert_eq!(client.state.board().num_stones(), 0);
    assert_eq!(client.surface().num_marked_cells(), 0);
    assert_eq!(client.state.turn(), Some(Black));
}

#[test]
fn move_before_grid_is_rejected() {
    let mut client = Client::new();
    client.receive(r#"{"type":"ROOM_WAIT"}"#).unwrap();
    let c = Coord::new(2, 2);
    assert_eq!(
        client.receive(&move_ok(2, 2, "BLACK")),
        Err(EventError::Render(RenderError::OutOfBounds(c)))
    );
    assert_eq!(client.state.board().get(c), None);
    assert_eq!(client.state.turn(), None);
    assert_eq!(client.state.phase(), GamePhase::Waiting);
}

#[test]
fn countdown() {
    let mut client = Client::new();
    client.receive(r#"{"type":"COUNTDOWN","payload":{"sec":5}}"#).unwrap();
    assert_eq!(client.state.phase(), GamePhase::Countdown);
    assert_eq!(client.surface().countdown, "Starting in 5s");
    client.receive(r#"{"type":"COUNTDOWN","payload":{"sec":1}}"#).unwrap();
    assert_eq!(client.surface().countdown, "Starting in 1s");

    // Opponent left during the countdown.
    client.receive(r#"{"type":"LEAVE","payload":{"reason":"PLAYER_LEFT"}}"#).unwrap();
    assert_eq!(client.state.phase(), GamePhase::Countdown);
    client.receive(r#"{"type":"ROOM_WAIT"}"#).unwrap();
    assert_eq!(client.surface().countdown, "");
    assert_eq!(client.state.phase(), GamePhase::Waiting);

    client.receive(r#"{"type":"COUNTDOWN","payload":{"sec":2}}"#).unwrap();
    client.receive(GAME_START_AS_BLACK).unwrap();
    assert_eq!(client.surface().countdown, "");
}

#[test]
fn join_and_leave_are_informational() {
    let mut client = playing_client();
    client.receive(&move_ok(0, 0, "BLACK")).unwrap();
    let surface_before = client.surface().clone();
    client.receive(r#"{"type":"JOIN","payload":{"userId":3,"profileImg":"p.png"}}"#).unwrap();
    client.receive(r#"{"type":"LEAVE","payload":{"reason":"PLAYER GG"}}"#).unwrap();
    assert_eq!(client.state.phase(), GamePhase::Playing);
    assert_eq!(client.surface().cells, surface_before.cells);
    assert_eq!(client.surface().status, surface_before.status);
}

#[test]
fn spectator_chat_goes_to_log() {
    let mut client = playing_client();
    client
        .receive(r#"{"type":"CHAT","payload":{"senderRole":"SPECTATOR","message":"nice"}}"#)
        .unwrap();
    assert_eq!(client.state.notices().log(), ["nice"]);
    assert_eq!(client.surface().log_lines, vec!["nice"]);
    assert_eq!(client.surface().bubble(BubbleSlot::Player1), None);
    assert_eq!(client.surface().bubble(BubbleSlot::Player2), None);
}

#[test]
fn player_chat_goes_to_own_bubble() {
    let mut client = playing_client();
    client
        .receive(
            r#"{"type":"CHAT","payload":{"senderRole":"PLAYER","playerIndex":2,"message":"gl"}}"#,
        )
        .unwrap();
    assert_eq!(client.surface().bubble(BubbleSlot::Player1), None);
    assert_eq!(client.surface().bubble(BubbleSlot::Player2), Some(("gl".to_owned(), true)));
    assert!(client.surface().log_lines.is_empty());

    client
        .receive(r#"{"type":"CHAT","payload":{"senderRole":"PLAYER","playerIndex":7,"message":"?"}}"#)
        .unwrap();
    assert_eq!(client.surface().bubble(BubbleSlot::Player1), None);
    assert!(client.surface().log_lines.is_empty());
}

#[test]
fn chat_bubble_restarts_on_new_message() {
    let mut client = playing_client();
    let chat = |text: &str| {
        format!(
            r#"{{"type":"CHAT","payload":{{"senderRole":"PLAYER","playerIndex":1,"message":"{text}"}}}}"#
        )
    };
    client.receive(&chat("A")).unwrap();
    client.advance(2000 * MS);
    client.receive(&chat("B")).unwrap();

    // Would have hidden "A" here.
    client.advance(1000 * MS);
    assert_eq!(client.surface().bubble(BubbleSlot::Player1), Some(("B".to_owned(), true)));
    client.advance(1999 * MS);
    assert!(client.state.notices().bubble(BubbleSlot::Player1).is_visible());
    client.advance(1 * MS);
    assert_eq!(client.surface().bubble(BubbleSlot::Player1), Some(("B".to_owned(), false)));
}

#[test]
fn bubble_does_not_touch_game_state() {
    let mut client = playing_client();
    client
        .receive(r#"{"type":"CHAT","payload":{"senderRole":"PLAYER","playerIndex":1,"message":"x"}}"#)
        .unwrap();
    client.receive(&move_ok(4, 4, "BLACK")).unwrap();
    client.advance(Duration::from_secs(5));
    assert_eq!(client.state.phase(), GamePhase::Playing);
    assert_eq!(client.state.turn(), Some(White));
    assert_eq!(client.surface().cell(Coord::new(4, 4)), Some(Black));
}

#[test]
fn server_error_is_shown() {
    let mut client = playing_client();
    client.receive(&move_ok(1, 2, "BLACK")).unwrap();
    assert_eq!(
        client
            .receive(r#"{"type":"ERROR","payload":{"code":"INVALID_TURN","message":"Not your turn"}}"#)
            .unwrap(),
        NotableEvent::ServerError(ServerError {
            code: "INVALID_TURN".to_owned(),
            message: "Not your turn".to_owned(),
        })
    );
    client.receive(r#"{"type":"ERROR","payload":"SPECTATOR_CANNOT_MOVE"}"#).unwrap();
    assert_eq!(client.surface().alerts, vec!["Not your turn", "SPECTATOR_CANNOT_MOVE"]);
    assert_eq!(client.state.phase(), GamePhase::Playing);
    assert_eq!(client.state.board().num_stones(), 1);
    assert_eq!(client.state.turn(), Some(White));
}

#[test]
fn unknown_message_is_dropped() {
    let mut client = playing_client();
    let surface_before = client.surface().clone();
    assert_eq!(
        client.receive(r#"{"type":"REMATCH","payload":{}}"#),
        Err(EventError::UnknownKind("REMATCH".to_owned()))
    );
    assert_eq!(client.state.phase(), GamePhase::Playing);
    assert_eq!(client.surface().cells, surface_before.cells);
    assert_eq!(client.surface().alerts, surface_before.alerts);
}

#[test]
fn game_end_notices() {
    let cases = [
        (r#"{"winner":false,"reason":"ROOM EMPTY"}"#, "Game over: ROOM EMPTY"),
        (r#"{}"#, "Game over."),
        (r#"{"winner":12}"#, "Game over! You won!"),
    ];
    for (payload, expected) in cases {
        let mut client = playing_client();
        client.receive(&format!(r#"{{"type":"GAME_END","payload":{payload}}}"#)).unwrap();
        assert_eq!(client.surface().alerts, vec![expected]);
        assert_eq!(client.surface().status, expected);
    }
}

#[test]
fn game_end_winner_id() {
    let options = |my_user_id| SessionOptions { my_user_id, ..SessionOptions::default() };
    let end = r#"{"type":"GAME_END","payload":{"winner":12}}"#;

    let mut me = Client::with_options(options(Some(12)));
    me.receive(GAME_START_AS_WHITE).unwrap();
    assert_eq!(me.receive(end).unwrap(), NotableEvent::GameOver(GameOutcome::Victory));

    let mut opponent = Client::with_options(options(Some(13)));
    opponent.receive(GAME_START_AS_BLACK).unwrap();
    assert_eq!(opponent.receive(end).unwrap(), NotableEvent::GameOver(GameOutcome::Defeat));

    let mut spectator = Client::new();
    spectator.receive(GAME_START_SPECTATOR).unwrap();
    assert_eq!(spectator.receive(end).unwrap(), NotableEvent::GameOver(GameOutcome::Unspecified));
}

#[test]
fn game_end_zero_winner_means_no_winner() {
    let mut player = Client::new();
    player.receive(GAME_START_AS_BLACK).unwrap();
    assert_eq!(
        player.receive(r#"{"type":"GAME_END","payload":{"winner":0,"reason":"DRAW"}}"#).unwrap(),
        NotableEvent::GameOver(GameOutcome::Reason("DRAW".to_owned()))
    );

    let mut me = Client::with_options(SessionOptions {
        my_user_id: Some(0),
        ..SessionOptions::default()
    });
    me.receive(GAME_START_AS_WHITE).unwrap();
    assert_eq!(
        me.receive(r#"{"type":"GAME_END","payload":{"winner":0}}"#).unwrap(),
        NotableEvent::GameOver(GameOutcome::Unspecified)
    );
}

#[test]
fn activate_cell_sends_move() {
    let mut client = Client::new();
    assert_eq!(client.state.activate_cell(Coord::new(0, 0)), Err(CommandError::NoGameInProgress));

    client.receive(GAME_START_AS_BLACK).unwrap();
    client.state.activate_cell(Coord::new(7, 7)).unwrap();
    assert_eq!(client.sent(), vec![OmokClientEvent::Move { x: 7, y: 7 }]);

    client.receive(&move_ok(7, 7, "BLACK")).unwrap();
    assert_eq!(
        client.state.activate_cell(Coord::new(7, 7)),
        Err(CommandError::IllegalPlacement(InvalidPlacement::Occupied {
            coord: Coord::new(7, 7),
            by: Black,
        }))
    );
    assert_eq!(
        client.state.activate_cell(Coord::new(BOARD_SIZE as i32, 0)),
        Err(CommandError::NoSuchCell(Coord::new(BOARD_SIZE as i32, 0)))
    );
    assert!(client.sent().is_empty());

    client.receive(r#"{"type":"GAME_END","payload":{}}"#).unwrap();
    assert_eq!(client.state.activate_cell(Coord::new(1, 1)), Err(CommandError::NoGameInProgress));
}

#[test]
fn send_chat() {
    let mut client = playing_client();
    client.state.send_chat("  hello  ").unwrap();
    assert_eq!(client.sent(), vec![OmokClientEvent::Chat("hello".to_owned())]);
    assert_eq!(client.state.send_chat("   "), Err(CommandError::EmptyChatMessage));
    assert_eq!(client.state.send_chat(&"a".repeat(501)), Err(CommandError::ChatMessageTooLong));
    assert!(client.sent().is_empty());
}

#[test]
fn disconnected_transport() {
    let Client { mut state, outgoing_rx, .. } = playing_client();
    drop(outgoing_rx);
    assert_eq!(state.send_chat("hi"), Err(CommandError::NotConnected));
}
