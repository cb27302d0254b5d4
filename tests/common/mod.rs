// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;
use std::time::Duration;

use instant::Instant;
use itertools::Itertools;
use omok_client::client::{ClientState, EventError, NotableEvent};
use omok_client::coord::Coord;
use omok_client::event::{OmokClientEvent, OmokServerEvent};
use omok_client::network::parse_server_event;
use omok_client::options::SessionOptions;
use omok_client::test_util::FakeSurface;


// Client fed by a hand-driven server. Time only moves when the test says so.
pub struct Client {
    pub state: ClientState<FakeSurface>,
    pub outgoing_rx: mpsc::Receiver<OmokClientEvent>,
    start: Instant,
    elapsed: Duration,
}

impl Client {
    #[allow(dead_code)]
    pub fn new() -> Self { Self::with_options(SessionOptions::default()) }

    #[allow(dead_code)]
    pub fn with_options(options: SessionOptions) -> Self {
        let (tx, rx) = mpsc::channel();
        Client {
            state: ClientState::new(options, FakeSurface::new(), tx),
            outgoing_rx: rx,
            start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    #[allow(dead_code)]
    pub fn now(&self) -> Instant { self.start + self.elapsed }

    #[allow(dead_code)]
    pub fn surface(&self) -> &FakeSurface { self.state.surface() }

    // Parses the frame exactly like the console transport does.
    #[allow(dead_code)]
    pub fn receive(&mut self, json: &str) -> Result<NotableEvent, EventError> {
        let event = parse_server_event(json).unwrap();
        self.receive_event(event)
    }

    #[allow(dead_code)]
    pub fn receive_event(&mut self, event: OmokServerEvent) -> Result<NotableEvent, EventError> {
        let now = self.now();
        self.state.process_server_event(event, now)
    }

    #[allow(dead_code)]
    pub fn advance(&mut self, duration: Duration) -> NotableEvent {
        self.elapsed += duration;
        let now = self.now();
        self.state.tick(now)
    }

    #[allow(dead_code)]
    pub fn sent(&self) -> Vec<OmokClientEvent> { self.outgoing_rx.try_iter().collect() }
}

#[allow(dead_code)]
pub fn move_ok(x: i32, y: i32, color: &str) -> String {
    format!(r#"{{"type":"MOVE_OK","payload":{{"x":{x},"y":{y},"color":"{color}"}}}}"#)
}

// Top-left corner of the drawn board, one row per line: `X` black, `O` white, `.` empty.
#[allow(dead_code)]
pub fn board_picture(surface: &FakeSurface, size: i32) -> String {
    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| match surface.cell(Coord::new(x, y)) {
                    Some(omok_client::stone::StoneColor::Black) => 'X',
                    Some(omok_client::stone::StoneColor::White) => 'O',
                    None => '.',
                })
                .join(" ")
        })
        .join("\n")
}
