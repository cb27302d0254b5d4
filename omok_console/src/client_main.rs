use std::fmt;
use std::io;
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use crossterm::event::{self as term_event, KeyCode, KeyEventKind};
use crossterm::style::{self, Stylize};
use crossterm::{cursor, execute, terminal};
use instant::Instant;
use omok_client::board::InvalidPlacement;
use omok_client::client::{ClientState, CommandError, NotableEvent};
use omok_client::coord::Coord;
use omok_client::event::OmokServerEvent;
use scopeguard::defer;
use tungstenite::client::IntoClientRequest;
use tungstenite::http::{HeaderValue, header};
use tungstenite::protocol::Role;

use crate::client_config::ClientConfig;
use crate::network::{self, CommunicationError};
use crate::tui::TerminalSurface;


const TICK_INTERVAL: Duration = Duration::from_millis(100);

enum IncomingEvent {
    Network(Result<OmokServerEvent, CommunicationError>),
    Terminal(term_event::Event),
    Tick,
}

enum Exit {
    Lobby(String),
    Quit,
    ConnectionClosed,
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1), cursor::Hide)?;
    }
    Ok(())
}

fn render(
    stdout: &mut io::Stdout, client_state: &ClientState<TerminalSurface>, keyboard_input: &str,
    command_error: &Option<String>,
) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0))?;
    writeln_raw(stdout, client_state.surface().render(client_state.my_color()))?;
    let input_style =
        if client_state.is_my_turn() { style::Color::White } else { style::Color::DarkGrey };
    writeln_raw(stdout, format!("> {}▂", keyboard_input).with(input_style))?;
    if let Some(err) = command_error {
        writeln_raw(stdout, err.clone().with(style::Color::Red))?;
    }
    // Note. Don't clear the whole screen to avoid blinking.
    execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
    Ok(())
}

fn parse_cell(input: &str) -> Option<Coord> {
    let mut parts = input.split_whitespace().map(|s| s.parse::<i32>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Some(Coord::new(x, y)),
        _ => None,
    }
}

fn describe_command_error(err: &CommandError) -> String {
    match err {
        CommandError::NoGameInProgress => "No game in progress".to_owned(),
        CommandError::NoSuchCell(coord) => format!("No cell at ({}, {})", coord.x, coord.y),
        CommandError::IllegalPlacement(InvalidPlacement::Occupied { by, .. }) => {
            format!("Cell is occupied by {by}")
        }
        CommandError::IllegalPlacement(InvalidPlacement::OutOfBounds(_)) => {
            "Cell is outside of the board".to_owned()
        }
        CommandError::EmptyChatMessage => "Chat message is empty".to_owned(),
        CommandError::ChatMessageTooLong => "Chat message is too long".to_owned(),
        CommandError::NotConnected => "Not connected".to_owned(),
    }
}

fn execute_command(
    client_state: &mut ClientState<TerminalSurface>, input: &str,
) -> Result<Option<Exit>, String> {
    if let Some(cmd) = input.strip_prefix('/') {
        let (name, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));
        return match name {
            "quit" => Ok(Some(Exit::Quit)),
            "chat" => {
                client_state.send_chat(arg).map_err(|err| describe_command_error(&err))?;
                Ok(None)
            }
            _ => Err(format!("Unknown command: '{}'", cmd)),
        };
    }
    let Some(coord) = parse_cell(input) else {
        return Err(format!("Expected '<x> <y>', got '{}'", input));
    };
    client_state.activate_cell(coord).map_err(|err| describe_command_error(&err))?;
    Ok(None)
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let url = config.game_url();
    println!("Connecting to {url}...");
    let stream = TcpStream::connect(&config.server_address)
        .with_context(|| format!("Cannot connect to {}", config.server_address))?;
    let mut request = url.as_str().into_client_request().context("Invalid server address")?;
    if let Some(cookie) = &config.session_cookie {
        request
            .headers_mut()
            .insert(header::COOKIE, HeaderValue::from_str(&format!("JSESSIONID={cookie}"))?);
    }
    let (mut socket_in, _) = tungstenite::client(request, stream)
        .map_err(|err| anyhow!("WebSocket handshake failed: {err}"))?;
    let mut socket_out = network::clone_websocket(&socket_in, Role::Client)?;
    let session_options = config.session_options;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    };

    let (tx, rx) = mpsc::channel();
    let tx_net = tx.clone();
    let tx_local = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || {
        loop {
            let ev = network::read_event(&mut socket_in);
            let fatal = matches!(
                ev,
                Err(CommunicationError::Socket(_) | CommunicationError::ConnectionClosed)
            );
            if tx_net.send(IncomingEvent::Network(ev)).is_err() || fatal {
                break;
            }
        }
    });
    thread::spawn(move || {
        while let Ok(ev) = term_event::read() {
            if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                break;
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(TICK_INTERVAL);
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                break;
            }
        }
    });

    let (server_tx, server_rx) = mpsc::channel();
    thread::spawn(move || {
        for ev in server_rx {
            if let Err(err) = network::write_event(&mut socket_out, &ev) {
                log::error!("Cannot send {ev:?}: {err:?}");
                break;
            }
        }
    });

    let mut client_state = ClientState::new(session_options, TerminalSurface::new(), server_tx);
    let mut keyboard_input = String::new();
    let mut command_error = None;
    let exit = 'event_loop: loop {
        let Ok(event) = rx.recv() else {
            break Exit::ConnectionClosed;
        };
        match event {
            IncomingEvent::Network(Ok(event)) => {
                match client_state.process_server_event(event, Instant::now()) {
                    Ok(NotableEvent::GameStarted) => {
                        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                    }
                    Ok(_) => {}
                    Err(err) => log::debug!("Server event ignored: {err:?}"),
                }
            }
            IncomingEvent::Network(Err(CommunicationError::Protocol(err))) => {
                log::warn!("Dropping malformed server message: {err:?}");
            }
            IncomingEvent::Network(Err(CommunicationError::ConnectionClosed)) => {
                break Exit::ConnectionClosed;
            }
            IncomingEvent::Network(Err(CommunicationError::Socket(err))) => {
                return Err(anyhow!("Connection lost: {err}"));
            }
            IncomingEvent::Terminal(term_event::Event::Key(event)) => {
                if event.kind != KeyEventKind::Press {
                    continue;
                }
                if client_state.surface_mut().dismiss_alert() {
                    // The key only closes the notice.
                } else {
                    match event.code {
                        KeyCode::Char(ch) => keyboard_input.push(ch),
                        KeyCode::Backspace => {
                            keyboard_input.pop();
                        }
                        KeyCode::Esc => keyboard_input.clear(),
                        KeyCode::Enter => {
                            let input = std::mem::take(&mut keyboard_input);
                            match execute_command(&mut client_state, input.trim()) {
                                Ok(Some(exit)) => break 'event_loop exit,
                                Ok(None) => command_error = None,
                                Err(err) => command_error = Some(err),
                            }
                        }
                        _ => {}
                    }
                }
            }
            IncomingEvent::Terminal(_) => {}
            IncomingEvent::Tick => {
                if let NotableEvent::NavigatedTo(_) = client_state.tick(Instant::now()) {
                    let location = client_state.surface().navigation().unwrap_or_default();
                    break Exit::Lobby(location.to_owned());
                }
            }
        }
        render(&mut stdout, &client_state, &keyboard_input, &command_error)?;
    };

    drop(client_state);
    match exit {
        Exit::Lobby(location) => log::info!("Game finished, returning to {location}"),
        Exit::Quit => log::info!("Left the room"),
        Exit::ConnectionClosed => log::info!("Server closed the connection"),
    }
    Ok(())
}
