use std::io;
use std::net::TcpStream;

use omok_client::event::{OmokClientEvent, OmokServerEvent};
use omok_client::network::{self as protocol, parse_server_event, serialize_client_event};
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    Protocol(protocol::CommunicationError),
    ConnectionClosed,
}

pub fn write_event<S>(
    socket: &mut WebSocket<S>, event: &OmokClientEvent,
) -> Result<(), CommunicationError>
where
    S: io::Read + io::Write,
{
    let serialized = serialize_client_event(event).map_err(CommunicationError::Protocol)?;
    socket.send(Message::text(serialized)).map_err(CommunicationError::Socket)
}

// Blocks until the next text frame. Control frames are handled by `tungstenite` itself.
pub fn read_event<S>(socket: &mut WebSocket<S>) -> Result<OmokServerEvent, CommunicationError>
where
    S: io::Read + io::Write,
{
    loop {
        let msg = socket.read().map_err(|err| match err {
            tungstenite::Error::ConnectionClosed => CommunicationError::ConnectionClosed,
            err => CommunicationError::Socket(err),
        })?;
        match msg {
            Message::Text(text) => {
                return parse_server_event(text.as_str()).map_err(CommunicationError::Protocol);
            }
            Message::Close(_) => return Err(CommunicationError::ConnectionClosed),
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
}

// Improvement potential: Instead of cloning the socket, consider calling
//   TcpStream.set_nonblocking on the underlying stream and doing read/writes in the same thread.
pub fn clone_websocket(socket: &WebSocket<TcpStream>, role: Role) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    let config = *socket.get_config();
    Ok(WebSocket::from_raw_socket(stream, role, Some(config)))
}
