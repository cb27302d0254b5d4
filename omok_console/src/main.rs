#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod network;
pub mod tui;

mod client_config;
mod client_main;

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Command, arg};
use client_config::{ClientConfig, ClientRole};
use omok_client::network::parse_server_event;
use omok_client::options::SessionOptions;

fn main() -> anyhow::Result<()> {
    // Stdout belongs to the board picture.
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let matches = Command::new("Omok")
        .version(clap::crate_version!())
        .about("Omok console client")
        .subcommand_required(true)
        .subcommand(
            Command::new("client")
                .about("Join a game room")
                .arg(arg!(<server_address> "Server address, e.g. localhost:8080"))
                .arg(arg!(<room_id> "Room ID"))
                .arg(
                    arg!(--"role" <role>)
                        .value_parser(["player", "spectator"])
                        .default_value("player"),
                )
                .arg(
                    arg!(--"user-id" <id> "Own user ID, used to tell victory from defeat")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(arg!(--"session" <cookie> "Value of the JSESSIONID cookie"))
                .arg(
                    arg!(--"config" <config_file> "Path to a yaml-serialized SessionOptions")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("decode")
                .about("Reads server messages from stdin, one per line, and prints parsed events."),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("client", sub_matches)) => {
            let mut session_options = match sub_matches.get_one::<PathBuf>("config") {
                Some(path) => client_config::read_session_options(path)?,
                None => SessionOptions::default(),
            };
            if let Some(&user_id) = sub_matches.get_one::<i64>("user-id") {
                session_options.my_user_id = Some(user_id);
            }
            let role = match sub_matches.get_one::<String>("role").map(String::as_str) {
                Some("spectator") => ClientRole::Spectator,
                _ => ClientRole::Player,
            };
            client_main::run(ClientConfig {
                server_address: sub_matches.get_one::<String>("server_address").unwrap().clone(),
                room_id: sub_matches.get_one::<String>("room_id").unwrap().clone(),
                role,
                session_cookie: sub_matches.get_one::<String>("session").cloned(),
                session_options,
            })
        }
        Some(("decode", _)) => decode(),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn decode() -> anyhow::Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_server_event(&line) {
            Ok(event) => println!("{event:?}"),
            Err(err) => println!("error: {err:?}"),
        }
    }
    Ok(())
}
