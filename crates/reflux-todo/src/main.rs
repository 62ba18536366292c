use anyhow::Result;
use std::io::{self, BufRead, Write};

mod actions;
mod app;
mod commands;
mod enhancers;
mod logger;
mod middleware;
mod reducers;
mod render;
mod state;

use actions::TodoAction;
use commands::Command;
use reflux::Store;
use reflux_config::StoreConfig;
use state::TodoState;

fn main() -> Result<()> {
    let app::Startup {
        config,
        level,
        warnings,
    } = app::Startup::new(StoreConfig::load());
    let log_file = logger::init(level)?;

    log::info!("Starting reflux-todo");
    for warning in &warnings {
        log::warn!("{}", warning);
        eprintln!("warning: {}", warning);
    }
    log::debug!("Store config: {:?}", config);
    eprintln!("Logging to {}", log_file.display());

    let store = app::create_store(&config)?;
    let result = run(&store);

    log::info!("Exiting reflux-todo");
    result
}

fn run(store: &Store<TodoState, TodoAction>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}", commands::HELP);

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{:#}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", commands::HELP),
            Command::List => println!("{}", render::format_visible(&store.get_state()?)),
            Command::State => {
                let state = store.get_state()?;
                println!("{}", serde_json::to_string_pretty(&*state)?);
            }
            command => {
                if let Some(action) = command.to_action(&store.get_state()?) {
                    if let Err(e) = store.dispatch(action) {
                        log::warn!("Dispatch failed: {}", e);
                        println!("error: {}", e);
                    }
                }
            }
        }
    }

    Ok(())
}
