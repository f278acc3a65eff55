use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{Adapter, ChatError, History, Turn};
use crate::core::AppConfig;

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    SwitchMode(&'a str),
    Reset,
    Empty,
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if line == "/reset" {
        return Input::Reset;
    }
    if let Some(id) = line.strip_prefix("/mode ") {
        return Input::SwitchMode(id.trim());
    }
    Input::Message(line)
}

pub async fn run(config: AppConfig, mode: &str) -> Result<()> {
    let adapter = Adapter::from_config(&config);
    let mut mode = adapter.modes().get(mode)?.clone();
    let mut history = History::new();

    let mut rl = DefaultEditor::new()?;
    println!("{}", mode.greeting);

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => match parse_input(&line) {
                Input::Empty => continue,
                Input::Reset => {
                    history.clear();
                    println!("Starting a new dialog in {} mode", mode.name);
                }
                Input::SwitchMode(id) => match adapter.modes().get(id) {
                    Ok(next) => {
                        mode = next.clone();
                        history.clear();
                        println!("{}", mode.greeting);
                    }
                    Err(err) => println!("{}", err),
                },
                Input::Message(msg) => {
                    let _ = rl.add_history_entry(msg);
                    match adapter.complete(msg, history.turns(), &mode.id).await {
                        Ok(resp) => {
                            if resp.turns_dropped > 0 {
                                tracing::info!(
                                    "Forgot the {} oldest turns to fit the context window",
                                    resp.turns_dropped
                                );
                            }
                            history.drop_oldest(resp.turns_dropped);
                            history.push(Turn::new(msg, &resp.answer));
                            tracing::debug!("Used {} tokens", resp.total_tokens);
                            println!("{}", resp.answer);
                        }
                        // The message alone is too long, the dialog can continue
                        Err(err @ ChatError::FatalOverflow(_)) => println!("{}", err),
                        Err(err) => return Err(err.into()),
                    }
                }
            },
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
