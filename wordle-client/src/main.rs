use std::{io, process};

use clap::{Parser, Subcommand};
use log::debug;
use player::{Move, Player, RandomPlayer, StrategicPlayerFactory, UserInputPlayer};
use reqwest::{
    blocking::{Client, Response},
    StatusCode,
};
use wordle::{
    feedback::to_emoji_string, CreateGameResponse, GameResponse, HintRequest, HintResponse,
    Keyboard, Mode, UpdateGameRequest, UpdateGameResponse, WORD_LENGTH,
};

mod player;

#[derive(Debug, Parser)]
struct Args {
    /// wordle server url
    server: String,

    /// game mode (themed or classic)
    #[clap(long, default_value = "classic")]
    mode: Mode,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Random,
    Strategic(PlayerConfig),
    User,
}

#[derive(Debug, Parser)]
struct PlayerConfig {
    /// path to dictionary
    dictionary: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(&Args::parse()) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let client = Client::builder()
        .user_agent(concat!("wordle-client v", env!("CARGO_PKG_VERSION")))
        .build()?;

    let server = args.server.trim_end_matches('/');
    let CreateGameResponse {
        id,
        mode,
        guesses,
        hints,
        ..
    } = client
        .get(format!("{server}/new/{}", args.mode))
        .send()?
        .error_for_status()?
        .json()?;

    debug!("started {mode} game {id}");
    let game_url = format!("{server}/{id}");

    let mut game = GameResponse {
        board: Vec::new(),
        keyboard: Default::default(),
        revealed: vec![None; WORD_LENGTH],
        clues: Vec::new(),
        guesses,
        hints,
    };
    let mut player = build_player(&args.command)?;

    loop {
        match player.next_move(&game) {
            Move::Quit => {
                println!("We give up.");
                break;
            }

            Move::Hint(kind) => {
                let response = client
                    .put(format!("{game_url}/hint"))
                    .json(&HintRequest { kind })
                    .send()?;

                if is_refusal(&response) {
                    player.refused(kind, &response.text()?);
                    continue;
                }

                let HintResponse {
                    reveal,
                    penalty,
                    game: update,
                } = response.error_for_status()?.json()?;
                println!("Hint: {reveal} (penalty: {penalty})");
                game = update;
            }

            Move::Guess(word) => {
                let response = client
                    .put(&game_url)
                    .json(&UpdateGameRequest { word: word.clone() })
                    .send()?;

                // Usually the server saying the word isn't a word. The player hears about
                // it and the game goes on.
                if is_refusal(&response) {
                    player.rejected(&word, &response.text()?);
                    continue;
                }

                match response.error_for_status()?.json()? {
                    UpdateGameResponse::Finalize {
                        victory,
                        message,
                        word,
                        score,
                        board,
                        stats,
                    } => {
                        let mut keyboard = Keyboard::default();
                        for row in &board {
                            println!("{} {}", to_emoji_string(&row.marks), row.word);
                            keyboard.record(&row.word, &row.marks);
                        }
                        println!("{keyboard}");

                        if victory {
                            println!("The word was: {word}\nWe win! {message}");
                        } else {
                            println!("The word was: {word}\nWe lose. :( {message}");
                        }
                        println!(
                            "Score: {score}  Total: {}  Played: {}  Won: {}  Streak: {}  Best: {}",
                            stats.total_score,
                            stats.games_played,
                            stats.games_won,
                            stats.win_streak,
                            stats.best_score,
                        );
                        break;
                    }
                    UpdateGameResponse::Update(update) => game = update,
                }
            }
        }
    }

    Ok(())
}

fn is_refusal(response: &Response) -> bool {
    let status = response.status();
    status.is_client_error() && status != StatusCode::NOT_FOUND
        || status == StatusCode::SERVICE_UNAVAILABLE
}

fn build_player(command: &Command) -> io::Result<Box<dyn Player>> {
    match command {
        Command::Random => Ok(Box::new(RandomPlayer::new())),
        Command::Strategic(config) => Ok(Box::new(
            StrategicPlayerFactory::from_path(&config.dictionary)?.into_player(),
        )),
        Command::User => Ok(Box::new(UserInputPlayer)),
    }
}
