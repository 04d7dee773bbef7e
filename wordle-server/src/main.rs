use std::{
    io,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use actix_web::{
    http::StatusCode,
    middleware::Logger,
    rt,
    web::{self, Data},
    App, HttpServer, Responder, ResponseError,
};
use clap::Parser;
use hashbrown::HashMap;
use log::info;
use lookup::Lookup;
use squirrel_rng::SquirrelRng;
use uuid::Uuid;
use wordle::{
    validate::DICTIONARY_URL, Catalog, CreateGameResponse, FileStore, GameResponse, GuessError,
    HintError, HintRequest, HintResponse, KeyValueStore, Mode, Outcome, Session, Stats,
    StatsRepository, StoreError, Turn, UpdateGameRequest, UpdateGameResponse, Variant,
};

mod lookup;

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("game not found for id {0}")]
    GameNotFound(Uuid),
    #[error(transparent)]
    Guess(#[from] GuessError),
    #[error(transparent)]
    Hint(#[from] HintError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("word lookup did not finish: {0}")]
    Lookup(#[from] rt::task::JoinError),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::GameNotFound(_) => StatusCode::NOT_FOUND,
            Error::Guess(GuessError::ValidationUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Guess(GuessError::Busy) | Error::Hint(HintError::Busy) => StatusCode::CONFLICT,
            Error::Guess(_) | Error::Hint(_) => StatusCode::BAD_REQUEST,
            Error::Store(_) | Error::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Clone, Debug, Parser)]
struct Args {
    /// path to a classic word list (one word per line; defaults to the built-in list)
    #[clap(long)]
    words: Option<PathBuf>,

    /// path to the stats file
    #[clap(long, default_value = "wordle-stats.json")]
    stats: PathBuf,

    /// address to listen on
    #[clap(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// dictionary service used for words outside the word lists
    #[clap(long, default_value = DICTIONARY_URL)]
    dictionary_url: String,

    /// seconds to wait for the dictionary before giving up on a word
    #[clap(long, default_value = "10")]
    lookup_timeout: u64,

    /// accept only words from the word lists
    #[clap(long)]
    offline: bool,

    /// seed for word selection and letter hints
    #[clap(long)]
    seed: Option<u32>,
}

struct Shared {
    rng: SquirrelRng,
    games: HashMap<Uuid, Session>,
    stats: StatsRepository<Box<dyn KeyValueStore + Send>>,
}

struct AppState {
    shared: Mutex<Shared>,
    themed: Arc<Variant>,
    classic: Arc<Variant>,
    lookup: Lookup,
}

impl AppState {
    fn new(
        classic: Catalog,
        store: Box<dyn KeyValueStore + Send>,
        lookup: Lookup,
        rng: SquirrelRng,
    ) -> Self {
        Self {
            shared: Mutex::new(Shared {
                rng,
                games: HashMap::new(),
                stats: StatsRepository::new(store),
            }),
            themed: Arc::new(Variant::themed()),
            classic: Arc::new(Variant::classic(classic)),
            lookup,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn variant(&self, mode: Mode) -> Arc<Variant> {
        match mode {
            Mode::Themed => self.themed.clone(),
            Mode::Classic => self.classic.clone(),
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let data = Data::new(build_state(&args)?);

    info!("listening on {}", args.bind);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes)
    })
    .bind(&args.bind)?
    .run()
    .await
}

fn build_state(args: &Args) -> io::Result<AppState> {
    let classic = match &args.words {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::classic(),
    };

    if classic.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "your word list is empty!",
        ));
    }

    let store = FileStore::open(&args.stats).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let lookup = if args.offline {
        Lookup::Offline
    } else {
        Lookup::dictionary(&args.dictionary_url, Duration::from_secs(args.lookup_timeout))
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
    };

    let rng = match args.seed {
        Some(seed) => SquirrelRng::with_seed(seed.into()),
        None => SquirrelRng::new(),
    };

    info!(
        "{} classic words, stats in {}",
        classic.len(),
        args.stats.display()
    );

    Ok(AppState::new(classic, Box::new(store), lookup, rng))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/stats", web::get().to(read_stats))
        .route("/new/{mode}", web::get().to(create_game))
        .route("/{game}", web::get().to(read_game))
        .route("/{game}", web::put().to(update_game))
        .route("/{game}/hint", web::put().to(take_hint));
}

async fn read_stats(data: Data<AppState>) -> impl Responder {
    web::Json(data.lock().stats.load())
}

async fn create_game(mode: web::Path<Mode>, data: Data<AppState>) -> Result<impl Responder> {
    let variant = data.variant(mode.into_inner());

    let mut shared = data.lock();
    let Shared { rng, games, stats } = &mut *shared;

    let game = Session::start(variant, stats, rng)?;
    let id = Uuid::new_v4();
    let response = CreateGameResponse::new(id, &game, stats.load().total_score);

    games.insert(id, game);

    Ok(web::Json(response))
}

async fn read_game(id: web::Path<Uuid>, data: Data<AppState>) -> Result<impl Responder> {
    let id = id.into_inner();
    let shared = data.lock();
    let game = shared.games.get(&id).ok_or(Error::GameNotFound(id))?;

    Ok(web::Json(view(game, shared.stats.load())))
}

async fn update_game(
    id: web::Path<Uuid>,
    request: web::Json<UpdateGameRequest>,
    data: Data<AppState>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    let UpdateGameRequest { word } = request.into_inner();

    // Everything that can be checked without the dictionary is checked under the lock. A
    // word that needs the dictionary puts the game on hold, and the lock is released while
    // we wait for the answer.

    let screened = {
        let mut shared = data.lock();
        let Shared { games, stats, .. } = &mut *shared;
        let game = games.get_mut(&id).ok_or(Error::GameNotFound(id))?;

        // Guessing in a finished game changes nothing; we just repeat the result.
        if game.is_over() {
            return Ok(web::Json(view(game, stats.load())));
        }

        let screened = game.screen(&word)?;
        if screened.needs_lookup() {
            game.begin_lookup();
        }
        screened
    };

    if !screened.needs_lookup() {
        return Ok(web::Json(finish_turn(&data, id, |game| game.accept(screened))?));
    }

    // The lookup gets its own task so the game is taken off hold even when this request is
    // dropped before the dictionary answers.
    let response = rt::spawn(async move {
        let verdict = data.lookup.check(screened.word()).await;
        finish_turn(&data, id, |game| game.resolve(screened, verdict))
    })
    .await??;

    Ok(web::Json(response))
}

fn finish_turn(
    data: &AppState,
    id: Uuid,
    play: impl FnOnce(&mut Session) -> Result<Turn, GuessError>,
) -> Result<UpdateGameResponse> {
    let mut shared = data.lock();
    let Shared { games, stats, .. } = &mut *shared;
    let game = games.get_mut(&id).ok_or(Error::GameNotFound(id))?;
    let turn = play(game)?;

    // The guess that ends the game is the only one that carries an outcome, so the stats
    // are updated exactly once per game.

    Ok(match turn.outcome {
        Some(outcome) => {
            let totals = stats.record(&outcome)?;
            UpdateGameResponse::finalize(game, &outcome, totals, victory_message(&outcome))
        }
        None => UpdateGameResponse::update(game, stats.load().total_score),
    })
}

async fn take_hint(
    id: web::Path<Uuid>,
    request: web::Json<HintRequest>,
    data: Data<AppState>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    let mut shared = data.lock();
    let Shared { rng, games, stats } = &mut *shared;
    let game = games.get_mut(&id).ok_or(Error::GameNotFound(id))?;

    let total_score = stats.load().total_score;
    let reveal = game.take_hint(request.kind, total_score, rng)?;

    Ok(web::Json(HintResponse {
        reveal,
        penalty: game.hints().penalty,
        game: GameResponse::new(game, total_score),
    }))
}

fn view(game: &Session, stats: Stats) -> UpdateGameResponse {
    match game.outcome() {
        Some(outcome) => {
            UpdateGameResponse::finalize(game, &outcome, stats, "This game is already over.")
        }
        None => UpdateGameResponse::update(game, stats.total_score),
    }
}

fn victory_message(outcome: &Outcome) -> &'static str {
    match (outcome.won, outcome.wrong_guesses) {
        (true, 0) => "FLAWLESS VICTORY!",
        (true, _) => "You guessed the word!",
        (false, _) => "Better luck next time!",
    }
}
