//! Command-line front end.
//!
//! Each invocation is one short-lived view over the store: it restores the
//! saved session, dispatches the events for one command, waits for the
//! operations to settle, and prints the resulting state.
//!
//! ```text
//! reelshelf login --email ada@example.com --password ...
//! reelshelf list --page 2 --sort
//! reelshelf search --actor "Tom Hanks"
//! reelshelf add --title Heat --year 1995 --format DVD --actors "Al Pacino, Robert De Niro"
//! reelshelf import movies.txt
//! ```
//!
//! Exit status is `0` on success, `1` when an operation was rejected or the
//! input was invalid, and `2` for configuration or startup failures.

#![allow(clippy::multiple_crate_versions)]

use clap::{ArgGroup, Parser, Subcommand};
use reelshelf::app::{ListMode, Store};
use reelshelf::domain::{Credentials, MovieFormData, MovieFormat, Registration, SearchField};
use reelshelf::import::{ImportFile, IMPORT_FORMAT_HELP};
use reelshelf::{ui, Config, Event, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Instrument;

#[derive(Parser)]
#[command(name = "reelshelf")]
#[command(author, version, about = "Manage your movie collection from the terminal")]
struct Cli {
    /// Root URL of the movies service
    #[arg(long, global = true, env = "REELSHELF_API_URL")]
    api_url: Option<String>,

    /// Tracing filter, e.g. "debug" or "reelshelf=trace"
    #[arg(long, global = true)]
    trace_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "REELSHELF_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "REELSHELF_PASSWORD", hide_env_values = true)]
        password: String,

        /// Defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Forget the saved session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List one page of the collection
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Sort the page by title before printing
        #[arg(long)]
        sort: bool,
    },

    /// Show the details of one movie
    Show { id: String },

    /// Add a movie
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        year: i32,

        /// VHS, DVD or Blu-ray
        #[arg(long)]
        format: MovieFormat,

        /// Comma-separated names, e.g. "Tom Hanks, David Morse"
        #[arg(long)]
        actors: String,
    },

    /// Delete a movie
    Delete { id: String },

    /// Search by title or by actor
    #[command(group(ArgGroup::new("field").required(true).args(["title", "actor"])))]
    Search {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        actor: Option<String>,
    },

    /// Import movies from a .txt file
    Import {
        /// File to upload; omit with --format-help
        #[arg(required_unless_present = "format_help")]
        file: Option<PathBuf>,

        /// Describe the expected file layout and exit
        #[arg(long)]
        format_help: bool,
    },
}

/// How a command ended.
enum Outcome {
    Done,
    Rejected,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("reelshelf: {e}");
            return ExitCode::from(2);
        }
    };
    reelshelf::observability::init_tracing(&config);

    let mut store = match reelshelf::initialize(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize");
            eprintln!("reelshelf: {e}");
            return ExitCode::from(2);
        }
    };

    let span = tracing::debug_span!("cli", api_url = %config.api_url);
    match run(&mut store, cli.command).instrument(span).await {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(1),
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("reelshelf: {e}");
            ExitCode::from(1)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;

    let mut overrides = BTreeMap::new();
    if let Some(api_url) = &cli.api_url {
        overrides.insert("api_url".to_string(), api_url.clone());
    }
    if let Some(trace_level) = &cli.trace_level {
        overrides.insert("trace_level".to_string(), trace_level.clone());
    }
    config.apply_map(&overrides)?;
    config.validate()?;
    Ok(config)
}

async fn run(store: &mut Store, command: Commands) -> Result<Outcome> {
    match command {
        Commands::Login { email, password } => {
            let credentials = Credentials { email, password };
            sign_in(store, Event::Login(credentials)).await
        }
        Commands::Register { name, email, password, confirm_password } => {
            let registration = Registration {
                name,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            sign_in(store, Event::Register(registration)).await
        }
        Commands::Logout => {
            let was_authenticated = store.state().auth.is_authenticated;
            store.dispatch(Event::Logout)?;
            if was_authenticated {
                store.dispatch(ui::on_auth_changed(false))?;
            }
            println!("Signed out.");
            Ok(Outcome::Done)
        }
        Commands::Whoami => {
            match &store.state().auth.user {
                Some(user) => println!("{} <{}> (id {})", user.name, user.email, user.id),
                None => println!("Not signed in."),
            }
            Ok(Outcome::Done)
        }
        Commands::Import { format_help: true, .. } => {
            print!("{IMPORT_FORMAT_HELP}");
            Ok(Outcome::Done)
        }
        command => {
            if !store.state().auth.is_authenticated {
                eprintln!("Not signed in. Run `reelshelf login` first.");
                return Ok(Outcome::Rejected);
            }
            run_movie_command(store, command).await
        }
    }
}

async fn sign_in(store: &mut Store, event: Event) -> Result<Outcome> {
    let was_authenticated = store.state().auth.is_authenticated;
    store.dispatch_and_settle(event).await?;

    let auth = &store.state().auth;
    if let Some(error) = &auth.error {
        eprintln!("{error}");
        return Ok(Outcome::Rejected);
    }
    if let Some(user) = &auth.user {
        println!("Welcome, {}", user.name);
    }

    if !was_authenticated && store.state().auth.is_authenticated {
        store.dispatch_and_settle(ui::on_auth_changed(true)).await?;
        print!("{}", ui::render(&store.state().compute_viewmodel(ListMode::Collection)));
    }
    Ok(Outcome::Done)
}

async fn run_movie_command(store: &mut Store, command: Commands) -> Result<Outcome> {
    match command {
        Commands::List { page, sort } => {
            store.dispatch_and_settle(Event::FetchMovies { page }).await?;
            if sort {
                store.dispatch(Event::SortMoviesByTitle)?;
            }
            print_list(store, ListMode::Collection)
        }
        Commands::Show { id } => {
            store.dispatch_and_settle(Event::FetchMovie { id }).await?;
            if let Some(outcome) = report_error(store) {
                return Ok(outcome);
            }
            if let Some(movie) = &store.state().movies.current_movie {
                print!("{}", ui::render_movie(movie));
            }
            Ok(Outcome::Done)
        }
        Commands::Add { title, year, format, actors } => {
            let form = MovieFormData { title, year, format, actors };
            let validated = match form.validate() {
                Ok(validated) => validated,
                Err(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    return Ok(Outcome::Rejected);
                }
            };
            store.dispatch_and_settle(Event::AddMovie(validated)).await?;
            if let Some(outcome) = report_error(store) {
                return Ok(outcome);
            }
            if let Some(movie) = store.state().movies.movies.last() {
                println!("Added \"{}\" (id {}).", movie.title, movie.id);
            }
            Ok(Outcome::Done)
        }
        Commands::Delete { id } => {
            store.dispatch_and_settle(Event::DeleteMovie { id: id.clone() }).await?;
            if let Some(outcome) = report_error(store) {
                return Ok(outcome);
            }
            println!("Deleted movie {id}.");
            Ok(Outcome::Done)
        }
        Commands::Search { title, actor } => {
            let (field, query) = match (title, actor) {
                (Some(title), _) => (SearchField::Title, title),
                (None, Some(actor)) => (SearchField::Actor, actor),
                (None, None) => return Ok(Outcome::Rejected),
            };
            store.dispatch_and_settle(Event::SearchMovies { field, query }).await?;
            print_list(store, ListMode::SearchResults)
        }
        Commands::Import { file: Some(path), .. } => import(store, path).await,
        Commands::Import { file: None, .. } => {
            print!("{IMPORT_FORMAT_HELP}");
            Ok(Outcome::Rejected)
        }
        Commands::Login { .. }
        | Commands::Register { .. }
        | Commands::Logout
        | Commands::Whoami => Ok(Outcome::Done),
    }
}

async fn import(store: &mut Store, path: PathBuf) -> Result<Outcome> {
    let file = ImportFile::open(&path).await?;
    tracing::info!(file = file.name(), records = file.record_count(), "uploading import file");

    let responses = store.dispatch_and_settle(Event::ImportMovies(file)).await?;
    if let Some(outcome) = report_error(store) {
        return Ok(outcome);
    }

    for response in &responses {
        if let Some((refresh, notice)) = ui::after_import(response) {
            println!("{notice}");
            store.dispatch_and_settle(refresh).await?;
            return print_list(store, ListMode::Collection);
        }
    }
    Ok(Outcome::Done)
}

fn print_list(store: &Store, mode: ListMode) -> Result<Outcome> {
    let view = store.state().compute_viewmodel(mode);
    print!("{}", ui::render(&view));
    Ok(if view.error.is_some() { Outcome::Rejected } else { Outcome::Done })
}

/// Prints the movie error slot, if set.
fn report_error(store: &Store) -> Option<Outcome> {
    let error = store.state().movies.error.as_ref()?;
    eprintln!("{error}");
    Some(Outcome::Rejected)
}
