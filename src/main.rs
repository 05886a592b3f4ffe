// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod parser;
mod utils;

use anyhow::Error;
use clap::{App, Arg, ArgMatches};
use config::Config;
use controller::{
    recommendations_table, Controller, ErrorKind, FeatureRecord, ModelChoice, ToTable,
};
use engine::{Engine, Task};
use log::LevelFilter;
use parser::Statement;
use rustyline::Editor;
use simplelog::{SimpleLogger, TermLogger, TerminalMode};
use std::path::Path;
use tourism::TourismController;

macro_rules! prompt {
    ($ed:ident) => {{
        use rustyline::error::ReadlineError;

        match $ed.readline(PROMPT) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                println!("Exiting...Good bye!");
                break;
            }

            Err(e) => Err(e),
        }
    }};
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";
const DEFAULT_CONFIG: &str = "tourism.toml";

fn print_help() {
    println!("Main help:");
    println!("h | help                          Shows this help");
    println!("q | quit                          Quit");
    println!("v | version                       Shows the version");
    println!("home                              Shows the loaded data summary");
    println!("collaborative(<user>[, n])        Top n attractions for a user");
    println!("similar(<attraction>[, n])        Top n attractions similar to another");
    println!("attraction(<attraction>)          Shows an attraction");
    println!("predict_rating(<model>[, record]) Predicts the rating of a visit");
    println!("predict_mode(<model>[, record])   Predicts the visit mode of a visit");
    println!();
    println!("Models: linear | xgboost");
    println!("Record: 'Continent', 'Region', 'Country', 'City', year, month, 'AttractionType'");
    println!("Without a record every field is asked interactively");
}

fn print_home(controller: &TourismController) {
    println!("Tourism experience analytics");
    println!("Users with predicted ratings: {}", controller.users_count());
    println!("Attractions: {}", controller.attractions_count());
}

fn report(error: &ErrorKind) {
    log::debug!("{:?}", error);

    match error {
        ErrorKind::UserNotFound(_) => println!("User ID not found."),
        ErrorKind::AttractionNotFound(_) => println!("Attraction ID not found."),
        ErrorKind::Prediction(e) => println!("Prediction failed: {}", e),
        e => println!("{}", e),
    }
}

fn predict<C>(
    engine: &Engine<C>,
    rl: &mut Editor<()>,
    task: Task,
    choice: ModelChoice,
    record: Option<FeatureRecord>,
) -> Result<(), Error>
where
    C: Controller,
{
    let record = match record {
        Some(record) => record,
        None => match utils::read_record(rl)? {
            Some(record) => record,
            None => {
                println!("Cancelled");
                return Ok(());
            }
        },
    };

    if let Err(e) = record.check_ranges() {
        println!("{}", e);
        return Ok(());
    }

    match engine.predict(task, choice, &record) {
        Ok(prediction) => println!("{}", prediction),
        Err(e) => report(&e),
    }

    Ok(())
}

fn execute<C>(engine: &Engine<C>, rl: &mut Editor<()>, statement: Statement) -> Result<(), Error>
where
    C: Controller,
{
    match statement {
        Statement::Collaborative(user_id, top_n) => {
            let top_n = top_n.unwrap_or_else(|| engine.default_top_n());

            match engine.collaborative(user_id, top_n) {
                Ok(recommendations) if recommendations.is_empty() => {
                    println!("No predicted ratings found for id({})", user_id)
                }
                Ok(recommendations) => println!(
                    "{}",
                    recommendations_table(&recommendations, "PredictedRating")
                ),
                Err(e) => report(&e),
            }
        }

        Statement::Similar(attraction_id, top_n) => {
            let top_n = top_n.unwrap_or_else(|| engine.default_top_n());

            match engine.content_based(attraction_id, top_n) {
                Ok(recommendations) if recommendations.is_empty() => {
                    println!("No similar attractions found for id({})", attraction_id)
                }
                Ok(recommendations) => {
                    println!("{}", recommendations_table(&recommendations, "Similarity"))
                }
                Err(e) => report(&e),
            }
        }

        Statement::Attraction(attraction_id) => match engine.attraction(attraction_id) {
            Ok(attraction) => println!("{}", attraction.to_table()),
            Err(e) => report(&e),
        },

        Statement::PredictRating(choice, record) => {
            predict(engine, rl, Task::Rating, choice, record)?
        }

        Statement::PredictVisitMode(choice, record) => {
            predict(engine, rl, Task::VisitMode, choice, record)?
        }
    }

    Ok(())
}

fn serve(controller: &TourismController, config: &Config) -> Result<(), Error> {
    let engine = Engine::with_config(controller, &config.engine);
    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let opt: String = prompt!(rl)?;

        match opt.trim() {
            "?" | "h" | "help" => print_help(),

            "home" => print_home(controller),

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(stmt) => execute(&engine, &mut rl, stmt)?,
                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<Config, Error> {
    match matches.value_of("config") {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG),
        None => Ok(Config::default()),
    }
}

/// Loads every artifact, the error is reported once by `main`
fn load_controller(config: &Config) -> Result<TourismController, Error> {
    log::info!("Loading artifacts from {}", config.artifacts.dir.display());
    Ok(TourismController::load(&config.artifacts)?)
}

fn log_level(config: &Config, verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => config.log.level.parse().unwrap_or(LevelFilter::Info),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logger(level: LevelFilter) -> Result<(), Error> {
    let config = simplelog::Config::default();

    if TermLogger::init(level, config.clone(), TerminalMode::Mixed).is_err() {
        SimpleLogger::init(level, config)?;
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    let matches = App::new("tourism-analytics")
        .version(VERSION)
        .about("Attraction recommendations and visit predictions")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Sets the configuration file (defaults to tourism.toml)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increases logging verbosity"),
        )
        .get_matches();

    let config = load_config(&matches)?;
    init_logger(log_level(&config, matches.occurrences_of("verbose")))?;

    let controller = load_controller(&config)?;

    println!("Welcome to tourism-analytics {}", VERSION);
    print_home(&controller);
    println!("Type 'help' to list the commands");

    serve(&controller, &config)
}
