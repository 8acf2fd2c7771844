mod config;
mod db;
mod error;
mod export;
mod form;
mod ledger;
mod logging;
mod models;
mod report;
mod run;
mod session;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    config.ensure_data_dir()?;
    logging::init(&config)?;

    let db = db::Database::open(&config.db_path())?;
    let mut session = session::Session::open(Box::new(db), config)?;
    tracing::info!(args = args.len().saturating_sub(1), "bakebook starting");

    match args.len() {
        0 | 1 => run::as_tui(&mut session),
        _ => run::as_cli(&args, &mut session),
    }
}
