mod calc;
mod cli;
mod error;
mod fmt;
mod grader;
mod ledger;
mod logging;
mod migrator;
mod models;
mod query;
mod service;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    logging::init_logging();
    let cli = Cli::parse();
    let ledger = cli.ledger.as_deref();

    let result = match cli.command {
        Commands::Init { rate } => cli::init::run(ledger, rate),
        Commands::Add {
            item,
            platform,
            wear,
            buy_price,
            buy_date,
            sell_price,
            sell_platform,
            sell_date,
            actual_price,
        } => cli::add::run(
            ledger,
            cli::add::AddArgs {
                item,
                platform,
                wear,
                buy_price,
                buy_date,
                sell_price,
                sell_platform,
                sell_date,
                actual_price,
            },
        ),
        Commands::Edit {
            index,
            wear,
            buy_price,
            sell_price,
            sell_platform,
            sell_date,
            clear_sell_date,
            actual_price,
        } => cli::edit::run(
            ledger,
            index,
            cli::edit::EditArgs {
                wear,
                buy_price,
                sell_price,
                sell_platform,
                sell_date,
                clear_sell_date,
                actual_price,
            },
        ),
        Commands::Delete { index } => cli::delete::run(ledger, index),
        Commands::List { search, sort } => cli::list::run(ledger, search.as_deref(), &sort),
        Commands::Import { file, format } => cli::import::run(ledger, &file, format.as_deref()),
        Commands::Status => cli::status::run(ledger),
        Commands::Calc { command } => cli::calc::run(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
