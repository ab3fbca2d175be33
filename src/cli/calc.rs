use crate::calc::{batch_profit, domestic_to_float, evaluate, float_to_domestic};
use crate::cli::CalcCommands;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::Settings;

pub fn run(command: CalcCommands) -> Result<()> {
    let rate = |r: Option<f64>| r.unwrap_or_else(|| Settings::load().exchange_rate);
    match command {
        CalcCommands::FloatToCny { price, rate: r } => {
            let cost = float_to_domestic(price, rate(r));
            println!("Total cost ≈ {}", money(cost));
        }
        CalcCommands::CnyToFloat { total, rate: r } => {
            let price = domestic_to_float(total, rate(r));
            println!("CSFloat price ≈ {price:.2}");
        }
        CalcCommands::Profit {
            market,
            pickup,
            quantity,
        } => {
            let p = batch_profit(market, pickup, quantity)?;
            println!("Per item: {}", money(p.unit));
            println!("Total:    {}", money(p.total));
        }
        CalcCommands::Eval { expr } => {
            println!("{}", evaluate(&expr)?);
        }
    }
    Ok(())
}
