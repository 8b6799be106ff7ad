use crate::IOArgs;
use clap::ValueEnum;
use find_eq::PriceBias;
use tracing::{Level, event};

// This explicitly articulates the available price selections for the `solve` subcommand
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Bias {
    /// The lowest clearing price
    Buyers,
    /// The highest clearing price
    Sellers,
    /// Halfway between the lowest and highest clearing prices
    Midpoint,
}

impl From<Bias> for PriceBias {
    fn from(value: Bias) -> Self {
        match value {
            Bias::Buyers => PriceBias::FavorBuyers,
            Bias::Sellers => PriceBias::FavorSellers,
            Bias::Midpoint => PriceBias::Midpoint,
        }
    }
}

pub fn run(io: IOArgs, bias: Bias) -> anyhow::Result<()> {
    let input = io.read()?;
    let report = input.solve(bias.into());
    event!(Level::DEBUG, ?bias, "solved");

    io.emit(&report)
}
