use super::IOArgs;
use clap::Subcommand;
use rust_decimal::Decimal;

mod inspect;
mod solve;

pub use solve::Bias;

#[derive(Subcommand)]
pub enum Commands {
    /// Solve the auction(s) and report the equilibrium
    Solve {
        #[command(flatten)]
        io: IOArgs,

        /// Which end of the clearing band to quote a single price from
        #[arg(short, long, default_value = "midpoint")]
        bias: Bias,
    },

    /// Report demand, supply, and whether the market clears at a given price
    Inspect {
        #[command(flatten)]
        io: IOArgs,

        /// The price to inspect the market at
        #[arg(short, long, allow_negative_numbers = true)]
        price: Decimal,
    },
}

impl Commands {
    pub fn evaluate(self) -> anyhow::Result<()> {
        match self {
            Self::Solve { io, bias } => solve::run(io, bias),
            Self::Inspect { io, price } => inspect::run(io, price),
        }
    }
}
