use crate::IOArgs;
use rust_decimal::Decimal;
use tracing::{Level, event};

pub fn run(io: IOArgs, price: Decimal) -> anyhow::Result<()> {
    let input = io.read()?;
    let report = input.inspect(price);
    event!(Level::DEBUG, %price, "inspected");

    io.emit(&report)
}
