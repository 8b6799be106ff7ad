use clap::Parser;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

// The top-level arguments -- presently just which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        self.command.evaluate()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Unable to open {target}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to read an auction from {target}")]
    Parse {
        target: String,
        #[source]
        source: serde_json::Error,
    },
}
