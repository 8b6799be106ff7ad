use crate::CliError;
use clap::Args;
use find_eq::io::Input;
use serde::Serialize;
use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};

// Every subcommand reads auctions from somewhere and writes a report somewhere.
// This struct standardizes their implementation.
#[derive(Args)]
pub struct IOArgs {
    /// The auction JSON file ("-" implies stdin)
    #[arg(value_parser = clap::value_parser!(PathOrStd))]
    input: PathOrStd,

    /// The output file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    output: PathOrStd,
}

impl IOArgs {
    pub fn input(&self) -> &PathOrStd {
        &self.input
    }

    pub fn output(&self) -> &PathOrStd {
        &self.output
    }

    pub fn read(&self) -> Result<Input, CliError> {
        let reader: Box<dyn Read> = match &self.input {
            PathOrStd::Path(path) => {
                let file = File::open(path).map_err(|source| CliError::Open {
                    target: self.input.to_string(),
                    source,
                })?;
                Box::new(BufReader::new(file))
            }
            PathOrStd::Std => Box::new(stdin().lock()),
        };

        serde_json::from_reader(reader).map_err(|source| CliError::Parse {
            target: self.input.to_string(),
            source,
        })
    }

    pub fn emit<T: Serialize>(&self, report: &T) -> anyhow::Result<()> {
        let mut output = self.write()?;
        serde_json::to_writer_pretty(&mut output, report)?;
        writeln!(output)?;
        output.flush()?;
        Ok(())
    }

    fn write(&self) -> Result<Box<dyn Write>, CliError> {
        match &self.output {
            PathOrStd::Path(path) => {
                let file = File::create(path).map_err(|source| CliError::Open {
                    target: self.output.to_string(),
                    source,
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
            PathOrStd::Std => Ok(Box::new(stdout().lock())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}

impl fmt::Display for PathOrStd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Std => write!(f, "<stdio>"),
        }
    }
}
