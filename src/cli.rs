use std::path::PathBuf;

use clap::Parser;

use crate::summary::MAX_SUMMARY_LINES;

#[derive(Parser, Debug)]
#[command(
    name = "h1b-counting",
    version,
    about = "Top occupations and worksite states among certified applications"
)]
pub struct Cli {
    #[arg(help = "`;`-delimited application records, header on the first line")]
    pub input: PathBuf,
    #[arg(help = "Where to write the top occupations summary")]
    pub occupation_output: PathBuf,
    #[arg(help = "Where to write the top states summary")]
    pub state_output: PathBuf,
    #[arg(long, default_value_t = MAX_SUMMARY_LINES, help = "Maximum ranked rows per summary")]
    pub limit: usize,
    #[arg(long, help = "Print a machine-readable JSON run summary")]
    pub json: bool,
}
