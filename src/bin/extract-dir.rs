use casepack::runner::{self, SourceKind};
use casepack::DirectoryCli;
use clap::Parser;
use std::process;

fn main() {
    let cli = DirectoryCli::parse();
    process::exit(runner::run(&cli, SourceKind::Directory));
}
