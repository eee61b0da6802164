use casepack::runner::{self, SourceKind};
use casepack::ArchiveCli;
use clap::Parser;
use std::process;

fn main() {
    let cli = ArchiveCli::parse();
    process::exit(runner::run(&cli, SourceKind::Archive));
}
