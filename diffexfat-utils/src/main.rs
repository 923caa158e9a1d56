#[macro_use]
extern crate log;

mod cmp;
mod diff;
mod dump;
mod error;
mod image;
mod info;

use clap::Parser;

#[derive(Debug, clap::Args)]
struct Diff {
    /// Image before the change
    old: String,
    /// Image after the change, must share size and boot sector with the old one
    new: String,
    /// Find differing bytes with external `cmp -l` instead of comparing in-process
    #[clap(long)]
    cmp: bool,
}

#[derive(Debug, clap::Args)]
struct Sector {
    /// exfat image to dump from
    #[clap(short, long)]
    device: String,
    /// Sector index from start of volume
    index: u64,
    /// Number of sectors to dump
    #[clap(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=4096))]
    count: u64,
}

#[derive(Debug, clap::Args)]
struct Cluster {
    /// exfat image to dump from
    #[clap(short, long)]
    device: String,
    /// Cluster index, the first cluster is 2
    index: u32,
    /// Number of clusters to dump
    #[clap(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=64))]
    count: u64,
}

#[derive(Debug, clap::Args)]
struct Info {
    /// exfat image to inspect
    #[clap(short, long)]
    device: String,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Compare 2 exfat images and print differing bytes by region
    Diff(Diff),
    /// Hex dump sectors
    Sector(Sector),
    /// Hex dump clusters
    Cluster(Cluster),
    /// Print volume geometry and region boundaries
    Info(Info),
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    #[clap(subcommand)]
    action: Action,
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stderr).init();

    let result = match args.action {
        Action::Diff(args) => diff::diff(&args.old, &args.new, args.cmp),
        Action::Sector(args) => dump::sector(&args.device, args.index, args.count),
        Action::Cluster(args) => dump::cluster(&args.device, args.index, args.count),
        Action::Info(args) => info::info(&args.device),
    };
    if let Some(error) = result.err() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
