use std::io;
use std::time::Duration;
use anyhow::{anyhow, Result};
use env_logger::Builder;
use gumdrop::Options;
use log::{info, LevelFilter};
use shiplift::Docker;
use cnetstat::output::Format;
use cnetstat::proc::{self, ProcFs};
use cnetstat::resolve::Resolver;
use cnetstat::snapshot::Snapshot;
use cnetstat::source::DEFAULT_TIMEOUT;
use cnetstat::summary::summarize;

#[derive(Options)]
pub struct Args {
    #[options(help = "print help message")]
    help: bool,
    #[options(help = "output format, 'table' or 'json'", meta = "FORMAT")]
    format: Option<Format>,
    #[options(help = "count connections per container and remote endpoint")]
    summarize: bool,
    #[options(help = "timeout for each external command, in seconds", meta = "SECS")]
    timeout: Option<u64>,
    #[options(count, help = "increase log verbosity")]
    verbose: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args   = Args::parse_args_default_or_exit();
    let format = args.format.unwrap_or_default();
    let limit  = args.timeout.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT);

    let mut builder = Builder::from_default_env();
    builder.filter(None, match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });
    builder.init();

    if !proc::is_root() {
        return Err(anyhow!("cnetstat must run as root"));
    }

    let docker   = Docker::new();
    let snapshot = Snapshot::capture(&docker, limit).await?;
    let resolver = Resolver::new(snapshot.identities, ProcFs);
    let records  = resolver.resolve_all(snapshot.connections);

    info!("resolved {} connections", records.len());

    let stdout = io::stdout();
    match args.summarize {
        true  => format.write(&summarize(&records), stdout.lock()),
        false => format.write(&records, stdout.lock()),
    }
}
