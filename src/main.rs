extern crate anyhow;

mod config;
mod engine;
mod process;
mod session;
mod shell;
mod skeleton;
mod toolchain;
mod workspace;

use config::Config;
use engine::Engine;
use process::Running;
use session::{IOReader, PromptReader, Reader, Session, Stdio};
use toolchain::{Go, Toolchain};
use workspace::Workspace;

use clap::Parser;
use nix::libc::STDIN_FILENO;
use nix::unistd::isatty;
use std::io::{self, BufReader};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::parse();
    init_logging(&config.log);

    if let Err(e) = run(&config) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(config: &Config) -> anyhow::Result<()> {
    let running = Running::new();
    process::sighook(&running)?;
    let mut go = Go::new(config, running.clone());

    // Dropped last: restores the user's file or removes the scratch module.
    let workspace = match &config.file {
        Some(path) => Workspace::open(path)?,
        None => Workspace::scratch(&mut go)?,
    };
    let engine = Engine::new(
        workspace.skeleton()?,
        workspace.path(),
        workspace.dir(),
        config.max_fixes,
    );

    if isatty(STDIN_FILENO).unwrap_or(false) {
        repl(PromptReader::new(), go, engine, running)
    } else {
        repl(IOReader::new(BufReader::new(io::stdin())), go, engine, running)
    }
}

fn repl<R: Reader, T: Toolchain>(
    reader: R,
    toolchain: T,
    engine: Engine,
    running: Running,
) -> anyhow::Result<()> {
    Session::new(reader, toolchain, engine, Stdio, running).all()
}
