#[macro_use]
extern crate tracing;

use cubeyard::{
    logging::init_logging,
    settings::{
        Settings,
        SETTINGS_FILE_NAME,
    },
    demo::{
        run_headless,
        RunOptions,
    },
};
use std::{
    env::args,
    path::PathBuf,
    process::exit,
};
use anyhow::*;


const CLI_INTRO: &'static str = r#"Cubeyard.

Throw cubes around a field and watch them tumble."#;

const CLI_HELP: &'static str = r#"
Examples:

    [this command]
    Run a scripted session for 600 frames.

    [this command] --ticks=3600 --seed=7 --dump=cubes.json
    Run 3600 frames with fixed randomness, then write every cube's transform to cubes.json.

    [this command] --realtime
    Run against the wall clock until killed.

    [this command] --settings=my_settings.json
    Read settings from somewhere other than settings.json.

    [this command] --write-settings=settings.json
    Write the default settings to a file, then exit.

Env var examples:
    RUST_LOG=cube_physics=trace
    Changes logging levels"#;

const DEFAULT_TICKS: u64 = 600;


fn main() {
    println!("{}", CLI_INTRO);
    let args = args().collect::<Vec<_>>();
    if args.get(1).map(String::as_str) == Some("--help") {
        println!("{}", CLI_HELP);
        return;
    }

    init_logging();
    if let Err(e) = run_from_cli(&args) {
        error!("{:#}", e);
        exit(1);
    }
}

// value of a --name=value argument
fn arg_value<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix(prefix))
        .next()
}

// parse CLI args and run from that
fn run_from_cli(args: &[String]) -> Result<()> {
    for arg in args.iter().skip(1) {
        let known = ["--settings=", "--ticks=", "--seed=", "--dump=", "--write-settings="]
            .iter()
            .any(|prefix| arg.starts_with(prefix))
            || arg == "--realtime";
        ensure!(known, "invalid CLI arg {:?}, try --help", arg);
    }

    if let Some(path) = arg_value(args, "--write-settings=") {
        Settings::default().write(path)
            .with_context(|| format!("writing settings to {}", path))?;
        info!(%path, "wrote default settings");
        return Ok(());
    }

    let mut settings = Settings::read(arg_value(args, "--settings=").unwrap_or(SETTINGS_FILE_NAME));
    if let Some(seed) = arg_value(args, "--seed=") {
        settings.seed = Some(seed.parse().context("invalid --seed")?);
    }

    let realtime = args.iter().any(|arg| arg == "--realtime");
    let frames = match arg_value(args, "--ticks=") {
        Some(ticks) => Some(ticks.parse().context("invalid --ticks")?),
        None if realtime => None,
        None => Some(DEFAULT_TICKS),
    };
    let opts = RunOptions {
        frames,
        realtime,
        dump: arg_value(args, "--dump=").map(PathBuf::from),
    };

    info!(?opts, "starting headless run");
    run_headless(&settings, &opts)?;
    Ok(())
}
