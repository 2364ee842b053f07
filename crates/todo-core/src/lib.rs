pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod prompt;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use todo_shared::{AlwaysConfirm, Confirm, TodoApp};
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(verbose = cli.verbose, quiet = cli.quiet, "starting todo CLI");

    let mut cfg = config::Config::load(cli.todorc.as_deref())?;
    cfg.apply_overrides(cli.rc_overrides.into_iter().map(|kv| (kv.key, kv.value)));

    let data_dir = config::resolve_data_dir(&cfg, cli.data.as_deref())
        .context("failed to resolve data directory")?;

    let storage = datastore::FileStorage::open(&data_dir)
        .with_context(|| format!("failed to open storage at {}", data_dir.display()))?;

    let mut renderer = render::Renderer::new(&cfg);
    let command = match cli.command {
        Some(command) => command,
        None => cli::Command::from_default(&cfg)?,
    };
    debug!(?command, "resolved command");

    let mut confirm: Box<dyn Confirm> = match &command {
        cli::Command::Clear { yes: true } => Box::new(AlwaysConfirm(true)),
        _ => Box::new(prompt::TerminalConfirm::new(
            cfg.get_bool("confirmation").unwrap_or(true),
        )),
    };

    let mut app = TodoApp::start(storage);
    let report = commands::execute(&mut app, command, confirm.as_mut())?;

    if let Some(notice) = &report.notice {
        renderer.print_notice(notice)?;
    }
    if report.status_only {
        renderer.print_status(&report.view)?;
    } else {
        renderer.print_list(&report.view)?;
    }

    info!("done");
    Ok(())
}
