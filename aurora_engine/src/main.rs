use std::fs;

use anyhow::{bail, Context, Result};
use aurora_engine::cli::Args;
use aurora_engine::functions::build_dispatcher;
use aurora_engine::{run_script, CallScript, Game, Module};
use aurora_script::Dispatcher;
use clap::Parser;
use env_logger::Env;

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let dispatcher = build_dispatcher().context("building engine function registry")?;
    if args.list_functions {
        print_functions(&dispatcher);
        return Ok(());
    }

    let Some(module_path) = args.module.as_ref() else {
        bail!("--module is required unless --list-functions is given");
    };
    let module = Module::load_from_file(module_path)?;
    println!(
        "Loaded module {} ({} areas, {} objects)",
        module.name(),
        module.area_count(),
        module.objects().len()
    );

    let Some(calls_path) = args.calls.as_ref() else {
        if let Some(path) = args.report_json.as_ref() {
            eprintln!(
                "[aurora_engine] warning: --report-json={} ignored without --calls",
                path.display()
            );
        }
        return Ok(());
    };
    let script = CallScript::load_from_file(calls_path)?;
    let mut game = Game::new(module, args.seed);
    let report = run_script(&mut game, &dispatcher, &script)
        .with_context(|| format!("running call script {}", calls_path.display()))?;

    for (index, result) in report.results.iter().enumerate() {
        println!("{:>3}. {} -> {}", index + 1, result.function, result.result);
    }
    for event in &report.events {
        println!("  event: {event}");
    }

    if let Some(path) = args.report_json.as_ref() {
        let json =
            serde_json::to_string_pretty(&report).context("serializing call report to JSON")?;
        fs::write(path, &json)
            .with_context(|| format!("writing call report to {}", path.display()))?;
        println!("Saved call report to {}", path.display());
    }

    Ok(())
}

fn print_functions(dispatcher: &Dispatcher<Game>) {
    for record in dispatcher.registry().records() {
        let params = record
            .parameters()
            .iter()
            .map(|ty| ty.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let marker = if record.is_implemented() {
            ""
        } else {
            " [unimplemented]"
        };
        println!(
            "{:>4} {} {}({}){}",
            record.id(),
            record.return_type(),
            record.name(),
            params,
            marker
        );
    }
}
