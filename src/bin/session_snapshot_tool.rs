use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use microscope_sim::SessionState;
use microscope_sim::catalog::{ScenarioCatalog, TutorialCatalog};
use microscope_sim::persistence::{
    ImageRequirement, PersistenceReconciler, RestoredSession, SessionSnapshotContractV1,
};
use microscope_sim::telemetry::{self, TelemetryConfig};

#[derive(Debug)]
enum Command {
    /// Print a summary of a saved snapshot.
    Inspect { path: PathBuf, normalize: bool },
    /// Write a fresh snapshot with a scenario already activated.
    Create { scenario_id: String, out: PathBuf },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let scenarios = ScenarioCatalog::builtin();
    let tutorials = TutorialCatalog::builtin();
    let reconciler = PersistenceReconciler::new(&scenarios, &tutorials);
    let (command, verbose) = parse_args()?;
    if verbose {
        let _ = telemetry::init_tracing(&TelemetryConfig::verbose());
    } else {
        let _ = telemetry::init_default_tracing();
    }

    match command {
        Command::Inspect { path, normalize } => {
            let raw = fs::read(&path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            let restored = reconciler.restore(&raw).map_err(|err| err.to_string())?;
            print_summary(&restored, &tutorials);
            if normalize {
                let contract =
                    SessionSnapshotContractV1::new(restored.state.clone(), restored.saved_at);
                write_contract(&contract, &path)?;
                println!("normalized snapshot written to {}", path.display());
            }
        }
        Command::Create { scenario_id, out } => {
            let mut state = SessionState::default();
            scenarios
                .activate(&scenario_id, &mut state)
                .ok_or_else(|| format!("unknown scenario `{scenario_id}`"))?;
            let contract = SessionSnapshotContractV1::new(state, Some(Utc::now()));
            write_contract(&contract, &out)?;
            println!("snapshot for `{scenario_id}` written to {}", out.display());
        }
    }
    Ok(())
}

fn write_contract(contract: &SessionSnapshotContractV1, path: &Path) -> Result<(), String> {
    let serialized = contract.to_json_pretty().map_err(|err| err.to_string())?;
    fs::write(path, format!("{serialized}\n"))
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn print_summary(restored: &RestoredSession, tutorials: &TutorialCatalog) {
    let state = &restored.state;
    match restored.saved_at {
        Some(saved_at) => println!("saved at: {}", saved_at.to_rfc3339()),
        None => println!("saved at: unknown"),
    }
    match &restored.image {
        ImageRequirement::Placeholder => println!("image: placeholder"),
        ImageRequirement::Scenario { id, image_ref } => {
            println!("image: scenario `{id}` ({image_ref})");
        }
        ImageRequirement::ReuploadRequired { name } => {
            println!("image: custom `{name}` (re-upload required)");
        }
    }

    let readouts = state.optics.readouts();
    println!(
        "optics: zoom={}x blur={} brightness={}% contrast={}% diaphragm={}% stage=({}, {})",
        readouts.zoom,
        readouts.blur,
        readouts.brightness_percent,
        readouts.contrast_percent,
        readouts.field_diaphragm_percent,
        readouts.stage_x,
        readouts.stage_y,
    );

    println!("annotations: {}", state.annotations.len());
    for annotation in state.annotations.all() {
        let feedback = match annotation.feedback.label() {
            "" => "unanswered",
            label => label,
        };
        println!(
            "  #{} ({:.1}%, {:.1}%) {} [{}]",
            annotation.id, annotation.x_percent, annotation.y_percent, annotation.question, feedback
        );
    }

    match state.tutorial_run.view(tutorials) {
        Some(view) => println!(
            "tutorial: {} step {}/{}",
            view.tutorial_id, view.step_number, view.step_count
        ),
        None => println!("tutorial: inactive"),
    }
}

fn parse_args() -> Result<(Command, bool), String> {
    let mut file: Option<PathBuf> = None;
    let mut normalize = false;
    let mut verbose = false;
    let mut scenario_id: Option<String> = None;
    let mut out: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --file".to_owned())?;
                file = Some(PathBuf::from(value));
            }
            "--normalize" => normalize = true,
            "-v" | "--verbose" => verbose = true,
            "--new-scenario" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --new-scenario".to_owned())?;
                scenario_id = Some(value);
            }
            "--out" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out".to_owned())?;
                out = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin session_snapshot_tool -- --file <path> [--normalize] [--verbose]\n       cargo run --bin session_snapshot_tool -- --new-scenario <id> --out <path> [--verbose]"
                );
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    let command = match (file, scenario_id, out) {
        (Some(path), None, None) => Command::Inspect { path, normalize },
        (None, Some(scenario_id), Some(out)) => Command::Create { scenario_id, out },
        (None, Some(_), None) => return Err("--new-scenario requires --out".to_owned()),
        _ => {
            return Err(
                "expected either --file <path> or --new-scenario <id> --out <path>".to_owned(),
            );
        }
    };
    Ok((command, verbose))
}
