use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use loadout_core::core_api::{ApplyPolicy, CoreError, Engine};
use loadout_core::host::{MemoryHost, World};
use loadout_core::preset::PresetStore;
use loadout_core::storage::{default_presets_path, load_store, save_store};
use loadout_render::{
    render_apply_json, render_apply_steps_text, render_apply_text, render_capture_json,
    render_capture_text, render_preset_json, render_preset_text, render_store_json,
    render_store_text,
};
use serde_json::Value as JsonValue;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    SkipIfPresent,
    ClearThenReapply,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Preset file (defaults to ~/.loadout/presets.json)
    #[arg(long, global = true, value_name = "PATH", env = "LOADOUT_PRESETS")]
    presets: Option<PathBuf>,
    /// World snapshot holding the items on you and in storage
    #[arg(long, global = true, value_name = "PATH", env = "LOADOUT_WORLD")]
    world: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_enum,
        env = "LOADOUT_POLICY",
        default_value_t = PolicyArg::SkipIfPresent
    )]
    policy: PolicyArg,
    #[arg(long, global = true)]
    json: bool,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every preset
    List,
    /// Show the items saved in one preset
    Show {
        #[arg(value_name = "SLOT", value_parser = parse_slot)]
        slot: usize,
    },
    /// Save what you currently hold into a preset
    Save {
        #[arg(value_name = "SLOT", value_parser = parse_slot)]
        slot: usize,
    },
    /// Fetch a preset's items from storage
    Apply {
        #[arg(value_name = "SLOT", value_parser = parse_slot)]
        slot: usize,
        /// Also print one line per wanted item
        #[arg(long)]
        steps: bool,
    },
    /// Append an empty preset
    Add,
    /// Delete a preset (at least three are always kept)
    Remove {
        #[arg(value_name = "SLOT", value_parser = parse_slot)]
        slot: usize,
    },
    /// Rename a preset
    Rename {
        #[arg(value_name = "SLOT", value_parser = parse_slot)]
        slot: usize,
        #[arg(value_name = "NAME")]
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let presets_path = cli.presets.clone().unwrap_or_else(default_presets_path);
    debug!(path = %presets_path.display(), "using preset file");
    let mut store = load_store(&presets_path);
    let engine = Engine::with_policy(to_core_policy(cli.policy));

    match cli.command {
        Command::List => {
            if cli.json {
                print_json(&render_store_json(&store));
            } else {
                print!("{}", render_store_text(&store));
            }
        }
        Command::Show { slot } => {
            let preset = store.get(slot).unwrap_or_else(|| {
                fail(&format!(
                    "preset {} does not exist (have {})",
                    slot + 1,
                    store.len()
                ))
            });
            if cli.json {
                print_json(&render_preset_json(slot, preset));
            } else {
                print!("{}", render_preset_text(slot, preset));
            }
        }
        Command::Save { slot } => {
            let host = MemoryHost::new(load_world(cli.world.as_deref()));
            let report = engine
                .save_loadout(&mut store, slot, &host)
                .unwrap_or_else(|e| fail_core(&e));
            persist(&presets_path, &store);
            if cli.json {
                print_json(&render_capture_json(slot, &report));
            } else {
                print!("{}", render_capture_text(slot, &report));
            }
        }
        Command::Apply { slot, steps } => {
            let world_path = require_world(cli.world.as_deref());
            let mut host = MemoryHost::new(load_world(Some(world_path)));
            let report = engine
                .apply_loadout(&store, slot, &mut host)
                .unwrap_or_else(|e| fail_core(&e));
            if !host.moves().is_empty() {
                host.world().write(world_path).unwrap_or_else(|e| {
                    eprintln!("Error writing {}: {}", world_path.display(), e.message);
                    process::exit(1);
                });
            }
            if cli.json {
                print_json(&render_apply_json(slot, &report));
            } else {
                print!("{}", render_apply_text(slot, &report));
                if steps {
                    print!("{}", render_apply_steps_text(&report));
                }
            }
        }
        Command::Add => {
            let index = engine.add_preset(&mut store);
            persist(&presets_path, &store);
            if cli.json {
                print_json(&render_preset_json(index, &store.presets()[index]));
            } else {
                println!("Added preset {}", index + 1);
            }
        }
        Command::Remove { slot } => {
            engine
                .remove_preset(&mut store, slot)
                .unwrap_or_else(|e| fail_core(&e));
            persist(&presets_path, &store);
            if cli.json {
                print_json(&render_store_json(&store));
            } else {
                println!("Removed preset {}", slot + 1);
            }
        }
        Command::Rename { slot, name } => {
            engine
                .rename_preset(&mut store, slot, &name)
                .unwrap_or_else(|e| fail_core(&e));
            persist(&presets_path, &store);
            if cli.json {
                print_json(&render_preset_json(slot, &store.presets()[slot]));
            } else {
                println!("Renamed preset {} to {}", slot + 1, store.presets()[slot].name);
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn require_world(world: Option<&Path>) -> &Path {
    world.unwrap_or_else(|| {
        eprintln!("--world <PATH> is required for this command");
        process::exit(2);
    })
}

fn load_world(world: Option<&Path>) -> World {
    let path = require_world(world);
    World::load(path).unwrap_or_else(|e| {
        eprintln!("Error loading world {}: {}", path.display(), e.message);
        process::exit(1);
    })
}

fn persist(path: &Path, store: &PresetStore) {
    save_store(path, store).unwrap_or_else(|e| {
        eprintln!("Error saving presets: {}", e.message);
        process::exit(1);
    });
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn fail_core(e: &CoreError) -> ! {
    fail(&e.message)
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn parse_slot(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(slot) if slot >= 1 => Ok(slot - 1),
        _ => Err(format!(
            "invalid slot '{value}', expected a preset number starting at 1"
        )),
    }
}

fn to_core_policy(policy: PolicyArg) -> ApplyPolicy {
    match policy {
        PolicyArg::SkipIfPresent => ApplyPolicy::SkipIfPresent,
        PolicyArg::ClearThenReapply => ApplyPolicy::ClearThenReapply,
    }
}
