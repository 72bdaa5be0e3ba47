use std::path::{Path, PathBuf};

use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::file_service::FsFileService;
use crate::io::paths;
use crate::io::recovery;
use crate::io::store::TargetStore;
use crate::model::target::TargetKind;
use crate::ops::registry::TargetRegistry;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let store = resolve_store(cli.store.as_deref())?;

    match cli.command {
        None => Err("no command given (try `foobs --help`)".into()),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&store, args, json),
            Commands::Show(args) => cmd_show(&store, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&store, args, json),
            Commands::Edit(args) => cmd_edit(&store, args, json),
            Commands::Set(args) => cmd_set(&store, args, json),
            Commands::Inc(args) => cmd_step(&store, args.number, args.delta, json),
            Commands::Dec(args) => {
                cmd_step(&store, args.number, args.delta.saturating_neg(), json)
            }
            Commands::Rm(args) => cmd_rm(&store, args),
            Commands::Mv(args) => cmd_mv(&store, args),

            // Maintenance
            Commands::Recovery(args) => cmd_recovery(&store, args, json),
            Commands::Config(args) => cmd_config(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The store named by `--store`, or the default per-user one.
pub fn resolve_store(override_path: Option<&str>) -> Result<TargetStore, Box<dyn std::error::Error>> {
    match override_path {
        Some(p) => {
            let abs = std::path::absolute(p)
                .map_err(|e| format!("cannot resolve --store path '{}': {}", p, e))?;
            Ok(TargetStore::new(abs))
        }
        None => Ok(TargetStore::default_location()),
    }
}

fn open_registry(store: &TargetStore) -> TargetRegistry {
    TargetRegistry::open(Box::new(FsFileService), store.clone())
}

/// Convert a 1-based target number into an index.
fn index_of(registry: &TargetRegistry, number: usize) -> Result<usize, Box<dyn std::error::Error>> {
    if number == 0 || number > registry.len() {
        return Err(match registry.len() {
            0 => format!("no target #{} (the list is empty)", number),
            n => format!("no target #{} (have 1-{})", number, n),
        }
        .into());
    }
    Ok(number - 1)
}

fn parse_kind(s: &str) -> Result<TargetKind, Box<dyn std::error::Error>> {
    Ok(s.parse::<TargetKind>()?)
}

fn absolute_path(p: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if p.trim().is_empty() {
        return Err("no target file given".into());
    }
    Ok(std::path::absolute(p).map_err(|e| format!("cannot resolve path '{}': {}", p, e))?)
}

fn default_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Print degraded-I/O warnings collected during the command.
fn report_warnings(registry: &mut TargetRegistry) {
    for w in registry.take_warnings() {
        eprintln!("warning: {}", w);
    }
}

fn print_target(registry: &TargetRegistry, index: usize, json: bool) -> CmdResult {
    let Some(target) = registry.get(index) else {
        return Ok(());
    };
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&target_to_json(index, target))?
        );
    } else {
        print!("{}", format_target_detail(index, target));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &TargetStore, args: ListArgs, json: bool) -> CmdResult {
    let registry = open_registry(store);
    let filter = match args.filter.as_deref() {
        Some(pattern) => Some(
            Regex::new(&format!("(?i){}", pattern))
                .map_err(|e| format!("invalid filter: {}", e))?,
        ),
        None => None,
    };

    let rows: Vec<(usize, &crate::model::Target)> = registry
        .targets()
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            filter.as_ref().is_none_or(|re| {
                re.is_match(&t.display_name) || re.is_match(&t.path.to_string_lossy())
            })
        })
        .collect();

    if json {
        let items: Vec<TargetJson> = rows.iter().map(|(i, t)| target_to_json(*i, t)).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("No targets yet.");
        println!();
        println!("Add one with `foobs add <file> --type integer`, or run `foobs` for the TUI.");
        return Ok(());
    }
    for line in format_target_table(&rows) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_show(store: &TargetStore, args: ShowArgs, json: bool) -> CmdResult {
    let registry = open_registry(store);
    let index = index_of(&registry, args.number)?;
    print_target(&registry, index, json)
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(store: &TargetStore, args: AddArgs, json: bool) -> CmdResult {
    let kind = parse_kind(&args.kind)?;
    let path = absolute_path(&args.path)?;
    let name = args.name.unwrap_or_else(|| default_name(&path));

    let mut registry = open_registry(store);
    if registry.targets().iter().any(|t| t.path == path) {
        eprintln!(
            "warning: {} is already a target; both entries will write to it",
            path.display()
        );
    }
    registry.create(path, &name, kind)?;
    report_warnings(&mut registry);

    let index = registry.len() - 1;
    if json {
        print_target(&registry, index, true)
    } else {
        println!("Added #{}: {}", index + 1, name);
        Ok(())
    }
}

fn cmd_edit(store: &TargetStore, args: EditArgs, json: bool) -> CmdResult {
    let mut registry = open_registry(store);
    let index = index_of(&registry, args.number)?;
    let current = registry.targets()[index].clone();

    let path = match args.path.as_deref() {
        Some(p) => absolute_path(p)?,
        None => current.path,
    };
    let name = args.name.unwrap_or(current.display_name);
    let kind = match args.kind.as_deref() {
        Some(k) => parse_kind(k)?,
        None => current.kind,
    };

    registry.update(index, path, &name, kind)?;
    report_warnings(&mut registry);
    if json {
        print_target(&registry, index, true)
    } else {
        println!("Updated #{}: {}", index + 1, name);
        Ok(())
    }
}

fn cmd_set(store: &TargetStore, args: SetArgs, json: bool) -> CmdResult {
    let mut registry = open_registry(store);
    let index = index_of(&registry, args.number)?;
    registry.set_content(index, &args.text)?;
    report_warnings(&mut registry);
    if json {
        print_target(&registry, index, true)
    } else {
        println!("{}", registry.targets()[index].content);
        Ok(())
    }
}

fn cmd_step(store: &TargetStore, number: usize, delta: i64, json: bool) -> CmdResult {
    let mut registry = open_registry(store);
    let index = index_of(&registry, number)?;
    let value = registry.adjust(index, delta)?;
    report_warnings(&mut registry);
    if json {
        print_target(&registry, index, true)
    } else {
        println!("{}", value);
        Ok(())
    }
}

fn cmd_rm(store: &TargetStore, args: RmArgs) -> CmdResult {
    let mut registry = open_registry(store);
    let index = index_of(&registry, args.number)?;
    let removed = registry.remove(index, args.delete_file).map_err(|e| {
        format!("{} (the target was kept)", e)
    })?;
    report_warnings(&mut registry);
    if args.delete_file {
        println!(
            "Removed: {} (deleted {})",
            removed.display_name,
            removed.path.display()
        );
    } else {
        println!("Removed: {}", removed.display_name);
    }
    Ok(())
}

fn cmd_mv(store: &TargetStore, args: MvArgs) -> CmdResult {
    let mut registry = open_registry(store);
    let from = index_of(&registry, args.from)?;
    let to = index_of(&registry, args.to)?;
    registry.move_target(from, to)?;
    report_warnings(&mut registry);
    println!(
        "Moved {} to #{}",
        registry.targets()[to].display_name,
        to + 1
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

fn cmd_recovery(store: &TargetStore, args: RecoveryCmd, json: bool) -> CmdResult {
    let log_path = paths::recovery_log_path(store.path());

    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", log_path.display());
            Ok(())
        }
        Some(RecoveryAction::Prune(prune)) => {
            let before = match prune.before.as_deref() {
                Some(s) => Some(
                    chrono::DateTime::parse_from_rfc3339(s)
                        .map_err(|e| format!("invalid --before timestamp '{}': {}", s, e))?
                        .with_timezone(&chrono::Utc),
                ),
                None => None,
            };
            let removed = recovery::prune_recovery(&log_path, before, prune.all)?;
            println!("Pruned {} entr{}", removed, if removed == 1 { "y" } else { "ies" });
            Ok(())
        }
        None => {
            let entries = recovery::read_recovery_entries(&log_path, Some(args.limit.unwrap_or(10)));
            if json {
                let items: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if entries.is_empty() {
                println!("Recovery log is empty.");
            } else {
                for entry in &entries {
                    print!("{}", entry.to_markdown());
                }
            }
            Ok(())
        }
    }
}

fn cmd_config(args: ConfigCmd) -> CmdResult {
    let config_path = paths::config_path();
    match args.action {
        ConfigAction::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        ConfigAction::Set(set) => {
            let mut doc = config_io::read_config_document(&config_path)?;
            config_io::set_value(&mut doc, &set.key, &set.value)?;
            config_io::write_config_document(&config_path, &doc)?;
            println!("{} = {}", set.key, set.value);
            Ok(())
        }
    }
}
