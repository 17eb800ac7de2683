mod init;
pub use init::cmd_init;

use std::collections::HashSet;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, CONFIG_KEYS};
use crate::io::lock::FileLock;
use crate::io::recovery;
use crate::io::store::{self, ChecklistStore, DIR_NAME};
use crate::model::item::{Checklist, FilterMode, ItemId};
use crate::ops::{search, view};
use crate::parse::{self, document};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let start = start_dir(cli.dir.as_deref())?;

    match cli.command {
        None => Err("no command given (run `ck` without arguments for the TUI)".into()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, &start),

            // Read commands
            Commands::List(args) => cmd_list(&start, args, json),
            Commands::Progress => cmd_progress(&start, json),
            Commands::Search(args) => cmd_search(&start, args, json),
            Commands::Export(args) => cmd_export(&start, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&start, args, json),
            Commands::Toggle(args) => cmd_set_checked(&start, &args.item, None, json),
            Commands::Check(args) => cmd_set_checked(&start, &args.item, Some(true), json),
            Commands::Uncheck(args) => cmd_set_checked(&start, &args.item, Some(false), json),
            Commands::Edit(args) => cmd_edit(&start, args, json),
            Commands::Rm(args) => cmd_rm(&start, args, json),
            Commands::Mv(args) => cmd_mv(&start, args, json),
            Commands::Clear(args) => cmd_clear(&start, args, json),
            Commands::Import(args) => cmd_import(&start, args, json),

            // Maintenance
            Commands::Config(args) => cmd_config(&start, args, json),
            Commands::Recovery(args) => cmd_recovery(&start, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Directory to start discovery from: `-C` if given, else the cwd.
pub fn start_dir(dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match dir {
        Some(dir) => Ok(fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?),
        None => Ok(std::env::current_dir()?),
    }
}

/// Discover the checklist, hold its lock, open the store, and run `f`.
///
/// Opening can rewrite the document (legacy ids, corrupt backups), so even
/// read-only commands go through the lock.
fn with_store<T>(
    start: &Path,
    f: impl FnOnce(&mut ChecklistStore) -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    let root = store::discover_root(start)?;
    let _lock = FileLock::acquire_default(&root.join(DIR_NAME))?;
    let mut store = ChecklistStore::open(&root)?;
    for warning in &store.load_warnings {
        eprintln!("warning: {}", warning);
    }
    f(&mut store)
}

/// Shortest id fragment accepted as a prefix or suffix
const MIN_PARTIAL_ID: usize = 4;

/// Resolve a REF: a 1-based position in the full list, or an item id given
/// exactly or by a unique prefix or suffix (listings show the last 8 chars).
fn resolve_ref(list: &Checklist, raw: &str) -> Result<ItemId, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty item reference".into());
    }

    // Digits are a position first; a short id can be all digits too
    let position_err = if raw.chars().all(|c| c.is_ascii_digit()) {
        let n = raw.parse::<usize>().ok();
        if let Some(item) = n
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| list.items.get(i))
        {
            return Ok(item.id.clone());
        }
        Some(format!(
            "no item at position {} (list has {} items)",
            raw,
            list.len()
        ))
    } else {
        None
    };

    if let Some(item) = list.items.iter().find(|i| i.id.as_str() == raw) {
        return Ok(item.id.clone());
    }

    let candidates: Vec<&ItemId> = if raw.len() < MIN_PARTIAL_ID {
        Vec::new()
    } else {
        list.items
            .iter()
            .map(|i| &i.id)
            .filter(|id| id.as_str().starts_with(raw) || id.as_str().ends_with(raw))
            .collect()
    };
    match candidates.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(position_err.unwrap_or_else(|| format!("item not found: {}", raw))),
        many => Err(format!(
            "ambiguous item reference '{}' matches {} items",
            raw,
            many.len()
        )),
    }
}

fn parse_filter(
    raw: Option<&str>,
    store: &ChecklistStore,
) -> Result<FilterMode, Box<dyn std::error::Error>> {
    match raw {
        Some(raw) => Ok(raw.parse::<FilterMode>()?),
        None => Ok(store.config.behavior.default_filter),
    }
}

fn print_item(store: &ChecklistStore, id: &ItemId, json: bool) -> CmdResult {
    let list = store.checklist();
    let position = list
        .position(id)
        .ok_or_else(|| format!("item not found: {}", id))?;
    let item = &list.items[position];
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&item_to_json(position, item))?
        );
    } else {
        println!("{}", format_item_line(position, item, false));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read handlers
// ---------------------------------------------------------------------------

fn cmd_list(start: &Path, args: ListArgs, json: bool) -> CmdResult {
    with_store(start, |store| {
        let filter = parse_filter(args.filter.as_deref(), store)?;
        let list = store.checklist();
        let progress = view::progress(list);

        if json {
            let out = ListJson {
                name: store.config.checklist.name.clone(),
                filter,
                items: view_to_json(list, filter),
                progress,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }

        let lines = format_listing(list, filter, args.ids);
        if lines.is_empty() {
            if list.is_empty() {
                println!("(empty)");
            } else {
                println!("(no {} items)", filter);
            }
        }
        for line in &lines {
            println!("{}", line);
        }
        if !list.is_empty() {
            println!();
            println!("{}", format_progress_bar(&progress, 20));
        }
        Ok(())
    })
}

fn cmd_progress(start: &Path, json: bool) -> CmdResult {
    with_store(start, |store| {
        let progress = view::progress(store.checklist());
        if json {
            println!("{}", serde_json::to_string_pretty(&progress)?);
        } else {
            println!("{}", format_progress_bar(&progress, 20));
        }
        Ok(())
    })
}

fn cmd_search(start: &Path, args: SearchArgs, json: bool) -> CmdResult {
    let re = search::compile_pattern(&args.pattern)
        .ok_or_else(|| format!("invalid search pattern: {}", args.pattern))?;
    with_store(start, |store| {
        let hits = search::search(store.checklist(), &re);
        if json {
            let out: Vec<SearchHitJson> = hits.iter().map(hit_to_json).collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            for hit in &hits {
                println!("{}", format_item_line(hit.index, hit.item, false));
            }
        }
        Ok(())
    })
}

fn cmd_export(start: &Path, args: ExportArgs, json: bool) -> CmdResult {
    let (content, count) = with_store(start, |store| {
        Ok((store.export()?, store.checklist().len()))
    })?;

    let target = args.output.unwrap_or_else(|| {
        format!(
            "checklist-{}.json",
            chrono::Local::now().format("%Y-%m-%d")
        )
    });
    if target == "-" {
        print!("{}", content);
        return Ok(());
    }

    let path = PathBuf::from(&target);
    store::atomic_write(&path, content.as_bytes())
        .map_err(|e| format!("could not write {}: {}", path.display(), e))?;
    if json {
        println!(
            "{}",
            serde_json::json!({ "path": target, "items": count })
        );
    } else {
        println!("exported {} items to {}", count, target);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write handlers
// ---------------------------------------------------------------------------

fn cmd_add(start: &Path, args: AddArgs, json: bool) -> CmdResult {
    let mut raw = args.text.join("\n");
    if args.stdin || (args.text.is_empty() && !std::io::stdin().is_terminal()) {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        if !raw.is_empty() {
            raw.push('\n');
        }
        raw.push_str(&input);
    }
    if parse::parse_lines(&raw).is_empty() {
        return Err("nothing to add (every line was blank)".into());
    }

    with_store(start, |store| {
        let ids = store.add_items(&raw)?;
        let list = store.checklist();
        let added: Vec<(usize, _)> = ids
            .iter()
            .filter_map(|id| list.position(id).map(|p| (p, &list.items[p])))
            .collect();
        if json {
            let out: Vec<ItemJson> = added.iter().map(|(p, item)| item_to_json(*p, item)).collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            for (p, item) in added {
                println!("{}", format_item_line(p, item, false));
            }
        }
        Ok(())
    })
}

/// `checked`: None flips, Some sets explicitly.
fn cmd_set_checked(start: &Path, item: &str, checked: Option<bool>, json: bool) -> CmdResult {
    with_store(start, |store| {
        let id = resolve_ref(store.checklist(), item)?;
        match checked {
            None => store.toggle(&id)?,
            Some(checked) => store.set_checked(&id, checked)?,
        };
        print_item(store, &id, json)
    })
}

fn cmd_edit(start: &Path, args: EditArgs, json: bool) -> CmdResult {
    with_store(start, |store| {
        let id = resolve_ref(store.checklist(), &args.item)?;
        store.edit_text(&id, &args.text)?;
        print_item(store, &id, json)
    })
}

fn cmd_rm(start: &Path, args: RmArgs, json: bool) -> CmdResult {
    with_store(start, |store| {
        // Resolve every ref against the list as it was before any removal
        let mut ids = Vec::new();
        let mut seen = HashSet::new();
        for raw in &args.items {
            let id = resolve_ref(store.checklist(), raw)?;
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }

        let removed = store.delete_items(&ids)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&removed)?);
        } else {
            for item in &removed {
                println!("deleted: {}", item.text);
            }
        }
        Ok(())
    })
}

fn cmd_mv(start: &Path, args: MvArgs, json: bool) -> CmdResult {
    with_store(start, |store| {
        let filter = parse_filter(args.filter.as_deref(), store)?;
        let view = view::view_indices(store.checklist(), filter);
        for n in [args.from, args.to] {
            if n == 0 || n > view.len() {
                return Err(format!(
                    "position {} is out of range ({} view has {} items)",
                    n,
                    filter,
                    view.len()
                )
                .into());
            }
        }
        let id = store.checklist().items[view[args.from - 1]].id.clone();
        store.reorder_in_view(filter, args.from - 1, args.to - 1)?;
        print_item(store, &id, json)
    })
}

fn cmd_clear(start: &Path, args: ClearArgs, json: bool) -> CmdResult {
    let print_cleared = |count: usize| {
        if json {
            println!("{}", serde_json::json!({ "cleared": count }));
        } else if count == 0 {
            println!("nothing to clear");
        } else {
            println!("cleared {} items", count);
        }
    };

    // Ask without holding the lock so the TUI can keep saving meanwhile
    let (count, confirm) = {
        let root = store::discover_root(start)?;
        let _lock = FileLock::acquire_default(&root.join(DIR_NAME))?;
        let store = ChecklistStore::open(&root)?;
        (store.checklist().len(), store.config.behavior.confirm_clear)
    };
    if count == 0 {
        print_cleared(0);
        return Ok(());
    }
    if confirm && !args.yes {
        eprint!("Delete all {} items? [y/N] ", count);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("cancelled");
            return Ok(());
        }
    }

    with_store(start, |store| {
        let now = store.checklist().len();
        if now != count {
            return Err(format!(
                "list changed while waiting for confirmation ({} items, was {}); not cleared",
                now, count
            )
            .into());
        }
        let removed = store.clear_all()?;
        print_cleared(removed.len());
        Ok(())
    })
}

fn cmd_import(start: &Path, args: ImportArgs, json: bool) -> CmdResult {
    // Validate before touching the store; a bad file leaves it as it was
    let text = fs::read_to_string(&args.file)
        .map_err(|e| format!("could not read {}: {}", args.file, e))?;
    let decoded =
        document::decode(&text).map_err(|e| format!("import rejected: {}: {}", args.file, e))?;
    let count = decoded.checklist.len();

    with_store(start, |store| {
        let replaced = store.import_replace(decoded.checklist)?;
        if json {
            println!(
                "{}",
                serde_json::json!({ "imported": count, "replaced": replaced.len() })
            );
        } else {
            println!("imported {} items (replaced {})", count, replaced.len());
            if decoded.assigned_ids > 0 {
                println!("  {} items had no id and were given one", decoded.assigned_ids);
            }
        }
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Maintenance handlers
// ---------------------------------------------------------------------------

fn cmd_config(start: &Path, args: ConfigArgs, json: bool) -> CmdResult {
    let root = store::discover_root(start)?;
    let dir = root.join(DIR_NAME);

    match (args.key, args.value) {
        (None, _) => {
            let config = store::read_config(&dir)?;
            let pairs = CONFIG_KEYS
                .iter()
                .map(|key| {
                    Ok(ConfigJson {
                        key: key.to_string(),
                        value: config_io::get_value(&config, key)?,
                    })
                })
                .collect::<Result<Vec<_>, config_io::ConfigError>>()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pairs)?);
            } else {
                for pair in &pairs {
                    println!("{} = {}", pair.key, pair.value);
                }
            }
        }
        (Some(key), None) => {
            let config = store::read_config(&dir)?;
            let value = config_io::get_value(&config, &key)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ConfigJson { key, value })?);
            } else {
                println!("{}", value);
            }
        }
        (Some(key), Some(value)) => {
            let _lock = FileLock::acquire_default(&dir)?;
            let mut doc = config_io::read_config_doc(&dir)?;
            config_io::set_value(&mut doc, &key, &value)?;
            config_io::write_config_doc(&dir, &doc)?;
            let config = store::read_config(&dir)?;
            println!("{} = {}", key, config_io::get_value(&config, &key)?);
        }
    }
    Ok(())
}

fn cmd_recovery(start: &Path, args: RecoveryCmd, json: bool) -> CmdResult {
    let root = store::discover_root(start)?;
    let dir = root.join(DIR_NAME);

    match args.action {
        Some(RecoveryAction::Prune(prune)) => {
            let removed = recovery::prune_recovery(&dir, None, prune.all)?;
            if json {
                println!("{}", serde_json::json!({ "pruned": removed }));
            } else {
                println!("pruned {} entries", removed);
            }
        }
        None => {
            let entries = recovery::read_recovery_entries(&dir, args.limit);
            if json {
                let out: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if entries.is_empty() {
                println!("recovery log is empty");
            } else {
                for entry in &entries {
                    print!("{}", entry.to_markdown());
                }
            }
        }
    }
    Ok(())
}
