use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use encoding_rs::Encoding;
use sheet_engine::life::set_hp;
use sheet_engine::progression::set_xp;
use sheet_engine::{
    apply_xp, classify, compute_thresholds, derive_sheet, snapshot_from_json, CharacterClass,
    HitPoints, HpChange, RulesConfig,
};
use serde::Serialize;
use std::{fs, path::Path, path::PathBuf};
use tracing::Level;

#[derive(Args)]
struct RulesArgs {
    /// Builtin rules preset (default, server_hp)
    #[arg(long, default_value = "default")]
    rules: String,
    /// YAML or JSON rules file; overrides --rules
    #[arg(long)]
    rules_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Derive the combat and encumbrance panels from a character snapshot
    Derive {
        /// Path to snapshot JSON (character, inventory, weapon_masteries)
        #[arg(long)]
        file: PathBuf,
        #[command(flatten)]
        rules: RulesArgs,
        /// Print the calculation log instead of JSON
        #[arg(long)]
        log: bool,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Encumbrance thresholds for a strength/constitution pair
    Thresholds {
        #[arg(long)]
        strength: i32,
        #[arg(long)]
        constitution: i32,
        /// Also classify this carried weight
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Apply a hit point change (negative damages, positive heals)
    Hp {
        #[arg(long, allow_negative_numbers = true)]
        current: i32,
        #[arg(long)]
        max: i32,
        #[arg(long, default_value_t = 0)]
        temporary: i32,
        #[arg(long, allow_negative_numbers = true, conflicts_with = "set")]
        delta: Option<i32>,
        /// Grant the delta as temporary hit points
        #[arg(long)]
        temp: bool,
        /// Set current hit points directly
        #[arg(long)]
        set: Option<i32>,
        #[command(flatten)]
        rules: RulesArgs,
    },
    /// Award or set experience points for a class
    Xp {
        #[arg(long)]
        class: String,
        #[arg(long, default_value_t = 0)]
        current: u64,
        #[arg(long, allow_negative_numbers = true, conflicts_with = "set")]
        delta: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        set: Option<i64>,
        #[command(flatten)]
        rules: RulesArgs,
    },
    /// Print the effective rules as YAML
    Rules {
        #[command(flatten)]
        rules: RulesArgs,
    },
}

#[derive(Parser)]
#[command(name = "sheet")]
#[command(about = "Character sheet derived-stats engine")]
struct Cli {
    /// Log engine calculations to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Serialize)]
struct ThresholdReport {
    #[serde(flatten)]
    thresholds: sheet_engine::EncumbranceThresholds,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<sheet_engine::EncumbranceStatus>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Derive {
            file,
            rules,
            log,
            compact,
        } => {
            let rules = load_rules(&rules)?;
            let text = read_text_auto(&file)
                .with_context(|| format!("reading snapshot {}", file.display()))?;
            let snapshot = snapshot_from_json(&text)
                .with_context(|| format!("loading snapshot {}", file.display()))?;
            let sheet = derive_sheet(&snapshot, &rules);
            if log {
                for line in &sheet.log {
                    println!("{line}");
                }
            } else {
                print_json(&sheet, !compact)?;
            }
        }
        Cmd::Thresholds {
            strength,
            constitution,
            weight,
        } => {
            let thresholds = compute_thresholds(strength, constitution);
            let report = ThresholdReport {
                thresholds,
                status: weight.map(|w| classify(w, &thresholds)),
            };
            print_json(&report, true)?;
        }
        Cmd::Hp {
            current,
            max,
            temporary,
            delta,
            temp,
            set,
            rules,
        } => {
            let rules = load_rules(&rules)?;
            let hp = HitPoints {
                current,
                max,
                temporary,
            };
            let next = match (set, delta) {
                (Some(value), _) => HitPoints {
                    current: set_hp(value)?,
                    ..hp
                },
                (None, Some(delta)) => match HpChange::from_delta(delta, temp) {
                    Some(change) => hp.apply(change, &rules.hp),
                    None => hp,
                },
                (None, None) => bail!("pass --delta or --set"),
            };
            print_json(&next, true)?;
        }
        Cmd::Xp {
            class,
            current,
            delta,
            set,
            rules,
        } => {
            let rules = load_rules(&rules)?;
            let class_tag = CharacterClass::parse(&class);
            let table = rules
                .level_table(class_tag)
                .ok_or_else(|| anyhow!("no level table for class '{class}'"))?;
            let outcome = match (set, delta) {
                (Some(value), _) => set_xp(value, table)?,
                (None, Some(delta)) => apply_xp(current, delta, table)?,
                (None, None) => bail!("pass --delta or --set"),
            };
            print_json(&outcome, true)?;
        }
        Cmd::Rules { rules } => {
            let rules = load_rules(&rules)?;
            print!("{}", serde_yaml::to_string(&rules)?);
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_rules(args: &RulesArgs) -> anyhow::Result<RulesConfig> {
    let Some(path) = &args.rules_file else {
        return RulesConfig::builtin(&args.rules)
            .with_context(|| format!("loading builtin rules '{}'", args.rules));
    };
    let text = read_text_auto(path).with_context(|| format!("reading {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let rules = if is_json {
        RulesConfig::from_json_str(&text)
    } else {
        RulesConfig::from_yaml_str(&text)
    };
    rules
        .and_then(RulesConfig::with_builtin_level_tables)
        .with_context(|| format!("parsing rules {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

/// Read a text file, honouring a UTF-8/UTF-16 BOM if present.
fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}
