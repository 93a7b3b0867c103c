use std::{fs, path::PathBuf, time::Duration};

use alloy_primitives::Address;
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use recurring_intent::{
    planner::DEFAULT_CHAIN,
    types::destination::parse_address,
    ArtifactStore, Compiled, Compiler, FsArtifactStore, Intent, MemoryArtifactStore, Plan, Planner,
    PlannerConfig, Registry, StaticResolver, Template,
};
use serde_json::Value;
use tracing::debug;

/// Turn a recurring transfer sentence into a plan, contract source and deployment manifest.
///
/// JSON results are written to stdout; logs go to stderr (`RUST_LOG` controls verbosity).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Registry key of the target chain.
    #[arg(long, env = "INTENT_CHAIN", default_value = DEFAULT_CHAIN, global = true)]
    chain: String,

    /// Chain/token registry JSON. The built-in registry is used when omitted.
    #[arg(long, env = "INTENT_REGISTRY", global = true)]
    registry: Option<PathBuf>,

    /// Owner recorded in the plan (eg, the deployer address).
    #[arg(long, env = "DEPLOYER_ADDRESS", value_parser = parse_owner, global = true)]
    owner: Option<Address>,

    /// Name record used for beneficiary resolution, `name=0x...`. Repeatable.
    #[arg(long = "ens", value_parser = parse_record, global = true)]
    records: Vec<(String, String)>,

    /// Deadline for one name lookup.
    #[arg(long, default_value_t = 5_000, global = true)]
    resolve_timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a sentence and print the intent.
    Parse {
        text: String,
    },
    /// Validate an intent against the registry and print the plan.
    Plan {
        #[command(flatten)]
        input: IntentInput,
    },
    /// Compile a plan into contract source and a manifest.
    Compile {
        #[command(flatten)]
        input: CompileInput,

        /// Contract template. The built-in template is used when omitted.
        #[arg(long, env = "INTENT_TEMPLATE")]
        template: Option<PathBuf>,

        /// Directory receiving `contracts/` and `manifests/`.
        #[arg(long, default_value = "generated")]
        out_dir: PathBuf,

        /// Keep artifacts in memory instead of writing them.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct IntentInput {
    /// Intent sentence, eg "Send 10 PYUSD to alice.eth every weekly until ETH > 3000".
    text: Option<String>,

    /// Intent JSON file.
    #[arg(long)]
    intent: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct CompileInput {
    /// Intent sentence.
    text: Option<String>,

    /// Intent JSON file.
    #[arg(long)]
    intent: Option<PathBuf>,

    /// Plan JSON file; skips validation.
    #[arg(long)]
    plan: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recurring_intent=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match &cli.command {
        Command::Parse { text } => serde_json::to_value(parse_text(text)?)?,
        Command::Plan { input } => {
            let intent = load_intent(input.text.as_deref(), input.intent.as_ref())?;
            serde_json::to_value(plan_intent(&cli, &intent).await?)?
        }
        Command::Compile {
            input,
            template,
            out_dir,
            dry_run,
        } => {
            let plan = match &input.plan {
                Some(path) => read_json::<Plan>(path)?,
                None => {
                    let intent = load_intent(input.text.as_deref(), input.intent.as_ref())?;
                    plan_intent(&cli, &intent).await?
                }
            };
            let template = match template {
                Some(path) => Template::from_file(path)?,
                None => Template::builtin()?,
            };
            let compiled = if *dry_run {
                compile(template, MemoryArtifactStore::new(), &plan)?
            } else {
                compile(template, FsArtifactStore::new(out_dir), &plan)?
            };
            serde_json::to_value(compiled)?
        }
    };

    print_json(&output)
}

fn parse_text(text: &str) -> Result<Intent> {
    recurring_intent::parse(text).map_err(|e| anyhow!("{e}"))
}

fn load_intent(text: Option<&str>, file: Option<&PathBuf>) -> Result<Intent> {
    match (text, file) {
        (Some(text), _) => parse_text(text),
        (None, Some(path)) => read_json(path),
        (None, None) => Err(anyhow!("provide an intent sentence or --intent <FILE>")),
    }
}

async fn plan_intent(cli: &Cli, intent: &Intent) -> Result<Plan> {
    let registry = match &cli.registry {
        Some(path) => Registry::from_json_file(path)?,
        None => Registry::builtin(),
    };
    let resolver: StaticResolver = cli.records.iter().cloned().collect();
    debug!(records = resolver.len(), chain = %cli.chain, "planning intent");

    let config = PlannerConfig {
        chain: cli.chain.clone(),
        owner: cli.owner,
        resolve_timeout: Duration::from_millis(cli.resolve_timeout_ms),
        ..PlannerConfig::default()
    };
    let planner = Planner::new(&registry, config, resolver)?;
    planner.validate_and_plan(intent).await.map_err(|e| match e.hint() {
        Some(hint) => anyhow!("{e}\nHint: {hint}"),
        None => anyhow!(e),
    })
}

fn compile<S: ArtifactStore>(template: Template, store: S, plan: &Plan) -> Result<Compiled> {
    Compiler::new(template, store)
        .compile(plan)
        .context("failed compiling plan")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed parsing JSON in {}", path.display()))
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed serialising output")?;
    println!("{rendered}");
    Ok(())
}

fn parse_owner(s: &str) -> Result<Address, String> {
    parse_address(s).ok_or_else(|| format!("expected a 0x-prefixed 20-byte address, got {s:?}"))
}

fn parse_record(s: &str) -> Result<(String, String), String> {
    let (name, address) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=0x..., got {s:?}"))?;
    if name.is_empty() || address.is_empty() {
        return Err(format!("expected name=0x..., got {s:?}"));
    }
    Ok((name.to_string(), address.to_string()))
}
