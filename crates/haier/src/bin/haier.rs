use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use haier::HaierClient;
use haier::client::JobGraphArtifact;
use haier::common::serialization::write_bincode;
use haier::common::setup::setup_logging;
use haier::config::{Configuration, HaierConfig};
use haier::discovery::discover_inventory;
use hwres::cluster::ClusterSpecificationBuilder;

#[derive(Parser)]
#[command(author, about, version)]
struct RootOptions {
    /// Enables more verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// TOML file with client configuration
    #[arg(long, global = true, env = "HAIER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    subcmd: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Submits a serialized job graph to HAIER and stores the enriched graph
    Enrich(EnrichOpts),
    /// Prints the slot profiles offered by this node
    Discover(DiscoverOpts),
}

#[derive(Parser)]
struct EnrichOpts {
    /// Serialized job graph
    graph: PathBuf,

    /// Where to write the enriched graph (overwrites the input by default)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct DiscoverOpts {
    /// Number of plain slots per task manager
    #[arg(long, default_value_t = 1)]
    slots: u32,

    /// Do not add accelerator slots
    #[arg(long)]
    no_accelerators: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<HaierConfig> {
    let configuration = match path {
        Some(path) => Configuration::from_file(path)?,
        None => Configuration::new(),
    };
    Ok(HaierConfig::from_configuration(&configuration)?)
}

async fn command_enrich(config: &HaierConfig, opts: EnrichOpts) -> anyhow::Result<()> {
    let graph = JobGraphArtifact::load(&opts.graph)?;
    let enriched = HaierClient::new(config)?.enrich_job_graph(graph).await;
    let output = opts.output.unwrap_or(opts.graph);
    let mut writer = BufWriter::new(File::create(&output)?);
    write_bincode(&mut writer, &enriched)?;
    writer.flush()?;
    for vertex in enriched.vertices() {
        println!("{vertex}: {}", vertex.preferred_resources());
    }
    Ok(())
}

async fn command_discover(config: &HaierConfig, opts: DiscoverOpts) -> anyhow::Result<()> {
    let inventory = discover_inventory(config).await?;
    let cluster = ClusterSpecificationBuilder::default()
        .slots_per_task_manager(opts.slots)
        .use_accelerators(!opts.no_accelerators)
        .build()?;
    for profile in cluster.slot_profiles(&inventory) {
        println!("{profile}");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let opts = RootOptions::parse();
    setup_logging(opts.debug);

    let config = load_config(opts.config.as_ref())?;
    match opts.subcmd {
        SubCommand::Enrich(enrich_opts) => command_enrich(&config, enrich_opts).await,
        SubCommand::Discover(discover_opts) => command_discover(&config, discover_opts).await,
    }
}
