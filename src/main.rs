use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use scenario_builder::domain::builder::ScenarioBuilder;
use scenario_builder::domain::global_config::global_config::AuthoringMode;
use scenario_builder::domain::overlay::OverlayOutcome;
use scenario_builder::gateway::client::SimulationGateway;
use scenario_builder::loader::script::{load_script, replay};
use scenario_builder::logger;
use scenario_builder::settings::GatewaySettings;

/// Builds jamming scenarios for the simulation generation service.
#[derive(Parser, Debug)]
#[command(name = "scenario-builder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base url of the generation service API.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Base url the `/maps/*.geojson` overlays are served from.
    #[arg(long, global = true)]
    static_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the maps the service can generate scenarios for.
    Maps,

    /// Fetch the geometry overlay of a map and print its bounds.
    Overlay { map: String },

    /// Replay an authoring script and print the request body.
    Assemble {
        script: PathBuf,

        #[arg(long)]
        pretty: bool,
    },

    /// Replay an authoring script, submit it and save the returned archive.
    Submit {
        script: PathBuf,

        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

impl Cli {
    fn settings(&self) -> GatewaySettings {
        let mut settings = GatewaySettings::from_env();
        if let Some(url) = &self.api_url {
            settings = settings.with_api_base_url(url.as_str());
            if self.static_url.is_none() {
                settings = settings.with_static_base_url(url.as_str());
            }
        }
        if let Some(url) = &self.static_url {
            settings = settings.with_static_base_url(url.as_str());
        }
        settings
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();
    let gateway = SimulationGateway::new(cli.settings()).context("failed to create HTTP client")?;

    match cli.command {
        Command::Maps => {
            for map in gateway.list_maps().await? {
                println!("{}", map);
            }
        }
        Command::Overlay { map } => {
            let mut builder = ScenarioBuilder::new(AuthoringMode::Granular);
            builder.select_map(&map);

            match builder.load_pending_overlay(&gateway).await {
                Some(OverlayOutcome::Applied(Some(bounds))) => {
                    println!("{} {} {} {}", bounds.south_west.lat, bounds.south_west.lng, bounds.north_east.lat, bounds.north_east.lng);
                }
                Some(OverlayOutcome::Applied(None)) => println!("overlay has no positions"),
                Some(outcome) => anyhow::bail!("no overlay for '{}' ({:?})", map, outcome),
                None => anyhow::bail!("'{}' is not a road network file", map),
            }
        }
        Command::Assemble { script, pretty } => {
            let script = load_script(&script).with_context(|| format!("failed to load '{}'", script.display()))?;
            let assembly = replay(script)?.assemble()?;

            for warning in &assembly.warnings {
                eprintln!("warning: {}", warning);
            }
            let json = if pretty { assembly.body.to_json_pretty()? } else { String::from_utf8(assembly.body.to_json_bytes()?)? };
            println!("{}", json);
        }
        Command::Submit { script, output_dir } => {
            let script = load_script(&script).with_context(|| format!("failed to load '{}'", script.display()))?;
            let assembly = replay(script)?.assemble()?;

            for warning in &assembly.warnings {
                eprintln!("warning: {}", warning);
            }
            let archive = gateway.submit(&assembly.body, &output_dir).await?;
            println!("{}", archive.path.display());
        }
    }

    Ok(())
}
