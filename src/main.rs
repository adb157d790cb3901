use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use steam_profile::{FetchKind, FullId, LegacyId, SmallId, SteamApiClient, SteamConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "steam-profile",
    version = "0.1.0",
    about = "Convert Steam ids and query the Steam Web API"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every format of a Steam id (full id, or STEAM_0:u:n)
    Convert {
        id: String,

        /// Treat the id as a small id
        #[arg(short, long)]
        small: bool,
    },
    /// Fetch raw data: info, friends, ban, alias or xmlInfo
    Fetch {
        kind: String,

        /// Full ids, or a custom URL name for xmlInfo
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Check whether a custom profile URL name is taken
    Exists { name: String },
}

fn setup_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,steam_profile=info"));

    fmt()
        .with_env_filter(env_filter)
        .with_timer(fmt::time::SystemTime)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn convert(id: &str, small: bool) -> Result<()> {
    let full_id = if small {
        id.parse::<SmallId>()?.to_full_id()?
    } else if id.trim().starts_with("STEAM_") {
        id.parse::<LegacyId>()?.to_full_id()?
    } else {
        id.parse::<FullId>()?
    };

    println!("full:   {full_id}");
    match full_id.to_small_id() {
        Ok(small_id) => println!("small:  {small_id}"),
        Err(e) => println!("small:  unavailable ({e})"),
    }
    match full_id.to_legacy_id() {
        Ok(legacy_id) => println!("legacy: {legacy_id}"),
        Err(e) => println!("legacy: unavailable ({e})"),
    }
    Ok(())
}

fn api_client() -> Result<SteamApiClient> {
    let config = SteamConfig::from_env()
        .map_err(|e| anyhow!("Failed to load Steam configuration: {e}"))?;
    let client =
        SteamApiClient::new(config).map_err(|e| anyhow!("Failed to build HTTP client: {e}"))?;
    info!("Using Steam API at {}", client.config().api_url);
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();
    let args = Args::parse();

    match args.command {
        Command::Convert { id, small } => convert(&id, small),
        Command::Fetch { kind, values } => {
            let kind = kind.parse::<FetchKind>()?;
            let client = api_client()?;
            match client.fetch(kind, values.as_slice()).await {
                Ok(payload) => {
                    let output = serde_json::to_string_pretty(&payload)
                        .context("Failed to serialize payload")?;
                    println!("{output}");
                    Ok(())
                }
                Err(e) => {
                    println!("{}", serde_json::to_string(&e.to_payload())?);
                    Err(e.into())
                }
            }
        }
        Command::Exists { name } => {
            let client = api_client()?;
            let exists = client.profile_exists(&name).await?;
            println!("{name}: {}", if exists { "exists" } else { "not found" });
            Ok(())
        }
    }
}
