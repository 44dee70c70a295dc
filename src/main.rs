use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use transmission_session::{BasicAuth, Config, Connection, TorrentAdd};

#[derive(Parser)]
#[command(version, about = "Talk to a Transmission daemon over its RPC interface")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the daemon, overrides the configuration file
    #[arg(long, env = "TRANSMISSION_URL")]
    url: Option<String>,

    #[arg(long, env = "TRANSMISSION_USER", requires = "password")]
    user: Option<String>,

    #[arg(long, env = "TRANSMISSION_PASSWORD", hide_env_values = true, requires = "user")]
    password: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print transfer speeds and torrent counts
    Stats,
    /// Add torrents by magnet link or URL
    Add {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(long)]
        download_dir: Option<String>,
    },
    /// Upload local .torrent files
    AddFile {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long)]
        download_dir: Option<String>,
    },
}

async fn add_all(client: &Connection, torrents: Vec<(String, TorrentAdd)>) -> Result<()> {
    let results = join_all(torrents.iter().map(|(label, torrent)| async move {
        match client.add(torrent).await {
            Ok(added) => {
                log::info!("added torrent {} from {}", added.name, label);
                true
            }
            Err(e) => {
                log::error!("failed to add torrent {}: {}", label, e);
                false
            }
        }
    }))
    .await;

    let failed = results.iter().filter(|ok| !**ok).count();
    if failed > 0 {
        bail!("{} of {} torrents could not be added", failed, results.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level)?;

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(url) = cli.url {
        config.url = url;
    }
    if let (Some(user), Some(password)) = (cli.user, cli.password) {
        config.auth = Some(BasicAuth { user, password });
    }
    let client = config.connect()?;

    match cli.command {
        Command::Stats => {
            let stats = client.stats().await?;
            println!("{}", stats);
        }
        Command::Add { urls, download_dir } => {
            let torrents = urls
                .into_iter()
                .map(|url| {
                    let mut torrent = TorrentAdd::url(url.clone());
                    if let Some(dir) = &download_dir {
                        torrent = torrent.download_dir(dir.clone());
                    }
                    (url, torrent)
                })
                .collect();
            add_all(&client, torrents).await?;
        }
        Command::AddFile {
            paths,
            download_dir,
        } => {
            let mut torrents = Vec::with_capacity(paths.len());
            for path in paths {
                let mut torrent = TorrentAdd::from_file(&path).await?;
                if let Some(dir) = &download_dir {
                    torrent = torrent.download_dir(dir.clone());
                }
                torrents.push((path.display().to_string(), torrent));
            }
            add_all(&client, torrents).await?;
        }
    }
    Ok(())
}
