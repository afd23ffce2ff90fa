use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use conlister::adapters::{ChannelSink, PcapBackend, TerminalView};
use conlister::config::AppConfig;
use conlister::domain::{CaptureEngine, ConnectionSession, ConnectionStore, DeviceInfo};

#[derive(Parser, Debug)]
#[clap(version = env!("CONLISTER_VERSION"))]
pub struct Opts {
    /// List capture devices and exit
    #[clap(long, short = 'l')]
    list: bool,

    /// Index of the device to capture on, as printed by --list
    #[clap(long, short = 'd')]
    device: Option<usize>,

    /// Refresh period of the listing, in milliseconds
    #[clap(long)]
    refresh_ms: Option<u64>,

    /// Print a listing of the observed endpoints once the capture stops
    #[clap(long, value_enum)]
    export: Option<Export>,

    /// Configuration file (defaults to the platform config directory)
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Export {
    /// Destination IPs
    Ips,
    /// Destination IP:PORT
    Endpoints,
    /// Source and destination IP:PORT
    All,
}

impl Export {
    fn listing(self, store: &ConnectionStore) -> Vec<String> {
        match self {
            Export::Ips => store.destination_ips(),
            Export::Endpoints => store.destination_endpoints(),
            Export::All => store.all_endpoints(),
        }
    }
}

fn print_devices(devices: &[DeviceInfo]) {
    for (index, device) in devices.iter().enumerate() {
        println!("{}: {}", index, device.label());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(opts.config.as_deref())?;
    let refresh_period = match opts.refresh_ms {
        Some(ms) => Duration::from_millis(ms.max(1)),
        None => config.refresh_period(),
    };

    let (sink, events) = ChannelSink::channel();
    let sink = Arc::new(sink);
    let backend = Arc::new(PcapBackend::new(config.pcap_settings()));
    let mut engine = CaptureEngine::new(backend, sink.clone(), refresh_period);

    let devices = engine.enumerate_devices()?.to_vec();
    if opts.list {
        print_devices(&devices);
        return Ok(());
    }

    let index = match opts.device.or(config.device_index) {
        Some(index) => index,
        None => {
            print_devices(&devices);
            return Err("no capture device selected, pass --device <INDEX>".into());
        }
    };

    let title = match devices.get(index) {
        Some(device) => format!("Connections on {}", device.label()),
        None => "Connections".to_string(),
    };
    let session = ConnectionSession::new(Arc::new(TerminalView::new(title)));
    let session_handle = tokio::spawn(session.run(events));

    sink.clear();
    engine.start(index)?;

    tokio::signal::ctrl_c().await?;
    info!("Interrupted, stopping capture");

    // stop joins the capture and ticker threads; the session ends once the
    // engine and our sink are gone
    tokio::task::spawn_blocking(move || {
        engine.stop();
        drop(engine);
    })
    .await?;
    drop(sink);
    let store = session_handle.await?;

    if let Some(export) = opts.export {
        for line in export.listing(&store) {
            println!("{}", line);
        }
    }

    Ok(())
}
