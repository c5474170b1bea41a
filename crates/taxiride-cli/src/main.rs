//! TaxiRide CLI - inspect and exercise the ride status state machine.

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use taxiride_core::{DriverId, Ride, RideEvent, RideId, RideStatus};

mod config;
mod render;
mod replay;

use config::Config;
use replay::InvalidEventPolicy;

/// TaxiRide CLI - ride status state machine tool
#[derive(Parser)]
#[command(name = "taxiride")]
#[command(about = "Inspect and replay taxi ride status transitions", long_about = None)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log filter (overrides TAXIRIDE_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// What replay does with an event the current status refuses
    #[arg(long, global = true, value_enum)]
    on_invalid: Option<InvalidEventPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show label, progress and allowed events of a status
    Describe {
        /// Ride status (e.g. driver_en_route)
        status: RideStatus,
    },

    /// Compute the status reached by applying an event
    Next {
        /// Current ride status
        status: RideStatus,

        /// Event to apply (e.g. START_RIDE)
        event: RideEvent,
    },

    /// List the events allowed from a status
    Allowed {
        /// Ride status
        status: RideStatus,
    },

    /// Print every legal transition
    Table,

    /// Apply a sequence of events to a ride
    Replay {
        /// Status the ride starts from
        #[arg(long, default_value = "pending")]
        from: RideStatus,

        /// Ride ID to report (generated when omitted)
        #[arg(long)]
        ride_id: Option<String>,

        /// Driver recorded when ASSIGN_DRIVER is applied
        #[arg(long)]
        driver: Option<DriverId>,

        /// Events to apply, in order
        #[arg(required = true)]
        events: Vec<RideEvent>,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli) {
        let message = render::error(&*e, json);
        if json {
            println!("{}", message);
        } else {
            eprintln!("{}", message);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Load config
    let mut config = Config::from_env().with_log_level(cli.log_level);
    config.json = cli.json;
    if let Some(policy) = cli.on_invalid {
        config.on_invalid = policy;
    }

    // Initialize tracing; stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!(?config, "Configuration loaded");

    let output = match cli.command {
        Commands::Describe { status } => render::describe(status, config.json)?,
        Commands::Next { status, event } => render::next(status, event, config.json)?,
        Commands::Allowed { status } => render::allowed(status, config.json)?,
        Commands::Table => render::table(config.json)?,
        Commands::Replay {
            from,
            ride_id,
            driver,
            events,
        } => {
            let id = ride_id.map(RideId::new).unwrap_or_else(RideId::generate);
            let ride = Ride::restore(id, from, 0);
            let outcome = replay::replay(ride, &events, driver.as_ref(), config.on_invalid)?;
            render::replay(&outcome, config.json)?
        }
    };

    println!("{}", output);
    Ok(())
}
