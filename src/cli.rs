use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fasal",
    version,
    about = "Short-duration crop recommendations from weather, soil and regional data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override data directory (region catalog and SQLite history)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results (and errors) as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank crops for a farm using the live forecast
    Recommend(RecommendArgs),
    /// Show the season, transition status and guidance for a date
    Season {
        /// Date to classify (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Score a soil against one crop or the whole catalog
    Soil {
        /// Crop id, e.g. BAJRA_01; all crops when omitted
        #[arg(long)]
        crop: Option<String>,
        #[command(flatten)]
        soil: SoilArgs,
    },
    /// List crops, optionally filtered
    Crops {
        #[arg(long)]
        season: Option<String>,
        #[arg(long)]
        region: Option<String>,
        /// Minimum regional suitability when --region is given
        #[arg(long, default_value_t = fasal::catalog::DEFAULT_REGION_THRESHOLD)]
        threshold: f64,
        #[arg(long)]
        min_days: Option<u32>,
        #[arg(long)]
        max_days: Option<u32>,
    },
    /// Manage the region catalog
    Regions {
        #[command(subcommand)]
        command: RegionCommands,
    },
    /// Import and summarise historical weather
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

#[derive(Args)]
pub struct RecommendArgs {
    /// Region id, e.g. PUNE
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub region: Option<String>,
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
    /// Kharif, Rabi or Zaid; detected from today's date when omitted
    #[arg(long)]
    pub season: Option<String>,
    /// None, Limited or Full
    #[arg(long)]
    pub irrigation: Option<String>,
    /// Planning horizon in days (70-120)
    #[arg(long)]
    pub planning_days: Option<u32>,
    /// Number of crops to show
    #[arg(long, default_value_t = 10)]
    pub top: usize,
    #[command(flatten)]
    pub soil: OptionalSoilArgs,
}

/// Soil given as flags; texture, pH and organic matter are required.
#[derive(Args)]
pub struct SoilArgs {
    /// Clay, Loam, Sandy, Clay-Loam or Sandy-Loam
    #[arg(long)]
    pub texture: String,
    #[arg(long)]
    pub ph: f64,
    /// Low, Medium or High
    #[arg(long, default_value = "Medium")]
    pub organic_matter: String,
    /// Poor, Medium or Good
    #[arg(long)]
    pub drainage: Option<String>,
}

/// Soil flags for commands that fall back to the region default.
#[derive(Args)]
pub struct OptionalSoilArgs {
    #[arg(long, requires = "ph")]
    pub texture: Option<String>,
    #[arg(long, requires = "texture")]
    pub ph: Option<f64>,
    #[arg(long)]
    pub organic_matter: Option<String>,
    #[arg(long)]
    pub drainage: Option<String>,
}

#[derive(Subcommand)]
pub enum RegionCommands {
    /// List all regions
    List,
    /// Find the region nearest to a coordinate
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in km; defaults to regions.max_distance_km
        #[arg(long)]
        max_distance: Option<f64>,
    },
    /// Add or update a region
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, default_value_t = 0)]
        elevation: i32,
        #[arg(long, default_value = "Semi-Arid")]
        climate_zone: String,
        #[command(flatten)]
        soil: OptionalSoilArgs,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Download one year of observed weather for a region
    Import {
        #[arg(long)]
        region: String,
        #[arg(long)]
        year: i32,
    },
    /// Monthly statistic over all imported years
    Climatology {
        #[arg(long)]
        region: String,
        #[arg(long)]
        month: u32,
        /// mean, p25, p75, max or min
        #[arg(long, default_value = "mean")]
        stat: String,
    },
    /// Years and record counts stored for a region
    Coverage {
        #[arg(long)]
        region: String,
    },
}
