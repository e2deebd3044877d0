use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "delivery-fee")]
#[command(about = "E-commerce delivery fee calculator")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Customer ID (prompted for when omitted)
    #[arg(long)]
    pub customer_id: Option<i64>,

    /// Cart value, e.g. 850.50 (prompted for when omitted)
    #[arg(long)]
    pub cart_value: Option<f64>,

    /// Delivery location, e.g. India, Remote, Outside India
    #[arg(long)]
    pub location: Option<String>,

    /// Look the location up by IP instead of prompting for it
    #[arg(long, conflicts_with = "location")]
    pub geolocate: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "bmi")]
#[command(about = "Body-mass index calculator")]
pub struct BmiArgs {
    /// Height in centimetres (prompted for when omitted)
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kilograms (prompted for when omitted)
    #[arg(long)]
    pub weight: Option<f64>,

    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum LeapSourceKind {
    /// Compute locally
    Local,
    /// Ask the leap-year REST API
    Api,
    /// Ask the generative-language model
    Ai,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "leap-year")]
#[command(about = "Leap year checker")]
pub struct LeapArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = LeapSourceKind::Local)]
    pub source: LeapSourceKind,

    /// Year to check, prompted for when neither --year nor --range is given;
    /// the current year is always checked first
    #[arg(long)]
    pub year: Option<i32>,

    /// Inclusive range of years to list
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub range: Option<Vec<i32>>,

    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
