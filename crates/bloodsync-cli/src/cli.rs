//! CLI argument definitions for BloodSync.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bloodsync_model::{BloodGroup, Urgency};

#[derive(Parser)]
#[command(
    name = "bloodsync",
    version,
    about = "BloodSync - blood donation coordination",
    long_about = "Coordinate blood donors, requests, and bank inventory.\n\n\
                  Entities live as JSON collections in the data directory and\n\
                  every command operates on them through the fulfillment ledger."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Data directory holding the JSON collections.
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "data",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a system-wide statistics snapshot.
    Stats,

    /// Show per-group inventory with stock levels.
    Inventory,

    /// Run the matcher for a request and print ranked candidates.
    MatchRequest(MatchRequestArgs),

    /// List open requests a donor could serve.
    OpenRequests(OpenRequestsArgs),

    /// Register a new donor.
    RegisterDonor(RegisterDonorArgs),

    /// Register a new requestor (hospital or individual).
    RegisterRequestor(RegisterRequestorArgs),

    /// File a new blood request.
    CreateRequest(CreateRequestArgs),

    /// Donor accepts a request, creating an assignment.
    Accept(AcceptArgs),

    /// Donor confirms the donation for an assignment.
    ConfirmDonation(ConfirmDonationArgs),

    /// Donor gives blood straight to the shared pool.
    DonateInventory(DonateInventoryArgs),

    /// Requestor draws blood straight from stock.
    Withdraw(WithdrawArgs),

    /// Cover part of an open request from stock.
    UseInventory(UseInventoryArgs),

    /// Requestor acknowledges a donor's offer on an assignment.
    ConfirmDonor(ConfirmDonorArgs),

    /// Seed the data directory with a small sample data set.
    DemoData,
}

#[derive(Args)]
pub struct MatchRequestArgs {
    /// Request id (BR-...).
    #[arg(value_name = "REQUEST_ID")]
    pub request_id: String,
}

#[derive(Args)]
pub struct OpenRequestsArgs {
    /// Donor id (DON-...).
    #[arg(value_name = "DONOR_ID")]
    pub donor_id: String,
}

#[derive(Args)]
pub struct RegisterDonorArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Age in years (18-65).
    #[arg(long)]
    pub age: u32,

    #[arg(long)]
    pub gender: String,

    /// Blood group ("A+", "O-", ...).
    #[arg(long = "blood-group")]
    pub blood_group: BloodGroup,

    /// Body weight in kilograms (50 minimum).
    #[arg(long = "weight-kg")]
    pub weight_kg: f64,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    #[arg(long)]
    pub pincode: String,

    #[arg(long = "medical-history")]
    pub medical_history: Option<String>,

    #[arg(long = "emergency-contact")]
    pub emergency_contact: Option<String>,

    #[arg(long = "preferred-contact-time")]
    pub preferred_contact_time: Option<String>,
}

#[derive(Args)]
pub struct RegisterRequestorArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Organization name; individuals register as "Individual".
    #[arg(long, default_value = "Individual")]
    pub organization: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    #[arg(long)]
    pub pincode: String,
}

#[derive(Args)]
pub struct CreateRequestArgs {
    /// Requestor id; anonymous requests may omit it.
    #[arg(long = "requestor-id")]
    pub requestor_id: Option<String>,

    #[arg(long = "patient-name")]
    pub patient_name: String,

    #[arg(long = "patient-age")]
    pub patient_age: u32,

    #[arg(long = "patient-gender")]
    pub patient_gender: String,

    /// Blood group needed ("A+", "O-", ...).
    #[arg(long = "blood-group")]
    pub blood_group: BloodGroup,

    /// Units of blood needed.
    #[arg(long)]
    pub units: u32,

    #[arg(long = "hospital-name")]
    pub hospital_name: String,

    #[arg(long = "hospital-address")]
    pub hospital_address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    #[arg(long = "contact-name")]
    pub contact_name: String,

    #[arg(long = "contact-phone")]
    pub contact_phone: String,

    #[arg(long = "contact-email")]
    pub contact_email: Option<String>,

    /// Urgency: critical, high, or normal.
    #[arg(long, default_value = "normal")]
    pub urgency: Urgency,

    /// Date the blood is needed by (YYYY-MM-DD).
    #[arg(long = "required-date")]
    pub required_date: NaiveDate,

    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Args)]
pub struct AcceptArgs {
    #[arg(long = "donor-id")]
    pub donor_id: String,

    #[arg(long = "request-id")]
    pub request_id: String,

    /// Units the donor offers to give.
    #[arg(long)]
    pub units: u32,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct ConfirmDonationArgs {
    /// Assignment id (ASGN-...).
    #[arg(value_name = "ASSIGNMENT_ID")]
    pub assignment_id: String,

    /// Units actually donated (defaults to the units offered).
    #[arg(long)]
    pub units: Option<u32>,

    #[arg(long = "donation-center")]
    pub donation_center: Option<String>,
}

#[derive(Args)]
pub struct DonateInventoryArgs {
    #[arg(long = "donor-id")]
    pub donor_id: String,

    /// Units to donate (1-50).
    #[arg(long)]
    pub units: u32,

    #[arg(long = "donation-center")]
    pub donation_center: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct WithdrawArgs {
    #[arg(long = "requestor-id")]
    pub requestor_id: String,

    /// Blood group to withdraw ("A+", "O-", ...).
    #[arg(long = "blood-group")]
    pub blood_group: BloodGroup,

    #[arg(long)]
    pub units: u32,

    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Args)]
pub struct UseInventoryArgs {
    #[arg(long = "request-id")]
    pub request_id: String,

    #[arg(long)]
    pub units: u32,
}

#[derive(Args)]
pub struct ConfirmDonorArgs {
    /// Assignment id (ASGN-...).
    #[arg(value_name = "ASSIGNMENT_ID")]
    pub assignment_id: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
