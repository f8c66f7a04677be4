//! Command-line arguments for `leaddesk`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use lead_filter::FilterQuery;

#[derive(Parser)]
#[command(
    name = "leaddesk",
    version,
    about = "Upload, filter and export sales leads",
    long_about = "Upload sales leads from CSV or Excel files, filter them by status, \
                  company, country, employee count and revenue range, and export the \
                  result as CSV or XLSX."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row values (emails, names) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Lead store file.
    #[arg(long, value_name = "PATH", default_value = "leads.json", global = true)]
    pub store: PathBuf,

    /// Settings file (upload limit, default sources, aliases, range catalogs).
    #[arg(long, value_name = "PATH", default_value = "leaddesk.toml", global = true)]
    pub config: PathBuf,

    /// Name recorded as the creator of uploaded leads.
    #[arg(long, env = "LEADDESK_USER", default_value = "admin", global = true)]
    pub user: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import leads from a .csv, .xls or .xlsx file.
    Upload(UploadArgs),

    /// List leads, newest first, optionally filtered.
    List(ListArgs),

    /// Print one lead as JSON.
    Show(ShowArgs),

    /// Export leads as CSV or XLSX.
    Export(ExportArgs),

    /// Write the error report of your last upload.
    Errors(ErrorsArgs),

    /// Write a sample upload template.
    Sample(SampleArgs),

    /// List the selectable filter values.
    Choices,
}

#[derive(Args)]
pub struct UploadArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Update existing leads with the same email instead of reporting duplicates.
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// Status (repeatable): New, Contacted, Qualified, Lost.
    #[arg(long)]
    pub status: Vec<String>,

    #[arg(long)]
    pub industry: Vec<String>,

    #[arg(long = "person-country")]
    pub person_country: Vec<String>,

    #[arg(long = "company-country")]
    pub company_country: Vec<String>,

    #[arg(long = "email-status")]
    pub email_status: Vec<String>,

    /// Company names, comma-separated, matched as substrings.
    #[arg(long)]
    pub company: Option<String>,

    /// Job titles, comma-separated, matched as substrings.
    #[arg(long = "job-title")]
    pub job_title: Option<String>,

    /// Employee ranges such as "51-200, 10001+" (repeatable).
    #[arg(long)]
    pub employees: Vec<String>,

    /// Revenue ranges such as "$1M-10M" (repeatable).
    #[arg(long)]
    pub revenue: Vec<String>,

    /// Free text matched against names, email and company.
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_query(&self) -> FilterQuery {
        FilterQuery {
            status: self.status.clone(),
            industry: self.industry.clone(),
            person_country: self.person_country.clone(),
            company_country: self.company_country.clone(),
            email_status: self.email_status.clone(),
            company: self.company.clone(),
            job_title: self.job_title.clone(),
            employees: self.employees.clone(),
            revenue: self.revenue.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show at most this many leads.
    #[arg(long, default_value_t = 25)]
    pub limit: usize,

    /// Skip this many leads first.
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(value_name = "ID")]
    pub id: u64,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Export only these lead ids (repeatable, or comma-separated).
    #[arg(long = "id", value_delimiter = ',')]
    pub ids: Vec<u64>,

    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormatArg,

    /// Output file (default: leads.csv or leads.xlsx).
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ErrorsArgs {
    #[arg(long, value_enum, default_value = "xlsx")]
    pub format: ExportFormatArg,

    /// Output file (default: upload_errors.csv or upload_errors.xlsx).
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SampleArgs {
    #[arg(long, short, value_name = "PATH", default_value = "leads_sample.csv")]
    pub output: PathBuf,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Xlsx,
}

impl ExportFormatArg {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
