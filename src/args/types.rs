use crate::model::QueryKind;
use crate::source::api::{ApiCredentials, DEFAULT_API_BASE_URL, DEFAULT_API_HOST};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryArg {
    Live,
    Upcoming,
    Date,
}

impl From<QueryArg> for QueryKind {
    fn from(arg: QueryArg) -> Self {
        match arg {
            QueryArg::Live => QueryKind::Live,
            QueryArg::Upcoming => QueryKind::Upcoming,
            QueryArg::Date => QueryKind::ByDate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Live tennis matches from the first source that has them", long_about = None)]
pub struct Args {
    /// Which result set to fetch
    #[arg(short = 'q', long, value_enum, default_value_t = QueryArg::Live)]
    pub query: QueryArg,
    /// Day to fetch for `--query date`
    #[arg(
        short = 'd',
        long,
        value_name = "DD/MM/YYYY",
        value_parser = crate::args::validation::parse_match_date
    )]
    pub date: Option<NaiveDate>,

    #[arg(long, env = "TENNIS_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,
    #[arg(long, env = "TENNIS_API_HOST", default_value = DEFAULT_API_HOST)]
    pub api_host: String,
    /// Key for the structured events API. Never has a default.
    #[arg(long, env = "TENNIS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upper bound on a single source attempt
    #[arg(
        long,
        value_name = "SECONDS",
        default_value = "15",
        value_parser = crate::args::validation::check_positive_secs
    )]
    pub adapter_timeout_secs: u64,
    /// Upper bound on the whole query, fallbacks included
    #[arg(long, value_name = "SECONDS", value_parser = crate::args::validation::check_positive_secs)]
    pub deadline_secs: Option<u64>,
    /// How many neighbouring days to sweep when every source is empty
    #[arg(
        long,
        default_value = "7",
        value_parser = crate::args::validation::check_sweep_days
    )]
    pub sweep_days: u32,
    /// Only use the structured API (and the mock fallback)
    #[arg(long)]
    pub no_scrape: bool,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub query: QueryKind,
    pub date: Option<NaiveDate>,
    pub api_base_url: String,
    pub credentials: Option<ApiCredentials>,
    pub adapter_timeout: Duration,
    pub deadline: Option<Duration>,
    pub sweep_days: u32,
    pub scrape: bool,
}
