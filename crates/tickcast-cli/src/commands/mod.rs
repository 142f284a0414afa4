mod analyze;
mod resolve;

use std::sync::Arc;

use serde::Serialize;

use tickcast_core::{AnalysisReport, ForecastPipeline, ReqwestHttpClient, Symbol};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Typed output of a command, rendered by the output layer.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Analysis(AnalysisReport),
    Resolution(ResolutionData),
}

#[derive(Debug, Serialize)]
pub struct ResolutionData {
    pub query: String,
    pub symbol: Symbol,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Analysis(report) => &report.warnings,
            Self::Resolution(data) => &data.warnings,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    let pipeline = ForecastPipeline::new(Arc::new(ReqwestHttpClient::new()));

    match &cli.command {
        Command::Analyze(args) => analyze::run(args, &pipeline).await,
        Command::Resolve(args) => resolve::run(args, &pipeline).await,
    }
}

/// Join a trailing-word query back into one string.
pub(crate) fn join_query(words: &[String]) -> String {
    words.join(" ")
}
