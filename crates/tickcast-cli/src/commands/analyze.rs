use tickcast_core::ForecastPipeline;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

use super::{join_query, Report};

pub async fn run(args: &AnalyzeArgs, pipeline: &ForecastPipeline) -> Result<Report, CliError> {
    let query = join_query(&args.query);
    let report = pipeline.analyze(&query).await?;
    Ok(Report::Analysis(report))
}
