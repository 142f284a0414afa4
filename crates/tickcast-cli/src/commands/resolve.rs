use tickcast_core::ForecastPipeline;

use crate::cli::ResolveArgs;
use crate::error::CliError;

use super::{join_query, Report, ResolutionData};

pub async fn run(args: &ResolveArgs, pipeline: &ForecastPipeline) -> Result<Report, CliError> {
    let query = join_query(&args.query);
    let resolution = pipeline.resolve(&query).await;

    Ok(Report::Resolution(ResolutionData {
        query,
        symbol: resolution.symbol,
        warnings: resolution.warnings,
    }))
}
