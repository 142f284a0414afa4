use tickcast_core::AnalysisReport;

use crate::cli::OutputFormat;
use crate::commands::{Report, ResolutionData};
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => match report {
            Report::Analysis(analysis) => render_analysis_table(analysis),
            Report::Resolution(resolution) => render_resolution_table(resolution),
        },
    }

    Ok(())
}

fn render_analysis_table(report: &AnalysisReport) {
    let forecast = &report.forecast;

    println!("symbol         : {}", forecast.symbol);
    println!("as_of          : {}", forecast.as_of_date);
    println!(
        "last_close     : {:.2} ({:+.2}, {:+.2}%)",
        forecast.last_close, forecast.day_change, forecast.day_change_pct
    );
    match forecast.sma20 {
        Some(sma) => println!("sma20          : {sma:.2}"),
        None => println!("sma20          : n/a"),
    }
    match forecast.rsi14 {
        Some(rsi) => println!("rsi14          : {rsi:.2}"),
        None => println!("rsi14          : n/a"),
    }
    println!("momentum       : {}", forecast.momentum.description());
    println!(
        "news_mood      : {:.4} ({})",
        forecast.mood.value(),
        forecast.mood.label().as_str()
    );
    println!("target_date    : {}", forecast.target_date);
    println!("predicted_close: {:.2}", forecast.predicted_close);
    println!(
        "expected_range : {:.2} .. {:.2}",
        forecast.predicted_low, forecast.predicted_high
    );

    if !report.headlines.is_empty() {
        println!("headlines:");
        for headline in &report.headlines {
            println!("  [{:+.3}] {}", headline.sentiment, headline.text);
        }
    }

    render_warnings(&report.warnings);
}

fn render_resolution_table(resolution: &ResolutionData) {
    println!("query : {}", resolution.query);
    println!("symbol: {}", resolution.symbol);
    render_warnings(&resolution.warnings);
}

fn render_warnings(warnings: &[String]) {
    if !warnings.is_empty() {
        println!("warnings:");
        for warning in warnings {
            println!("  - {warning}");
        }
    }
}
