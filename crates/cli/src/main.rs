//! Command-line front end for the tickbars pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tickbars_aggregation::{aggregate_dollar_bars, aggregate_time_bars};
use tickbars_analysis::analyze_bars;
use tickbars_core::Interval;
use tickbars_ingestion::BinanceClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Tick-to-bar construction and analysis")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fetch aggregate trades from the exchange and write them to CSV.
    FetchTrades {
        #[arg(default_value = "BTCUSDT")]
        symbol: String,
        #[arg(default_value_t = 2)]
        days: i64,
        #[arg(default_value = "trades.csv")]
        output: String,
    },
    /// Build fixed-interval OHLCV bars from a trades CSV.
    Timebars {
        #[arg(default_value = "trades.csv")]
        input: String,
        #[arg(default_value = "ohlcv.csv")]
        output: String,
        /// Bar interval, e.g. "1min", "5min", "1H".
        #[arg(long, default_value = "5min")]
        interval: String,
    },
    /// Build dollar bars from a trades CSV.
    Quotebars {
        #[arg(default_value = "trades.csv")]
        input: String,
        #[arg(default_value = "dollar_bars.csv")]
        output: String,
        /// Notional value per bar, e.g. 100000 for $100k bars.
        #[arg(long)]
        dollar_size: f64,
    },
    /// Produce a descriptive report for a dollar-bar CSV.
    AnalyzeBars {
        input: String,
        #[arg(long, default_value = "bar_analysis.txt")]
        output: String,
        /// Notional target the bars were generated with.
        #[arg(long)]
        target_size: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().cmd {
        Cmd::FetchTrades {
            symbol,
            days,
            output,
        } => {
            info!(%symbol, days, "fetching aggregate trades");
            let client = BinanceClient::new(&symbol);
            let trades = client.fetch_agg_trades(days).await?;
            tickbars_io::write_trades_csv(&output, &trades)?;
            println!("Wrote {} trades to {}", trades.len(), output);
        }
        Cmd::Timebars {
            input,
            output,
            interval,
        } => {
            let interval: Interval = interval.parse()?;
            let trades = tickbars_io::read_trades_csv(&input)?;
            let bars = aggregate_time_bars(trades, interval)?;
            tickbars_io::write_time_bars_csv(&output, &bars)?;
            println!("Wrote {} time bars to {}", bars.len(), output);
        }
        Cmd::Quotebars {
            input,
            output,
            dollar_size,
        } => {
            let trades = tickbars_io::read_trades_csv(&input)?;
            let bars = aggregate_dollar_bars(trades, dollar_size)?;
            tickbars_io::write_dollar_bars_csv(&output, &bars)?;
            println!("Wrote {} dollar bars to {}", bars.len(), output);
        }
        Cmd::AnalyzeBars {
            input,
            output,
            target_size,
        } => {
            let bars = tickbars_io::read_dollar_bars_csv(&input)?;
            let analysis = analyze_bars(&bars, target_size)?;
            std::fs::write(&output, analysis.render())
                .with_context(|| format!("writing report to {output}"))?;
            println!("Wrote analysis of {} bars to {}", bars.len(), output);
        }
    }

    Ok(())
}
