use anyhow::{Context, Result};
use query::{RouteError, RoutePlanner, RouteRequest, RouteResponse};
use routeplan_core::config::AppConfig;
use std::io::{self, BufRead, Write};
use storage::render::{render_to_file, DotRenderer};
use tracing::{info, warn};

const NO_PATH_MESSAGE: &str = "No path found between cities.";

#[tokio::main]
async fn main() -> Result<()> {
    routeplan_core::init_tracing();

    let config = AppConfig::load().context("failed to load configuration")?;
    let planner = RoutePlanner::from_config(&config).context("failed to build route planner")?;

    if let Some(path) = &config.render.output {
        render_to_file(&DotRenderer::default(), planner.graph(), path)
            .with_context(|| format!("failed to render graph to {}", path.display()))?;
        info!(path = %path.display(), "route graph rendered");
    }

    println!("\nIntelligent City Route Planner");

    let mut args = std::env::args().skip(1);
    let (source, destination) = match (args.next(), args.next()) {
        (Some(source), Some(destination)) => (source, destination),
        _ => (
            prompt("Enter source city: ")?,
            prompt("Enter destination city: ")?,
        ),
    };

    println!("\nFetching live scenario...");
    let outcome = planner.plan(RouteRequest::new(source, destination)).await;
    println!("{}", report(outcome)?);

    Ok(())
}

/// Invalid city input is reported like a missing route; only setup and IO
/// failures end the process with an error.
fn report(outcome: Result<RouteResponse, RouteError>) -> Result<String, RouteError> {
    match outcome {
        Ok(response) => Ok(format!(
            "Live scenario received: {}\n{}",
            response.scenario,
            format_route(&response)
        )),
        Err(RouteError::InvalidRequest(reason)) => {
            warn!(%reason, "route request rejected");
            Ok(NO_PATH_MESSAGE.to_string())
        }
        Err(err) => Err(err),
    }
}

fn prompt(label: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn format_route(response: &RouteResponse) -> String {
    match response.cost {
        Some(cost) => format!(
            "\nOptimal Path:\n{}\nTotal Cost: {}",
            response.path.join(" → "),
            cost
        ),
        None => NO_PATH_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slm::{ProviderError, ScenarioSource};

    fn response(cost: Option<u64>, path: &[&str]) -> RouteResponse {
        RouteResponse {
            source: "Tehran".to_string(),
            destination: "Shiraz".to_string(),
            scenario: "clear".to_string(),
            scenario_source: ScenarioSource::Provider,
            penalty: 0,
            cost,
            path: path.iter().map(|s| s.to_string()).collect(),
            search_latency_us: 1,
        }
    }

    #[test]
    fn test_format_found_route() {
        let out = format_route(&response(Some(60), &["Tehran", "Qom", "Esfahan", "Shiraz"]));
        assert_eq!(
            out,
            "\nOptimal Path:\nTehran → Qom → Esfahan → Shiraz\nTotal Cost: 60"
        );
    }

    #[test]
    fn test_format_missing_route() {
        assert_eq!(format_route(&response(None, &[])), "No path found between cities.");
    }

    #[test]
    fn test_report_found_route_includes_scenario() {
        let out = report(Ok(response(Some(10), &["Tehran", "Qom"]))).unwrap();
        assert_eq!(
            out,
            "Live scenario received: clear\n\nOptimal Path:\nTehran → Qom\nTotal Cost: 10"
        );
    }

    #[test]
    fn test_report_blank_city_as_missing_route() {
        let out = report(Err(RouteError::InvalidRequest(
            "source must not be empty".to_string(),
        )))
        .unwrap();
        assert_eq!(out, "No path found between cities.");
    }

    #[test]
    fn test_report_passes_through_setup_errors() {
        let err = report(Err(RouteError::Provider(ProviderError::Unavailable(
            "offline".to_string(),
        ))))
        .unwrap_err();
        assert!(matches!(err, RouteError::Provider(_)));
    }
}
