use std::error::Error;
use std::io::{self, Write};

use crate::api::client::HttpAnswerService;

/// Probes `/health` and writes a one-line verdict followed by the body.
/// Returns whether the service reported healthy.
pub async fn report_health<W: Write>(service: &HttpAnswerService, out: &mut W) -> io::Result<bool> {
    match service.check_health().await {
        Ok(report) => {
            let healthy = report.is_healthy();
            if healthy {
                writeln!(out, "✅ {} is healthy ({})", service.base_url(), report.status)?;
            } else {
                writeln!(
                    out,
                    "❌ {} is unhealthy ({})",
                    service.base_url(),
                    report.status
                )?;
            }
            let body = report.display_body();
            if !body.is_empty() {
                writeln!(out, "{body}")?;
            }
            Ok(healthy)
        }
        Err(err) => {
            writeln!(out, "❌ {} is unreachable: {err}", service.base_url())?;
            Ok(false)
        }
    }
}

pub async fn run_health(service: &HttpAnswerService) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let healthy = report_health(service, &mut stdout.lock()).await?;
    if !healthy {
        std::process::exit(1);
    }
    Ok(())
}
