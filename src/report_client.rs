//! Builds a final report against a running API over HTTP and prints it
//! as JSON, the same way the browser client assembles it.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::services::final_report::build_final_report;
use crate::services::grade_sources::HttpGradeSource;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, PartialEq)]
pub(crate) struct ClientArgs {
    pub(crate) api_url: String,
    pub(crate) token: Option<String>,
    pub(crate) student_id: i64,
    pub(crate) timeout: Duration,
}

pub(crate) async fn run() -> Result<()> {
    let args = parse_args(
        env::args().skip(1),
        env::var("SIGRA_API_URL").ok(),
        env::var("SIGRA_TOKEN").ok(),
    )?;

    let source = HttpGradeSource::new(&args.api_url, args.token, args.timeout)
        .context("Failed to build HTTP client")?;

    tracing::info!(student_id = args.student_id, api_url = %args.api_url, "building final report");
    let report = build_final_report(&source, args.student_id)
        .await
        .with_context(|| format!("Failed to build report for student {}", args.student_id))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn parse_args(
    args: impl IntoIterator<Item = String>,
    env_api_url: Option<String>,
    env_token: Option<String>,
) -> Result<ClientArgs> {
    let mut api_url = env_api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let mut token = env_token;
    let mut student: Option<String> = None;
    let mut timeout_secs = DEFAULT_TIMEOUT_SECS;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                api_url = args.next().ok_or_else(|| anyhow!("--api-url missing value"))?;
            }
            "--token" => {
                token = Some(args.next().ok_or_else(|| anyhow!("--token missing value"))?);
            }
            "--student" => {
                student = Some(args.next().ok_or_else(|| anyhow!("--student missing value"))?);
            }
            "--timeout-secs" => {
                let raw = args.next().ok_or_else(|| anyhow!("--timeout-secs missing value"))?;
                timeout_secs =
                    raw.parse().with_context(|| format!("Invalid --timeout-secs: {raw}"))?;
            }
            _ if !arg.starts_with("--") && student.is_none() => student = Some(arg),
            _ => return Err(anyhow!("Unknown argument: {arg}")),
        }
    }

    let raw = student.ok_or_else(|| anyhow!("Usage: final-report [--api-url URL] <student-id>"))?;
    let student_id = raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| anyhow!("Invalid student id: {raw}"))?;

    Ok(ClientArgs { api_url, token, student_id, timeout: Duration::from_secs(timeout_secs) })
}
