//! Host side of the verifier: argument parsing and the blocking round-trip.
//!
//! `checkref-core` decides what to send and what the answer means. This
//! crate only moves bytes with ureq and writes the rendered line.

use std::io::Write;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use checkref_core::{
    AuthClient, HttpMethod, HttpRequest, HttpResponse, OutputFormat, Verdict, DEFAULT_BASE_URL,
    PLACEHOLDER_TOKEN,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Check a bearer token against /auth/me")]
pub struct Opts {
    /// API base URL; `/auth/me` is appended
    #[arg(long, env = "CHECKREF_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer token sent in the Authorization header
    #[arg(
        long,
        env = "CHECKREF_TOKEN",
        default_value = PLACEHOLDER_TOKEN,
        hide_env_values = true
    )]
    pub token: String,

    /// How an accepted profile is printed
    #[arg(long, value_enum, default_value_t = Format::Repr)]
    pub format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Repr,
    Json,
    Pretty,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Repr => OutputFormat::Repr,
            Format::Json => OutputFormat::Json,
            Format::Pretty => OutputFormat::Pretty,
        }
    }
}

/// Execute `req` once with a blocking ureq agent.
///
/// Non-2xx statuses come back as data. There is no timeout and no retry.
pub fn execute(req: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut builder = match req.method {
        HttpMethod::Get => agent.get(&req.url),
    };
    for (name, value) in &req.headers {
        builder = builder.header(name, value);
    }
    let mut response = builder.call()?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| {
            (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned())
        })
        .collect();
    let body = response.body_mut().read_to_string()?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Send the verification request once and write one line to `out`.
///
/// A rejected token is reported through `out` and still returns `Ok`.
/// Transport failures and a malformed 200 body return `Err`.
pub fn run<W: Write>(opts: &Opts, out: &mut W) -> anyhow::Result<Verdict> {
    let client = AuthClient::new(&opts.base_url, &opts.token)?;
    if client.uses_placeholder_token() {
        log::warn!("sending placeholder token {PLACEHOLDER_TOKEN}, set --token or CHECKREF_TOKEN");
    }

    let request = client.build_verify();
    log::info!("{} {}", request.method.as_str(), request.url);
    let response =
        execute(&request).with_context(|| format!("request to {} failed", request.url))?;
    log::debug!(
        "status {}, {} bytes, content-type {}",
        response.status,
        response.body.len(),
        response.header("content-type").unwrap_or("-")
    );

    let verdict = client
        .parse_verify(response)
        .context("response body is not valid JSON")?;
    let line = verdict.render(opts.format.into())?;
    writeln!(out, "{line}")?;
    Ok(verdict)
}
