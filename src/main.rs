use anyhow::{bail, Context, Result};
use capturevate::{
    capturevate, Config, Host, HttpTransport, Invocation, MemoryTransport, Outcome, PageEvent,
    StaticEnvironment, Transport,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: capturevate <config.json> <events.jsonl> [--dry-run] | capturevate version";
const DEFAULT_USER_AGENT: &str = "capturevate-replay/0.1";

/// One line of a replay script: either a page event or a pause.
enum ScriptLine {
    Event(PageEvent),
    Wait(Duration),
}

fn parse_line(line: &str) -> Result<ScriptLine> {
    let value: Value = serde_json::from_str(line)?;
    if value.get("type").and_then(Value::as_str) == Some("wait") {
        let ms = value
            .get("ms")
            .and_then(Value::as_u64)
            .context("wait line needs an integer `ms`")?;
        return Ok(ScriptLine::Wait(Duration::from_millis(ms)));
    }
    Ok(ScriptLine::Event(serde_json::from_value(value)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("version") {
        if let Outcome::Version(version) =
            capturevate(Invocation::from_json(Value::String("version".into()))?, Host::default())
        {
            println!("{}", version);
        }
        return Ok(());
    }

    let dry_run = args.iter().any(|a| a == "--dry-run");
    let paths: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if paths.len() != 2 {
        bail!(USAGE);
    }

    let config = Config::from_file(paths[0])?;
    let env = StaticEnvironment::new(
        &std::env::var("CAPTUREVATE_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        &std::env::var("CAPTUREVATE_PATH").unwrap_or_else(|_| "/".to_string()),
    );

    let memory = Arc::new(MemoryTransport::new());
    let transport: Arc<dyn Transport> = if dry_run {
        memory.clone()
    } else {
        Arc::new(HttpTransport::new())
    };

    let session = match capturevate(Invocation::Init(config), Host::new(Arc::new(env), transport)) {
        Outcome::Started(session) => session,
        _ => bail!("Capturevate did not start"),
    };

    let (tx, rx) = mpsc::channel(100);
    let driver = tokio::spawn(session.run(rx));

    let script = tokio::fs::File::open(paths[1])
        .await
        .with_context(|| format!("cannot open {}", paths[1]))?;
    let mut lines = BufReader::new(script).lines();
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line).with_context(|| format!("{}:{}", paths[1], line_no))? {
            ScriptLine::Wait(pause) => tokio::time::sleep(pause).await,
            ScriptLine::Event(event) => {
                if tx.send(event).await.is_err() {
                    tracing::info!("Session closed at line {}, ignoring the rest", line_no);
                    break;
                }
            }
        }
    }

    // Closing the channel is page teardown if the script never unloaded.
    drop(tx);
    let record = driver.await?;

    println!("{}", serde_json::to_string_pretty(&record)?);

    if dry_run {
        for (request, mode) in memory.sent() {
            println!("[{:?}] POST {} {:?}", mode, request.url, request.fields);
        }
    }

    Ok(())
}
