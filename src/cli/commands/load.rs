use anyhow::Result;
use clap::Args;

use crate::services::ContentService;

#[derive(Args)]
pub struct LoadArgs {
    /// Identifier of the record to load (e.g. "layan-verde")
    pub slug: String,

    /// Also print the fetch attempt trace to stderr
    #[arg(long)]
    pub trace: bool,
}

/// Handle the load command.
///
/// A missing record is an error here: the process exit code is how callers of
/// the binary observe the not-found outcome.
pub async fn execute(service: &ContentService, args: LoadArgs, json: bool) -> Result<()> {
    let (record, attempts) = service.load_with_attempts(&args.slug).await;

    if args.trace {
        for attempt in &attempts {
            eprintln!(
                "{}: {} (started {})",
                attempt.strategy.as_str(),
                attempt.outcome.as_str(),
                attempt.started_at.format("%H:%M:%S%.3f")
            );
        }
    }

    let Some(record) = record else {
        anyhow::bail!("Content not found: {}", args.slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{} [{}]", record.title, record.kind);
        println!("slug:      {}", record.slug);
        println!("published: {}", if record.published { "yes" } else { "no" });
        println!("updated:   {}", record.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("\n{}", serde_json::to_string_pretty(&record.body)?);
    }

    Ok(())
}
