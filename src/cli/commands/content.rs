use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use comfy_table::Table;

use crate::domain::models::{ContentKind, ContentRecord};
use crate::services::ContentService;

#[derive(Args)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub command: ContentCommands,
}

#[derive(Subcommand)]
pub enum ContentCommands {
    /// List stored records
    List {
        /// Restrict to one kind (project, article, page, testimonial, faq)
        #[arg(long)]
        kind: Option<String>,
    },
    /// Show one record, read directly from the store
    Show { slug: String },
    /// Insert or replace a record
    Put {
        slug: String,
        /// Content kind (project, article, page, testimonial, faq)
        #[arg(long)]
        kind: String,
        #[arg(long)]
        title: String,
        /// Document payload as inline JSON
        #[arg(long, default_value = "{}")]
        body: String,
        /// Store as an unpublished draft
        #[arg(long)]
        draft: bool,
    },
    /// Delete a record
    Delete { slug: String },
}

pub async fn execute(service: &ContentService, args: ContentArgs, json: bool) -> Result<()> {
    match args.command {
        ContentCommands::List { kind } => handle_list(service, kind, json).await,
        ContentCommands::Show { slug } => handle_show(service, &slug, json).await,
        ContentCommands::Put {
            slug,
            kind,
            title,
            body,
            draft,
        } => handle_put(service, slug, &kind, title, &body, draft, json).await,
        ContentCommands::Delete { slug } => handle_delete(service, &slug, json).await,
    }
}

async fn handle_list(service: &ContentService, kind: Option<String>, json: bool) -> Result<()> {
    let kind = kind
        .map(|k| k.parse::<ContentKind>())
        .transpose()
        .context("Unknown content kind")?;

    let records = service.list(kind).await.context("Failed to list content")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No content found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Slug", "Kind", "Title", "Published", "Updated"]);
    for record in &records {
        table.add_row(vec![
            record.slug.clone(),
            record.kind.to_string(),
            record.title.clone(),
            if record.published { "yes" } else { "no" }.to_string(),
            record.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
    println!(
        "\nShowing {} record{}",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

async fn handle_show(service: &ContentService, slug: &str, json: bool) -> Result<()> {
    let record = service
        .get(slug)
        .await
        .context("Failed to read content")?
        .ok_or_else(|| anyhow::anyhow!("Content not found: {slug}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{} [{}]", record.title, record.kind);
        println!("{}", serde_json::to_string_pretty(&record.body)?);
    }
    Ok(())
}

async fn handle_put(
    service: &ContentService,
    slug: String,
    kind: &str,
    title: String,
    body: &str,
    draft: bool,
    json: bool,
) -> Result<()> {
    let kind = kind.parse::<ContentKind>().context("Unknown content kind")?;
    let body = serde_json::from_str(body).context("Body is not valid JSON")?;

    let mut record = ContentRecord::new(slug, kind, title, body);
    if draft {
        record = record.draft();
    }

    service
        .publish(&record)
        .await
        .context("Failed to store content")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Stored {} ({})", record.slug, record.kind);
    }
    Ok(())
}

async fn handle_delete(service: &ContentService, slug: &str, json: bool) -> Result<()> {
    service
        .remove(slug)
        .await
        .context("Failed to delete content")?;

    if json {
        println!("{}", serde_json::json!({ "deleted": slug }));
    } else {
        println!("Deleted {slug}");
    }
    Ok(())
}
