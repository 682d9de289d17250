//! Product view: show the selected product, generate a description
//! suggestion, save an (edited) description.
//!
//! Generate and save are separate invocations so the suggestion can be
//! reviewed and edited before it is committed.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::context::HostContext;
use crate::orchestrator::Orchestrator;
use crate::records::Record;

/// Prints the selected product's details.
pub async fn show(
    orchestrator: &Orchestrator,
    ctx: &HostContext,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(record) = selected(orchestrator, ctx, out).await? {
        write_details(&record, out)?;
    }
    Ok(())
}

/// Generates a description suggestion from comma-separated `tags`.
pub async fn generate(
    orchestrator: &Orchestrator,
    ctx: &HostContext,
    tags: &str,
    out: &mut impl Write,
) -> Result<()> {
    let Some(record) = selected(orchestrator, ctx, out).await? else {
        return Ok(());
    };

    if let Ok(description) = orchestrator.generate_for_record(ctx, &record, tags).await {
        writeln!(out, "Description suggestion:")?;
        writeln!(out, "{description}")?;
    }
    Ok(())
}

/// Saves `description` onto the selected product.
pub async fn save(
    orchestrator: &Orchestrator,
    ctx: &HostContext,
    description: &str,
    out: &mut impl Write,
) -> Result<()> {
    let record = match orchestrator.load_record(ctx).await {
        Ok(record) => record,
        Err(_) => return Ok(()),
    };

    if let Ok(updated) = orchestrator
        .save_description(record.as_ref(), description)
        .await
    {
        write_details(&updated, out)?;
    }
    Ok(())
}

async fn selected(
    orchestrator: &Orchestrator,
    ctx: &HostContext,
    out: &mut impl Write,
) -> Result<Option<Record>> {
    match orchestrator.load_record(ctx).await {
        Ok(Some(record)) => Ok(Some(record)),
        Ok(None) => {
            writeln!(out, "No product selected.")?;
            Ok(None)
        }
        Err(_) => Ok(None),
    }
}

fn write_details(record: &Record, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Name: {}", record.name)?;
    writeln!(out, "ID: {}", record.id)?;
    writeln!(out, "Created: {}", format_created(record.created))?;
    writeln!(
        out,
        "Description: {}",
        record.description.as_deref().unwrap_or("")
    )?;
    Ok(())
}

fn format_created(created: i64) -> String {
    DateTime::<Utc>::from_timestamp(created, 0).map_or_else(
        || created.to_string(),
        |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_details() {
        let record = Record {
            id: "prod_1".to_string(),
            name: "Widget".to_string(),
            description: Some("A great widget.".to_string()),
            created: 0,
        };
        let mut out = Vec::new();
        write_details(&record, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Name: Widget\nID: prod_1\nCreated: 1970-01-01 00:00:00 UTC\nDescription: A great widget.\n"
        );
    }
}
