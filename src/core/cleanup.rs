//! Find marked networks, confirm, and destroy them.

use crate::core::pool::PoolApi;
use crate::models::network::{NetworkRecords, NetworkRef};
use crate::util::prompt::Confirmer;
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use std::io::Write;
use tracing::info;

/// What a cleanup run should look for and whether it may act.
#[derive(Debug, Clone)]
pub struct CleanupPlan {
    pub marker_key: String,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    NothingToDo,
    DryRun { matched: usize },
    Declined,
    Destroyed { count: usize },
}

/// Handles of networks whose `other_config` carries `marker_key`, in map order.
pub fn select_marked(records: &NetworkRecords, marker_key: &str) -> Vec<NetworkRef> {
    records
        .iter()
        .filter(|(_, record)| record.has_marker(marker_key))
        .map(|(handle, _)| handle.clone())
        .collect()
}

pub fn destroy_prompt(names: &[&str]) -> String {
    let mut prompt = String::from("This will DESTROY the following networks:\n");
    for name in names {
        prompt.push('\t');
        prompt.push_str(name);
        prompt.push('\n');
    }
    prompt.push_str("Do you wish to continue?");
    prompt
}

pub fn run_cleanup<P, C, W>(
    pool: &P,
    confirmer: &C,
    plan: &CleanupPlan,
    out: &mut W,
) -> Result<CleanupOutcome>
where
    P: PoolApi + ?Sized,
    C: Confirmer + ?Sized,
    W: Write,
{
    let records = pool.network_records().context("list networks")?;
    let marked = select_marked(&records, &plan.marker_key);
    info!(total = records.len(), marked = marked.len(), marker = %plan.marker_key, "selected networks");

    if marked.is_empty() {
        writeln!(out, "No networks in this pool need cleaning up.")?;
        writeln!(out, "Exiting: nothing to do.")?;
        return Ok(CleanupOutcome::NothingToDo);
    }

    if plan.dry_run {
        writeln!(out, "{}", network_table(&records, &marked))?;
        writeln!(out, "Dry run: {} networks would be destroyed.", marked.len())?;
        return Ok(CleanupOutcome::DryRun {
            matched: marked.len(),
        });
    }

    let names: Vec<&str> = marked
        .iter()
        .filter_map(|handle| records.get(handle))
        .map(|record| record.name_label.as_str())
        .collect();
    out.flush()?;
    if !confirmer.confirm(&destroy_prompt(&names))? {
        writeln!(out, "Aborted: no networks were destroyed.")?;
        return Ok(CleanupOutcome::Declined);
    }

    // The first failure stops the run; networks after it are left in place.
    for handle in &marked {
        writeln!(out, "Destroying network '{}'...", handle)?;
        out.flush()?;
        pool.destroy_network(handle)
            .with_context(|| format!("destroy network '{}'", handle))?;
        info!(network = %handle, "destroyed network");
    }
    writeln!(out, "Finished: Destroyed {} networks.", marked.len())?;
    Ok(CleanupOutcome::Destroyed {
        count: marked.len(),
    })
}

fn network_table(records: &NetworkRecords, marked: &[NetworkRef]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Handle").add_attribute(Attribute::Bold),
        Cell::new("UUID").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Bridge").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
    ]);
    for handle in marked {
        if let Some(record) = records.get(handle) {
            table.add_row(vec![
                handle.to_string(),
                record.uuid.clone(),
                record.name_label.clone(),
                record.bridge.clone(),
                record.name_description.clone(),
            ]);
        }
    }
    table
}
