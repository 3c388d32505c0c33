use chrono::Utc;
use clap::Args;
use serde_json::Value;

use hedge_sim_core::hedge::record::HedgeSimulationRecord;

use crate::input::params::ParamSource;

/// Arguments for building a persistable simulation row
#[derive(Args)]
pub struct RecordArgs {
    /// Simulation name
    #[arg(long)]
    pub name: String,

    /// Owner identity
    #[arg(long)]
    pub owner: String,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Existing row id, when re-saving
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub source: ParamSource,
}

pub fn run_record(args: RecordArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.source.load()?;
    let mut record = HedgeSimulationRecord::new(&args.name, &args.owner, params, Utc::now())?;
    if let Some(notes) = args.notes {
        record = record.with_notes(notes);
    }
    record.id = args.id;
    tracing::info!(name = %record.name, owner = %record.owner_id, "built simulation record");
    Ok(serde_json::to_value(record)?)
}
