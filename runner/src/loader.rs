use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use cpu_scheduler::ProcessRecord;

/// The processes to simulate and the quantum the file asks for
#[derive(Debug)]
pub struct Workload {
    pub processes: Vec<ProcessRecord>,
    pub quantum: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WorkloadFile {
    List(Vec<ProcessRecord>),
    Document {
        processes: Vec<ProcessRecord>,
        #[serde(default)]
        quantum: Option<usize>,
    },
}

/// Parses either a bare list of process records or a document with a
/// `processes` list and an optional `quantum`
pub fn parse_workload(text: &str) -> Result<Workload> {
    let file: WorkloadFile = serde_json::from_str(text).context("malformed workload")?;

    Ok(match file {
        WorkloadFile::List(processes) => Workload {
            processes,
            quantum: None,
        },
        WorkloadFile::Document { processes, quantum } => Workload { processes, quantum },
    })
}

pub fn load_workload(path: &Path) -> Result<Workload> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    parse_workload(&text).with_context(|| format!("loading {}", path.display()))
}
