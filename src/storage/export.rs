//! CSV renderings of store contents.

use std::io;

use crate::{
    domain::{Requirement, Term},
    storage::traceability::TraceEdge,
};

const MATRIX_HEADER: [&str; 3] = ["Source Requirement", "Link Type", "Target Requirement"];

const REQUIREMENTS_HEADER: [&str; 11] = [
    "display_id",
    "layer",
    "type",
    "description",
    "rationale",
    "source",
    "priority",
    "status",
    "verification",
    "links",
    "versions",
];

/// Writes the traceability matrix, one row per edge.
///
/// A header row is always written, even when there are no edges.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_traceability_matrix<'a, W: io::Write>(
    writer: W,
    edges: impl IntoIterator<Item = &'a TraceEdge>,
) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(MATRIX_HEADER)?;
    for edge in edges {
        csv.write_record([
            edge.source_id.as_str(),
            edge.link_type.as_str(),
            edge.target_id.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes one row per requirement.
///
/// Links are rendered as `Type:target` pairs separated by `; `, and the
/// history as the number of snapshots.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_requirements<'a, W: io::Write>(
    writer: W,
    requirements: impl IntoIterator<Item = &'a Requirement>,
) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(REQUIREMENTS_HEADER)?;
    for requirement in requirements {
        let links = requirement
            .links()
            .iter()
            .map(|link| format!("{}:{}", link.link_type, link.target_id))
            .collect::<Vec<_>>()
            .join("; ");
        csv.write_record([
            requirement.display_id(),
            requirement.layer().map_or("", Term::as_str),
            requirement.requirement_type().as_str(),
            requirement.description(),
            requirement.rationale().unwrap_or_default(),
            requirement.source().as_str(),
            requirement.priority().as_str(),
            requirement.status().as_str(),
            requirement.verification().unwrap_or_default(),
            &links,
            &requirement.versions().len().to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
