use super::mapping::{resolve_layout, ColumnLayout};
use super::normalizer::{normalize_header, parse_number};
use super::ProductionImportError;
use crate::workflows::commission::OperatorRecord;
use csv::StringRecord;
use std::io::Read;
use tracing::debug;

pub(crate) fn parse_records<R: Read>(
    mut reader: R,
) -> Result<Vec<OperatorRecord>, ProductionImportError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    let text = String::from_utf8_lossy(&raw);
    let text = text.trim_start_matches('\u{feff}');

    let delimiter = sniff_delimiter(text.lines().next().unwrap_or_default());
    debug!(delimiter = %char::from(delimiter), "detected production report delimiter");

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let layout = resolve_layout(&headers).map_err(ProductionImportError::MissingColumns)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        records.push(to_operator(&row?, &layout));
    }

    Ok(records)
}

/// `;` when the header line carries more semicolons than commas, `,` otherwise.
fn sniff_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn to_operator(row: &StringRecord, layout: &ColumnLayout) -> OperatorRecord {
    let field = |index: usize| row.get(index).unwrap_or_default();

    OperatorRecord {
        name: field(layout.name).trim().to_string(),
        team: field(layout.team).trim().to_string(),
        completed: parse_number(field(layout.completed)).unwrap_or(0.0),
        custom_goal: layout
            .custom_goal
            .and_then(|index| parse_number(field(index))),
    }
}

#[cfg(test)]
pub(crate) fn sniff_for_tests(header_line: &str) -> u8 {
    sniff_delimiter(header_line)
}
