use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::columns::{map_headers, Column};
use super::types::PlanetInput;

/// Load a planet catalog from a CSV file on disk
pub fn load_csv(path: &Path) -> Result<Vec<PlanetInput>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open catalog at {}", path.display()))?;
    let planets = read_catalog(file)
        .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = planets.len(), "catalog loaded");
    Ok(planets)
}

/// Parse CSV rows into planet inputs.
///
/// Lines starting with `#` are treated as comments (the archive export
/// prepends a commented header block). Unknown columns are dropped, empty
/// cells become None, and cells that do not parse as a finite number are
/// dropped with a warning. Rows without a name are skipped.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<PlanetInput>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let columns = map_headers(rdr.headers().context("Failed to read CSV header")?.iter());
    if !columns.contains(&Some(Column::Name)) {
        tracing::warn!("catalog has no name column; every row will be skipped");
    }

    let mut planets = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        // Header is line 1
        let line = idx + 2;
        let record = record.with_context(|| format!("Malformed CSV row at line {}", line))?;

        let mut planet = PlanetInput::default();
        for (cell, column) in record.iter().zip(columns.iter()) {
            if let Some(column) = column {
                assign(&mut planet, *column, cell, line);
            }
        }

        if planet.name.is_empty() {
            tracing::warn!(line, "row without a planet name skipped");
            continue;
        }
        planets.push(planet);
    }

    Ok(planets)
}

fn assign(planet: &mut PlanetInput, column: Column, cell: &str, line: usize) {
    if column.is_text() {
        match column {
            Column::Name => planet.name = cell.to_string(),
            _ => planet.st_spectype = (!cell.is_empty()).then(|| cell.to_string()),
        }
        return;
    }

    let value = parse_number(cell, column, line);
    let slot = match column {
        Column::PlRade => &mut planet.pl_rade,
        Column::PlRadj => &mut planet.pl_radj,
        Column::PlOrbsmax => &mut planet.pl_orbsmax,
        Column::PlOrbper => &mut planet.pl_orbper,
        Column::PlOrbeccen => &mut planet.pl_orbeccen,
        Column::StTeff => &mut planet.st_teff,
        Column::StRad => &mut planet.st_rad,
        Column::StLum => &mut planet.st_lum,
        Column::StMass => &mut planet.st_mass,
        Column::StMetfe => &mut planet.st_metfe,
        Column::Ra => &mut planet.ra,
        Column::Dec => &mut planet.dec,
        Column::Name | Column::StSpectype => return,
    };
    *slot = value;
}

fn parse_number(cell: &str, column: Column, line: usize) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::warn!(
                line,
                column = column.as_str(),
                value = cell,
                "non-numeric value treated as missing"
            );
            None
        }
    }
}
