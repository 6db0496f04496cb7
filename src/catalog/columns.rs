/// A recognized catalog column after header normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    PlRade,
    PlRadj,
    PlOrbsmax,
    PlOrbper,
    PlOrbeccen,
    StTeff,
    StRad,
    StLum,
    StMass,
    StMetfe,
    StSpectype,
    Ra,
    Dec,
}

impl Column {
    /// Resolve a raw CSV header to a column.
    ///
    /// Headers are trimmed and compared case-insensitively. Archive aliases
    /// (`pl_name`, `ra_deg`, `dec_deg`) map onto their canonical column.
    /// Returns None for columns the scorer has no use for.
    pub fn from_header(header: &str) -> Option<Self> {
        let key = header.trim().to_ascii_lowercase();
        let column = match key.as_str() {
            "name" | "pl_name" => Column::Name,
            "pl_rade" => Column::PlRade,
            "pl_radj" => Column::PlRadj,
            "pl_orbsmax" => Column::PlOrbsmax,
            "pl_orbper" => Column::PlOrbper,
            "pl_orbeccen" => Column::PlOrbeccen,
            "st_teff" => Column::StTeff,
            "st_rad" => Column::StRad,
            "st_lum" => Column::StLum,
            "st_mass" => Column::StMass,
            "st_metfe" => Column::StMetfe,
            "st_spectype" => Column::StSpectype,
            "ra" | "ra_deg" => Column::Ra,
            "dec" | "dec_deg" => Column::Dec,
            _ => return None,
        };
        Some(column)
    }

    /// Canonical column name
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::PlRade => "pl_rade",
            Column::PlRadj => "pl_radj",
            Column::PlOrbsmax => "pl_orbsmax",
            Column::PlOrbper => "pl_orbper",
            Column::PlOrbeccen => "pl_orbeccen",
            Column::StTeff => "st_teff",
            Column::StRad => "st_rad",
            Column::StLum => "st_lum",
            Column::StMass => "st_mass",
            Column::StMetfe => "st_metfe",
            Column::StSpectype => "st_spectype",
            Column::Ra => "ra",
            Column::Dec => "dec",
        }
    }

    /// Whether the column holds text rather than a number
    pub fn is_text(&self) -> bool {
        matches!(self, Column::Name | Column::StSpectype)
    }
}

/// Map each header position to its column.
///
/// When two headers resolve to the same column (e.g. both `name` and
/// `pl_name`), the first one wins and later ones are dropped.
pub fn map_headers<'a, I>(headers: I) -> Vec<Option<Column>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<Column> = Vec::new();
    headers
        .into_iter()
        .map(|header| {
            let column = Column::from_header(header)?;
            if seen.contains(&column) {
                tracing::debug!(header, column = column.as_str(), "duplicate column ignored");
                return None;
            }
            seen.push(column);
            Some(column)
        })
        .collect()
}
