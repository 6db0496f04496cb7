use std::io::IsTerminal;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::scoring::{Label, PlanetResult, DISCLAIMER};
use crate::store::{Note, PlanetRecord};

/// A planet name with its scoring result for display
#[derive(Debug, Clone, Copy)]
pub struct ScoredPlanet<'a> {
    pub name: &'a str,
    pub result: &'a PlanetResult,
}

impl<'a> From<&'a PlanetRecord> for ScoredPlanet<'a> {
    fn from(record: &'a PlanetRecord) -> Self {
        Self {
            name: record.name(),
            result: &record.result,
        }
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an optional quantity with fixed precision, "-" when undefined
pub fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

/// Format a score with one decimal place
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

fn colored_label(label: Label) -> String {
    match label {
        Label::Likely => label.green().bold().to_string(),
        Label::Possible => label.yellow().to_string(),
        Label::Unlikely => label.red().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

const INDEX_WIDTH: usize = 4;
const SCORE_WIDTH: usize = 5;
const LABEL_WIDTH: usize = 8;
const RADIUS_WIDTH: usize = 6;
const AXIS_WIDTH: usize = 7;
const FLUX_WIDTH: usize = 7;
const TEMP_WIDTH: usize = 6;
const SEPARATOR: &str = "  ";

fn header_line() -> String {
    format!(
        "{:>iw$} {:>sw$}{sep}{:<lw$}{sep}{:>rw$}{sep}{:>aw$}{sep}{:>fw$}{sep}{:>tw$}{sep}{}",
        "#",
        "SCORE",
        "LABEL",
        "R_E",
        "A_AU",
        "S_E",
        "TEQ_K",
        "NAME",
        iw = INDEX_WIDTH,
        sw = SCORE_WIDTH,
        lw = LABEL_WIDTH,
        rw = RADIUS_WIDTH,
        aw = AXIS_WIDTH,
        fw = FLUX_WIDTH,
        tw = TEMP_WIDTH,
        sep = SEPARATOR,
    )
}

/// Format planets as a scored table with columns:
/// Index, Score, Label, Radius, Semi-major axis, Insolation, Teq, Name
///
/// Names are truncated to the terminal width; piped output is never
/// truncated.
pub fn format_scored_table(planets: &[ScoredPlanet], use_colors: bool) -> String {
    if planets.is_empty() {
        return "No planets found.".to_string();
    }

    let term_width = get_terminal_width();
    let fixed_width = INDEX_WIDTH
        + 1
        + SCORE_WIDTH
        + LABEL_WIDTH
        + RADIUS_WIDTH
        + AXIS_WIDTH
        + FLUX_WIDTH
        + TEMP_WIDTH
        + SEPARATOR.len() * 6;

    let mut lines = Vec::with_capacity(planets.len() + 1);
    let header = header_line();
    lines.push(if use_colors {
        header.dimmed().to_string()
    } else {
        header
    });

    for (idx, planet) in planets.iter().enumerate() {
        let r = planet.result;
        let index_str = format!("{:>w$}", format!("{}.", idx + 1), w = INDEX_WIDTH);
        let score_str = format!("{:>w$}", format_score(r.score), w = SCORE_WIDTH);
        let label_str = format!("{:<w$}", r.label.as_str(), w = LABEL_WIDTH);
        let numbers = format!(
            "{:>rw$}{sep}{:>aw$}{sep}{:>fw$}{sep}{:>tw$}",
            format_value(r.radius_re, 2),
            format_value(r.a_au, 3),
            format_value(r.s_earth, 3),
            format_value(r.teq_k, 0),
            rw = RADIUS_WIDTH,
            aw = AXIS_WIDTH,
            fw = FLUX_WIDTH,
            tw = TEMP_WIDTH,
            sep = SEPARATOR,
        );

        let name = match term_width {
            Some(width) if width > fixed_width + 10 => truncate_name(planet.name, width - fixed_width),
            // Very narrow terminal, show truncated
            Some(_) => truncate_name(planet.name, 20),
            None => planet.name.to_string(),
        };

        let line = if use_colors {
            // Pad before coloring so escape codes don't break alignment
            let label_colored = format!(
                "{}{}",
                colored_label(r.label),
                " ".repeat(LABEL_WIDTH.saturating_sub(r.label.as_str().len()))
            );
            format!(
                "{} {}{sep}{}{sep}{}{sep}{}",
                index_str.dimmed(),
                score_str.bold(),
                label_colored,
                numbers,
                name,
                sep = SEPARATOR,
            )
        } else {
            format!(
                "{} {}{sep}{}{sep}{}{sep}{}",
                index_str,
                score_str,
                label_str,
                numbers,
                name,
                sep = SEPARATOR,
            )
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format planets as tab-separated values for scripting
/// Columns: score, label, radius_Re, a_AU, S_earth, Teq_K, name (no headers, no colors)
pub fn format_tsv(planets: &[ScoredPlanet]) -> String {
    planets
        .iter()
        .map(|planet| {
            let r = planet.result;
            format!(
                "{:.2}\t{}\t{}\t{}\t{}\t{}\t{}",
                r.score,
                r.label,
                format_value(r.radius_re, 3),
                format_value(r.a_au, 4),
                format_value(r.s_earth, 4),
                format_value(r.teq_k, 1),
                planet.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format any serializable rows as pretty JSON
pub fn format_json<T: Serialize + ?Sized>(rows: &T) -> Result<String> {
    serde_json::to_string_pretty(rows).context("Failed to serialize JSON output")
}

/// Multi-line detail view of one stored planet
pub fn format_planet_detail(
    record: &PlanetRecord,
    notes: &[&Note],
    favorite: bool,
    use_colors: bool,
) -> String {
    let r = &record.result;
    let mut out = Vec::new();

    let star = if favorite { " *" } else { "" };
    if use_colors {
        out.push(format!("{}{}", record.name().bold(), star.yellow()));
        out.push(format!(
            "  Score: {} ({})",
            format_score(r.score).bold(),
            colored_label(r.label)
        ));
    } else {
        out.push(format!("{}{}", record.name(), star));
        out.push(format!("  Score: {} ({})", format_score(r.score), r.label));
    }

    out.push(format!("  Radius: {} R_earth", format_value(r.radius_re, 2)));
    out.push(format!("  Semi-major axis: {} AU", format_value(r.a_au, 4)));
    out.push(format!("  Luminosity: {:.4} L_sun", r.l_lsun));
    out.push(format!("  Insolation: {} S_earth", format_value(r.s_earth, 3)));
    out.push(format!("  Equilibrium temperature: {} K", format_value(r.teq_k, 1)));

    match r.hz_bounds() {
        Some(b) => {
            let verdict = match r.in_hz {
                Some(true) => "inside",
                Some(false) => "outside",
                None => "unknown",
            };
            out.push(format!(
                "  Habitable zone: S {:.3} (inner) to {:.3} (outer), {}",
                b.inner, b.outer, verdict
            ));
        }
        None => out.push("  Habitable zone: unknown (no stellar temperature)".to_string()),
    }

    out.push(String::new());
    out.push("  Breakdown:".to_string());
    for c in r.subscores.contributions() {
        out.push(format!(
            "    {:<13}{:>6.1} x {:.2} = {:>5.1}",
            c.name,
            c.value,
            c.weight,
            c.weighted()
        ));
    }

    if !notes.is_empty() {
        out.push(String::new());
        out.push("  Notes:".to_string());
        for note in notes {
            out.push(format!(
                "    [{}] {}",
                note.created_at.format("%Y-%m-%d %H:%M"),
                note.text
            ));
        }
    }

    out.push(String::new());
    if use_colors {
        out.push(DISCLAIMER.dimmed().to_string());
    } else {
        out.push(DISCLAIMER.to_string());
    }

    out.join("\n")
}
