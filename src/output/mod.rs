pub mod formatter;

pub use formatter::{
    format_json, format_planet_detail, format_score, format_scored_table, format_tsv,
    format_value, should_use_colors, ScoredPlanet,
};
