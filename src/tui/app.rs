use crate::scoring::Label;
use crate::store::{PlanetFilter, PlanetRecord, StoreState};
use crate::tui::theme::ThemeColors;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Explore,
    Favorites,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    NoteInput,
    Help,
    ScoreBreakdown,
}

pub struct App {
    pub store: StoreState,
    pub store_path: PathBuf,
    /// Names of the planets shown in the current view, in display order
    pub rows: Vec<String>,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub label_filter: Option<Label>,
    pub query_limit: usize,
    pub input_mode: InputMode,
    pub note_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(store: StoreState, store_path: PathBuf, query_limit: usize, theme: ThemeColors) -> Self {
        let mut app = Self {
            store,
            store_path,
            rows: Vec::new(),
            table_state: ratatui::widgets::TableState::default(),
            current_view: View::Explore,
            label_filter: None,
            query_limit,
            input_mode: InputMode::Normal,
            note_input: String::new(),
            flash_message: None,
            should_quit: false,
            theme,
        };
        app.refresh_rows();
        app
    }

    /// Rebuild the visible rows from the store, keeping the selection in range
    pub fn refresh_rows(&mut self) {
        let filter = PlanetFilter::default().with_labels(self.label_filter.into_iter().collect());
        self.rows = match self.current_view {
            View::Explore => self
                .store
                .query(&filter, self.query_limit)
                .into_iter()
                .map(|r| r.name().to_string())
                .collect(),
            // Every favorite, regardless of the listing limit
            View::Favorites => {
                let mut favorites: Vec<&PlanetRecord> = self
                    .store
                    .favorites()
                    .into_iter()
                    .filter_map(|name| self.store.get(name))
                    .filter(|r| filter.matches(r))
                    .collect();
                favorites.sort_by(|a, b| a.cmp_rank(b));
                favorites.into_iter().map(|r| r.name().to_string()).collect()
            }
        };

        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                Some(i) if i >= self.rows.len() => self.table_state.select(Some(self.rows.len() - 1)),
                Some(_) => {}
                None => self.table_state.select(Some(0)),
            }
        }
    }

    pub fn current_records(&self) -> Vec<&PlanetRecord> {
        self.rows.iter().filter_map(|name| self.store.get(name)).collect()
    }

    pub fn next_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= self.rows.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) => self.rows.len() - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_record(&self) -> Option<&PlanetRecord> {
        self.table_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .and_then(|name| self.store.get(name))
    }

    fn selected_name(&self) -> Option<String> {
        self.selected_record().map(|r| r.name().to_string())
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    fn persist(&mut self) -> bool {
        match crate::store::write_store(&self.store_path, &self.store) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to save store from dashboard");
                self.show_flash(format!("Failed to save store: {}", e));
                false
            }
        }
    }

    /// Toggle between Explore and Favorites views
    pub fn toggle_view(&mut self) {
        self.current_view = match self.current_view {
            View::Explore => View::Favorites,
            View::Favorites => View::Explore,
        };
        self.table_state.select(None);
        self.refresh_rows();
    }

    /// Cycle the label filter: all -> Likely -> Possible -> Unlikely -> all
    pub fn cycle_label_filter(&mut self) {
        self.label_filter = match self.label_filter {
            None => Some(Label::Likely),
            Some(Label::Likely) => Some(Label::Possible),
            Some(Label::Possible) => Some(Label::Unlikely),
            Some(Label::Unlikely) => None,
        };
        self.table_state.select(None);
        self.refresh_rows();
        let shown = self
            .label_filter
            .map_or("all labels".to_string(), |l| l.to_string());
        self.show_flash(format!("Filter: {} ({} planets)", shown, self.rows.len()));
    }

    /// Add or remove the selected planet from favorites and save
    pub fn toggle_favorite_selected(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };

        let now_favorite = if self.store.is_favorite(&name) {
            self.store.unfavorite(&name);
            false
        } else {
            self.store.favorite(&name);
            true
        };

        if !self.persist() {
            // Keep memory in step with the file that failed to update
            if now_favorite {
                self.store.unfavorite(&name);
            } else {
                self.store.favorite(&name);
            }
            return;
        }

        self.refresh_rows();
        if now_favorite {
            self.show_flash(format!("Favorited: {}", name));
        } else {
            self.show_flash(format!("Unfavorited: {}", name));
        }
    }

    /// Start note input mode
    pub fn start_note_input(&mut self) {
        if self.selected_record().is_some() {
            self.input_mode = InputMode::NoteInput;
            self.note_input.clear();
        }
    }

    /// Confirm and save the note input
    pub fn confirm_note_input(&mut self) {
        let name = match self.selected_name() {
            Some(name) => name,
            None => {
                self.cancel_note_input();
                return;
            }
        };

        let text = std::mem::take(&mut self.note_input);
        self.input_mode = InputMode::Normal;

        if let Err(e) = self.store.add_note(&name, &text) {
            self.show_flash(format!("Error: {}", e));
            return;
        }

        if self.persist() {
            self.show_flash(format!("Note saved: {}", name));
        } else {
            self.store.notes.pop();
        }
    }

    /// Cancel note input
    pub fn cancel_note_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.note_input.clear();
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Show score breakdown overlay
    pub fn show_score_breakdown(&mut self) {
        if self.selected_record().is_some() {
            self.input_mode = InputMode::ScoreBreakdown;
        }
    }

    /// Dismiss score breakdown overlay
    pub fn dismiss_score_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlanetInput;
    use crate::scoring::score_planet;
    use std::env;
    use std::fs;

    fn record(name: &str, rade: f64) -> PlanetRecord {
        let input = PlanetInput {
            name: name.to_string(),
            pl_rade: Some(rade),
            pl_orbsmax: Some(1.0),
            st_teff: Some(5772.0),
            st_rad: Some(1.0),
            st_spectype: Some("G2V".to_string()),
            ..Default::default()
        };
        let result = score_planet(&input);
        PlanetRecord::new(input, result)
    }

    fn test_app(file: &str) -> App {
        let path = env::temp_dir().join(file);
        let _ = fs::remove_file(&path);
        let mut store = StoreState::new();
        store.save(vec![
            record("Earth twin", 1.0),
            record("Mini Neptune", 2.2),
            record("Gas giant", 11.0),
        ]);
        App::new(store, path, 500, ThemeColors::dark())
    }

    #[test]
    fn test_rows_sorted_and_first_selected() {
        let app = test_app("exohab_app_rows.json");
        assert_eq!(app.rows.len(), 3);
        assert_eq!(app.rows[0], "Earth twin");
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = test_app("exohab_app_nav.json");
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(2));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
        app.next_row();
        assert_eq!(app.selected_record().unwrap().name(), app.rows[1]);
    }

    #[test]
    fn test_favorites_view_and_toggle() {
        let mut app = test_app("exohab_app_fav.json");
        app.toggle_favorite_selected();
        assert!(app.store.is_favorite("Earth twin"));
        assert!(app.store_path.exists());

        app.toggle_view();
        assert_eq!(app.current_view, View::Favorites);
        assert_eq!(app.rows, vec!["Earth twin".to_string()]);

        // Unfavoriting from the favorites tab empties it
        app.toggle_favorite_selected();
        assert!(app.rows.is_empty());
        assert_eq!(app.table_state.selected(), None);

        let _ = fs::remove_file(&app.store_path);
    }

    #[test]
    fn test_label_filter_cycles() {
        let mut app = test_app("exohab_app_filter.json");
        let total = app.rows.len();
        for _ in 0..4 {
            app.cycle_label_filter();
        }
        assert_eq!(app.label_filter, None);
        assert_eq!(app.rows.len(), total);

        app.cycle_label_filter();
        assert_eq!(app.label_filter, Some(Label::Likely));
        assert!(app
            .current_records()
            .iter()
            .all(|r| r.result.label == Label::Likely));
    }

    #[test]
    fn test_note_input_saves() {
        let mut app = test_app("exohab_app_note.json");
        app.start_note_input();
        assert_eq!(app.input_mode, InputMode::NoteInput);
        app.note_input.push_str("check transit depth");
        app.confirm_note_input();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.notes("Earth twin")[0].text, "check transit depth");
        let _ = fs::remove_file(&app.store_path);
    }

    #[test]
    fn test_blank_note_rejected() {
        let mut app = test_app("exohab_app_blank_note.json");
        app.start_note_input();
        app.note_input.push_str("   ");
        app.confirm_note_input();
        assert!(app.store.notes.is_empty());
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.starts_with("Error"));
    }

    /// Point the store at a path whose parent is a regular file
    fn unwritable_store_path(blocker: &str) -> PathBuf {
        let blocker = env::temp_dir().join(blocker);
        let _ = fs::remove_dir_all(&blocker);
        fs::write(&blocker, "not a directory").unwrap();
        blocker.join("planets.json")
    }

    #[test]
    fn test_failed_favorite_save_rolls_back() {
        let mut app = test_app("exohab_app_fav_fail.json");
        app.store_path = unwritable_store_path("exohab_app_fav_blocker");

        app.toggle_favorite_selected();
        assert!(!app.store.is_favorite("Earth twin"));
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.starts_with("Failed to save store"));

        // Removing an existing favorite is restored the same way
        app.store.favorite("Earth twin");
        app.toggle_favorite_selected();
        assert!(app.store.is_favorite("Earth twin"));

        let _ = fs::remove_file(app.store_path.parent().unwrap());
    }

    #[test]
    fn test_failed_note_save_rolls_back() {
        let mut app = test_app("exohab_app_note_fail.json");
        app.store_path = unwritable_store_path("exohab_app_note_blocker");

        app.start_note_input();
        app.note_input.push_str("never persisted");
        app.confirm_note_input();

        assert!(app.store.notes.is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.starts_with("Failed to save store"));

        let _ = fs::remove_file(app.store_path.parent().unwrap());
    }

    #[test]
    fn test_favorites_tab_ignores_listing_limit() {
        let path = env::temp_dir().join("exohab_app_fav_limit.json");
        let mut store = StoreState::new();
        store.save(vec![
            record("Earth twin", 1.0),
            record("Mini Neptune", 2.2),
            record("Gas giant", 11.0),
        ]);
        store.favorite("Gas giant");
        let mut app = App::new(store, path, 1, ThemeColors::dark());
        assert_eq!(app.rows, vec!["Earth twin".to_string()]);

        app.toggle_view();
        assert_eq!(app.rows, vec!["Gas giant".to_string()]);
    }

    #[test]
    fn test_breakdown_requires_selection() {
        let mut app = App::new(
            StoreState::new(),
            env::temp_dir().join("exohab_app_empty.json"),
            500,
            ThemeColors::dark(),
        );
        app.show_score_breakdown();
        assert_eq!(app.input_mode, InputMode::Normal);
        app.start_note_input();
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
