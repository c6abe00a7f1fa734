#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{FinalScore, GameMode};
    use crate::game::HIGH_SCORE_CAPACITY;
    use crate::scores::*;
    use std::fs;
    use tempfile::tempdir;

    fn entry(name: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score,
            level: 1,
            mode: GameMode::Hardcore,
        }
    }

    fn scores(table: &HighScoreTable) -> Vec<u32> {
        table.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_seeded_table() {
        let table = HighScoreTable::seeded();
        assert_eq!(table.entries().len(), HIGH_SCORE_CAPACITY);
        assert!(table.is_full());
        assert_eq!(
            scores(&table),
            vec![1000, 900, 800, 700, 600, 500, 400, 300, 200, 100]
        );

        let top = &table.entries()[0];
        assert_eq!(top.name, "Player");
        assert_eq!(top.level, 11);
        assert_eq!(top.mode, GameMode::Classic);
        assert_eq!(table.entries()[9].level, 2);
    }

    #[test]
    fn test_qualifies() {
        let table = HighScoreTable::seeded();
        assert!(!table.qualifies(99));
        assert!(table.qualifies(100));
        assert!(table.qualifies(5000));

        // A table with room takes anything
        assert!(HighScoreTable::default().qualifies(0));
    }

    #[test]
    fn test_add_evicts_lowest() {
        let mut table = HighScoreTable::seeded();

        assert_eq!(table.add(entry("Ada", 550)), Some(5));
        assert_eq!(table.entries().len(), HIGH_SCORE_CAPACITY);
        assert_eq!(table.entries()[5].name, "Ada");
        assert_eq!(table.entries().last().map(|e| e.score), Some(200));

        assert_eq!(table.add(entry("Low", 10)), None);
        assert_eq!(table.entries().len(), HIGH_SCORE_CAPACITY);
    }

    #[test]
    fn test_add_ranks_ties_after_existing() {
        let mut table = HighScoreTable::seeded();
        assert_eq!(table.add(entry("Tie", 500)), Some(6));
        assert_eq!(table.entries()[5].name, "Player");
        assert_eq!(table.entries()[6].name, "Tie");

        assert_eq!(table.add(entry("Best", 2000)), Some(0));
    }

    #[test]
    fn test_add_to_empty_table() {
        let mut table = HighScoreTable::default();
        assert_eq!(table.add(entry("A", 10)), Some(0));
        assert_eq!(table.add(entry("B", 30)), Some(0));
        assert_eq!(table.add(entry("C", 20)), Some(1));
        assert_eq!(scores(&table), vec![30, 20, 10]);
    }

    #[test]
    fn test_from_final_score() {
        let final_score = FinalScore {
            score: 70,
            level: 3,
            mode: GameMode::Hardcore,
        };
        let entry = ScoreEntry::from_final("Kim".to_string(), &final_score);
        assert_eq!(entry.score, 70);
        assert_eq!(entry.level, 3);
        assert_eq!(entry.mode, GameMode::Hardcore);
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Sam  "), Ok("Sam".to_string()));
        assert_eq!(validate_name(""), Err(NameError::Empty));
        assert_eq!(validate_name("   "), Err(NameError::Empty));
        assert_eq!(validate_name(&"x".repeat(20)), Ok("x".repeat(20)));
        assert_eq!(validate_name(&"x".repeat(21)), Err(NameError::TooLong));
    }

    #[test]
    fn test_load_missing_file_creates_seeded_table() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("data").join("scores.toml");

        let table = HighScoreTable::load(&path).expect("Failed to load scores");
        assert!(path.exists());
        assert_eq!(table, HighScoreTable::seeded());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("scores.toml");

        let mut table = HighScoreTable::seeded();
        table.add(entry("Robin", 750));
        table.save(&path).expect("Failed to save scores");

        let loaded = HighScoreTable::load(&path).expect("Failed to load scores");
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_sorts_and_truncates() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("scores.toml");

        let mut contents = String::new();
        for score in 0..12 {
            contents.push_str(&format!(
                "[[entries]]\nname = \"P{score}\"\nscore = {score}\nlevel = 1\nmode = \"Classic\"\n\n"
            ));
        }
        fs::write(&path, contents).expect("Failed to write scores");

        let table = HighScoreTable::load(&path).expect("Failed to load scores");
        assert_eq!(scores(&table), vec![11, 10, 9, 8, 7, 6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("scores.toml");
        fs::write(&path, "entries = 5").expect("Failed to write scores");

        assert!(HighScoreTable::load(&path).is_err());
    }

    #[test]
    fn test_scores_file_path() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let configured = temp_dir.path().join("mine.toml");
        assert_eq!(scores_file_path(Some(&configured)), configured);

        let from_env = temp_dir.path().join("env.toml");
        unsafe {
            std::env::set_var(SCORES_ENV_VAR, &from_env);
        }
        assert_eq!(scores_file_path(None), from_env);
        unsafe {
            std::env::remove_var(SCORES_ENV_VAR);
        }
    }
}
