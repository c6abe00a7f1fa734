// Which screen the front end is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    Game,
    NameEntry,
    HighScores,
}

// Main menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Classic,
    Hardcore,
    HighScores,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::Classic,
        MenuOption::Hardcore,
        MenuOption::HighScores,
        MenuOption::Quit,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Classic => "Classic",
            MenuOption::Hardcore => "Hardcore",
            MenuOption::HighScores => "High Scores",
            MenuOption::Quit => "Quit",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&option| option == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub state: MenuState,
    pub selected_option: MenuOption,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            state: MenuState::MainMenu,
            selected_option: MenuOption::Classic,
        }
    }
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
