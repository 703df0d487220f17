/// Visual themes offered in the theme dropdown.
///
/// The set is closed; each variant maps to a palette in
/// `services::syntax::palette`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeTheme {
    #[default]
    Dark,
    Light,
    Atom,
    Darcula,
    Coy,
    Dracula,
    NightOwl,
    Okaidia,
}

impl CodeTheme {
    /// Dropdown value (`dark`, `nightOwl`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Atom => "atom",
            Self::Darcula => "darcula",
            Self::Coy => "coy",
            Self::Dracula => "dracula",
            Self::NightOwl => "nightOwl",
            Self::Okaidia => "okaidia",
        }
    }

    /// Human-readable label: the key with its first character upper-cased.
    pub fn label(&self) -> String {
        capitalize(self.key())
    }

    /// Get all available themes, in dropdown order
    pub fn all() -> &'static [CodeTheme] {
        &[
            Self::Dark,
            Self::Light,
            Self::Atom,
            Self::Darcula,
            Self::Coy,
            Self::Dracula,
            Self::NightOwl,
            Self::Okaidia,
        ]
    }

    /// Position in [`CodeTheme::all`].
    pub fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
