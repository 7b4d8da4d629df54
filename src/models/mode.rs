/// Whether the editor is creating a new link or changing an existing one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Create,
    Edit { short_code: String },
}

impl EditMode {
    pub fn edit(short_code: impl Into<String>) -> Self {
        EditMode::Edit {
            short_code: short_code.into(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Edit { .. })
    }

    pub fn short_code(&self) -> Option<&str> {
        match self {
            EditMode::Create => None,
            EditMode::Edit { short_code } => Some(short_code),
        }
    }
}
