// Section navigation state machine
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("No sections configured")]
    NoSections,
}

/// Exactly one section is active at any time.
#[derive(Debug, Clone)]
pub struct Navigation {
    sections: Vec<String>,
    active: usize,
}

impl Navigation {
    pub fn new(sections: Vec<String>, initial: &str) -> Result<Self, NavigationError> {
        if sections.is_empty() {
            return Err(NavigationError::NoSections);
        }

        let active = Self::position(&sections, initial)?;
        Ok(Self { sections, active })
    }

    fn position(sections: &[String], section: &str) -> Result<usize, NavigationError> {
        sections
            .iter()
            .position(|s| s == section)
            .ok_or_else(|| NavigationError::UnknownSection(section.to_string()))
    }

    /// Switches to `section`; on error the active section is unchanged.
    pub fn activate(&mut self, section: &str) -> Result<&str, NavigationError> {
        self.active = Self::position(&self.sections, section)?;
        Ok(self.active())
    }

    pub fn active(&self) -> &str {
        &self.sections[self.active]
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.active() == section
    }
}
