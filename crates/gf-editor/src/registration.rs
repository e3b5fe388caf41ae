//! Meeting registration form state. The only logic worth centralizing is the
//! speaker-role rule: speech fields exist only while a speaker role is
//! selected, and deselecting one clears them.

use gf_core::models::{Registration, RegistrationCreate};

/// A role whose name contains "speaker" (case-insensitive) carries speech
/// metadata; every other role hides those fields.
pub fn is_speaker_role(role: &str) -> bool {
    role.to_lowercase().contains("speaker")
}

#[derive(Debug, Default, Clone)]
pub struct RegistrationForm {
    role: Option<String>,
    speech_title: Option<String>,
    speech_objectives: Option<String>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills the form for editing an existing registration.
    pub fn from_registration(registration: &Registration) -> Self {
        Self {
            role: registration.role.clone(),
            speech_title: registration.speech_title.clone(),
            speech_objectives: registration.speech_objectives.clone(),
        }
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn is_speaker(&self) -> bool {
        self.role.as_deref().map(is_speaker_role).unwrap_or(false)
    }

    /// Selects a role. Moving off a speaker role clears the speech fields so
    /// stale speech metadata never rides along with a non-speaker signup.
    pub fn set_role(&mut self, role: Option<String>) {
        self.role = role;
        if !self.is_speaker() {
            self.speech_title = None;
            self.speech_objectives = None;
        }
    }

    /// Speech fields accept input only while a speaker role is selected.
    pub fn set_speech_title(&mut self, title: impl Into<String>) -> bool {
        if !self.is_speaker() {
            return false;
        }
        self.speech_title = Some(title.into());
        true
    }

    pub fn set_speech_objectives(&mut self, objectives: impl Into<String>) -> bool {
        if !self.is_speaker() {
            return false;
        }
        self.speech_objectives = Some(objectives.into());
        true
    }

    pub fn speech_title(&self) -> Option<&str> {
        self.speech_title.as_deref()
    }

    pub fn speech_objectives(&self) -> Option<&str> {
        self.speech_objectives.as_deref()
    }

    /// The create/update wire payload. The same shape serves both calls; the
    /// server decides create-vs-update by route method.
    pub fn payload(&self) -> RegistrationCreate {
        RegistrationCreate {
            role: self.role.clone(),
            speech_title: self.speech_title.clone(),
            speech_objectives: self.speech_objectives.clone(),
        }
    }
}
