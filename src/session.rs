//! Resident session flags, persisted as one JSON document.

use crate::councils::find_council;
use crate::error::{Error, Result};
use crate::language::{default_language, find_language, Language};
use crate::preferences::find_preference;
use crate::proposals::{Proposal, VoteChoice};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Sign-in and onboarding state for one resident
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub signed_in: bool,
    pub onboarded: bool,
    pub mygov_linked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub council: Option<String>,
    pub preferences: Vec<String>,
    /// Page language code; English when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Proposal id to this resident's vote
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub votes: IndexMap<String, VoteChoice>,
}

impl SessionState {
    /// Mock email sign-in; any non-blank address is accepted
    pub fn sign_in_with_email(&mut self, email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(Error::Validation("Please enter your email".to_string()));
        }
        self.signed_in = true;
        Ok(())
    }

    pub fn sign_in_with_mygov(&mut self) {
        self.signed_in = true;
        self.mygov_linked = true;
    }

    pub fn link_mygov(&mut self) {
        self.mygov_linked = true;
    }

    /// Select a council from the directory; stores the directory spelling
    pub fn select_council(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Council name must not be empty".to_string()));
        }
        let council = find_council(name).ok_or_else(|| Error::UnknownCouncil(name.to_string()))?;
        self.council = Some(council.to_string());
        Ok(())
    }

    /// Store community preferences by catalogue name; this completes onboarding.
    ///
    /// Blank entries and repeats are dropped. Nothing is stored if any entry
    /// is not in the catalogue.
    pub fn set_preferences<I, S>(&mut self, preferences: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        for preference in preferences {
            let preference = preference.as_ref();
            if preference.trim().is_empty() {
                continue;
            }
            let name = find_preference(preference)?.name;
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        self.preferences = names;
        self.onboarded = true;
        Ok(())
    }

    pub fn language(&self) -> &'static Language {
        self.language
            .as_deref()
            .and_then(|code| find_language(code).ok())
            .unwrap_or_else(default_language)
    }

    pub fn set_language(&mut self, code: &str) -> Result<&'static Language> {
        let language = find_language(code)?;
        self.language = Some(language.code.to_string());
        Ok(language)
    }

    /// Vote on a proposal, remembering the choice for later sessions
    pub fn cast_vote(&mut self, proposal: &mut Proposal, choice: VoteChoice) -> Result<()> {
        if self.votes.contains_key(&proposal.id) {
            return Err(Error::AlreadyVoted(proposal.title.clone()));
        }
        proposal.vote(choice)?;
        self.votes.insert(proposal.id.clone(), choice);
        Ok(())
    }

    /// Replay remembered votes onto freshly loaded proposals
    pub fn apply_votes(&self, proposals: &mut [Proposal]) -> Result<()> {
        for proposal in proposals.iter_mut() {
            if let Some(choice) = self.votes.get(&proposal.id) {
                proposal.vote(*choice)?;
            }
        }
        Ok(())
    }

    /// Forget everything except the page language
    pub fn sign_out(&mut self) {
        *self = Self {
            language: self.language.take(),
            ..Self::default()
        };
    }
}

/// Load/save contract for [`SessionState`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a fresh, signed-out session
    pub fn load(&self) -> Result<SessionState> {
        if !self.path.exists() {
            debug!("No session at {}, starting fresh", self.path.display());
            return Ok(SessionState::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(state)?)?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
