//! Council proposals residents vote on.
//!
//! Each resident votes once per proposal; the choice is final.

use crate::error::{Error, Result};
use crate::types::VoteCount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names attributed to proposals that show an author
pub const AUTHORS: [&str; 5] = [
    "Alex Johnson",
    "Priya Singh",
    "Jordan Lee",
    "Samira Patel",
    "Diego Ramirez",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Support,
    Neutral,
    Oppose,
}

impl FromStr for VoteChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "support" => Ok(VoteChoice::Support),
            "neutral" => Ok(VoteChoice::Neutral),
            "oppose" => Ok(VoteChoice::Oppose),
            other => Err(Error::Validation(format!(
                "Unknown vote '{}'. Allowed values are: support, neutral, oppose",
                other
            ))),
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VoteChoice::Support => "support",
            VoteChoice::Neutral => "neutral",
            VoteChoice::Oppose => "oppose",
        })
    }
}

fn default_show_author() -> bool {
    true
}

/// A proposal with its community tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub title: String,
    #[serde(default = "default_show_author")]
    pub show_author: bool,
    /// Votes cast before this resident's, without a breakdown
    #[serde(default)]
    pub initial_votes: u64,
    #[serde(default)]
    pub support: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub oppose: u64,
    /// This resident's vote, once cast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<VoteChoice>,
}

impl Proposal {
    pub fn new(id: impl Into<String>, title: impl Into<String>, initial_votes: u64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            show_author: true,
            initial_votes,
            support: 0,
            neutral: 0,
            oppose: 0,
            my_vote: None,
        }
    }

    pub fn without_author(mut self) -> Self {
        self.show_author = false;
        self
    }

    /// Author picked from [`AUTHORS`] by title length
    pub fn author(&self) -> Option<&'static str> {
        self.show_author
            .then(|| AUTHORS[self.title.chars().count() % AUTHORS.len()])
    }

    /// Cast this resident's vote
    pub fn vote(&mut self, choice: VoteChoice) -> Result<()> {
        if self.my_vote.is_some() {
            return Err(Error::AlreadyVoted(self.title.clone()));
        }
        let counter = match choice {
            VoteChoice::Support => &mut self.support,
            VoteChoice::Neutral => &mut self.neutral,
            VoteChoice::Oppose => &mut self.oppose,
        };
        *counter = counter.saturating_add(1);
        self.my_vote = Some(choice);
        Ok(())
    }

    /// Votes cast through the dashboard as a tally
    pub fn counts(&self) -> VoteCount {
        let clamp = |n: u64| i64::try_from(n).unwrap_or(i64::MAX);
        VoteCount::tally(clamp(self.support), clamp(self.neutral), clamp(self.oppose))
    }

    /// Dashboard votes plus the initial community votes
    pub fn total(&self) -> u64 {
        [self.support, self.neutral, self.oppose, self.initial_votes]
            .into_iter()
            .fold(0, u64::saturating_add)
    }
}

/// Proposal as listed to a resident
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'static str>,
    pub counts: VoteCount,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<VoteChoice>,
}

impl From<&Proposal> for ProposalSummary {
    fn from(proposal: &Proposal) -> Self {
        Self {
            id: proposal.id.clone(),
            title: proposal.title.clone(),
            author: proposal.author(),
            counts: proposal.counts(),
            total: proposal.total(),
            my_vote: proposal.my_vote,
        }
    }
}
