//! Demographic breakdowns and action plans for council participation dashboards.
//!
//! This library turns per-entity demographic vote datasets into ranked,
//! render-ready breakdowns, derives each project's dominant profile and maps
//! it to a recommended action plan. It also carries the small pieces of
//! resident-side state the dashboard needs: sessions, the council directory,
//! onboarding preferences, proposal voting, page languages, service requests
//! and idea structuring.

pub mod action_plan;
pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod councils;
pub mod dashboard;
pub mod error;
pub mod language;
pub mod preferences;
pub mod proposals;
pub mod services;
pub mod session;
pub mod structuring;
pub mod types;

pub use action_plan::{derive_dominant_profile, select_action_plan, CultureLabel, DominantProfile};
pub use aggregate::{aggregate, grand_total, AggregationResult, BucketTotal};
pub use catalog::Catalog;
pub use config::{Config, ConfigBuilder, CountPolicy};
pub use councils::{find_council, search_councils};
pub use dashboard::{render_text, ActionPlanEntry, BreakdownRow, BreakdownView};
pub use error::{Error, Result};
pub use language::{find_language, Language};
pub use preferences::{find_preference, PreferenceCategory, PreferenceOption};
pub use proposals::{Proposal, ProposalSummary, VoteChoice};
pub use services::{PermitTerm, RatesStatus, ServiceKind, ServiceReceipt, ServiceRequest};
pub use session::{SessionState, SessionStore};
pub use structuring::{structure_idea, IdeaStructurer, MockStructurer, StructuredIdea};
pub use types::{
    AreaParticipation, BucketMap, DemographicDataset, Dimension, Entity, EntityKind, VoteCount,
};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::action_plan::{derive_dominant_profile, select_action_plan, DominantProfile};
    pub use crate::aggregate::{aggregate, grand_total, AggregationResult};
    pub use crate::catalog::Catalog;
    pub use crate::config::{Config, ConfigBuilder, CountPolicy};
    pub use crate::dashboard::{render_text, ActionPlanEntry, BreakdownView};
    pub use crate::error::{Error, Result};
    pub use crate::proposals::{Proposal, VoteChoice};
    pub use crate::session::{SessionState, SessionStore};
    pub use crate::types::{DemographicDataset, Dimension, Entity, EntityKind, VoteCount};
}
