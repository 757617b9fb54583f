use clap::{Parser, Subcommand};
use council_insights::config::{default_session_file, COUNT_POLICY_ENV, DATA_ENV, SESSION_ENV};
use council_insights::councils::search_councils;
use council_insights::language::find_language;
use council_insights::preferences::PREFERENCE_CATALOGUE;
use council_insights::prelude::*;
use council_insights::proposals::ProposalSummary;
use council_insights::structuring::{structure_idea, MockStructurer, StructuredIdea};
use std::path::PathBuf;
use std::time::Duration;

/// Demographic breakdowns and action plans for council participation dashboards
#[derive(Parser, Debug)]
#[command(name = "council-insights")]
#[command(about = "Inspect council participation data and resident sessions")]
#[command(version)]
struct Args {
    /// Catalog file (JSON or YAML). Defaults to COUNCIL_INSIGHTS_DATA, then built-in fixtures
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Fail when the catalog contains negative vote counts instead of clamping them
    /// (overrides COUNCIL_INSIGHTS_COUNT_POLICY)
    #[arg(long, global = true)]
    reject_negative: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one demographic breakdown of a project or idea
    Breakdown {
        /// Which list to select from
        #[arg(long, default_value = "project", value_parser = ["project", "idea"])]
        mode: String,

        /// Entity id (defaults to the first entity)
        #[arg(long)]
        entity: Option<String>,

        /// Breakdown dimension: age, sex or ethnicity
        #[arg(long, default_value = "age")]
        dimension: String,

        /// Output format
        #[arg(long, default_value = "json", value_parser = ["json", "text"])]
        format: String,
    },

    /// Show the dominant profile and action plan of a project
    Profile {
        /// Project id (defaults to the first project)
        #[arg(long)]
        entity: Option<String>,
    },

    /// List the action plan for every council area
    ActionPlans,

    /// Convert a free-text idea into a structured submission
    Structure {
        /// The idea text
        text: String,

        /// Skip the structuring backend and slice the text directly
        #[arg(long)]
        plain: bool,

        /// Give up on the backend after this many milliseconds
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },

    /// Search the council directory (empty query lists the first page)
    Councils {
        #[arg(default_value = "")]
        query: String,
    },

    /// List the community preferences offered during onboarding
    PreferenceOptions,

    /// List proposals with their tallies and the resident's votes
    Proposals,

    /// Vote on a proposal; each resident votes once
    Vote {
        /// Proposal id
        proposal: String,

        /// support, neutral or oppose
        choice: String,
    },

    /// Print a link that opens a page in the resident's language
    Translate {
        /// Page URL
        url: String,

        /// Language code (defaults to the session language)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Inspect or update the resident session
    Session {
        /// Session file (default: $HOME/.council-insights/session.json, or COUNCIL_INSIGHTS_SESSION env var)
        #[arg(long = "session-file")]
        session_file: Option<PathBuf>,

        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    /// Print the current session
    Show,
    /// Sign in with an email address, or with myGov when no email is given
    SignIn {
        #[arg(long)]
        email: Option<String>,
    },
    /// Select the resident's council from the directory
    Council { name: String },
    /// Set the page language
    Language { code: String },
    /// Save community preferences and complete onboarding
    Preferences {
        #[arg(num_args = 1..)]
        preferences: Vec<String>,
    },
    /// Clear the session
    SignOut,
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  breakdown           Show one demographic breakdown of a project or idea");
    println!("  profile             Show the dominant profile and action plan of a project");
    println!("  action-plans        List the action plan for every council area");
    println!("  structure           Convert a free-text idea into a structured submission");
    println!("  councils            Search the council directory");
    println!("  preference-options  List the community preferences offered during onboarding");
    println!("  proposals           List proposals with their tallies and the resident's votes");
    println!("  vote                Vote on a proposal");
    println!("  translate           Print a link that opens a page in the resident's language");
    println!("  session             Inspect or update the resident session");
}

fn resolve_session_file(session_file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    // Check flag first, then environment variable, then default
    if let Some(path) = session_file {
        Ok(path)
    } else if let Ok(path) = std::env::var(SESSION_ENV) {
        Ok(PathBuf::from(path))
    } else {
        default_session_file().map_err(|e| anyhow::anyhow!("{}", e))
    }
}

fn build_config(args: &Args, session_file: PathBuf) -> anyhow::Result<Config> {
    let mut builder = ConfigBuilder::new(session_file);

    let data = args
        .data
        .clone()
        .or_else(|| std::env::var(DATA_ENV).ok().map(PathBuf::from));
    if let Some(data) = data {
        builder = builder.data_file(data);
    }

    if let Ok(policy) = std::env::var(COUNT_POLICY_ENV) {
        builder = builder.count_policy_str(&policy);
    }
    if args.reject_negative {
        builder = builder.count_policy(CountPolicy::Reject);
    }

    Ok(builder.build()?)
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    match config.data_file {
        Some(ref path) => Ok(Catalog::load(path, config.count_policy)?),
        None => Ok(Catalog::builtin()),
    }
}

fn run_breakdown_command(config: &Config, cmd: Command) -> anyhow::Result<()> {
    let Command::Breakdown {
        mode,
        entity,
        dimension,
        format,
    } = cmd
    else {
        unreachable!()
    };

    let dimension: Dimension = dimension.parse()?;
    let kind = EntityKind::from(mode.as_str());
    let catalog = load_catalog(config)?;

    let view = BreakdownView::build(kind, catalog.entities(kind), entity.as_deref(), dimension);

    if format == "text" {
        print!("{}", render_text(&view, config.bar_width));
    } else {
        println!("{}", serde_json::to_string(&view)?);
    }
    Ok(())
}

fn run_profile_command(config: &Config, entity: Option<String>) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    let project = match entity {
        Some(ref id) => catalog
            .projects
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| Error::EntityNotFound(id.clone()))?,
        None => catalog
            .projects
            .first()
            .ok_or_else(|| Error::EntityNotFound("(no projects)".to_string()))?,
    };

    let profile = project.dominant_profile();
    let output = serde_json::json!({
        "entity_id": project.id,
        "title": project.title,
        "profile": profile,
        "action_plan": select_action_plan(&profile),
    });
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn run_action_plans_command(config: &Config) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    for entry in ActionPlanEntry::for_rows(&catalog.participation) {
        println!("{}", serde_json::to_string(&entry)?);
    }
    Ok(())
}

async fn run_structure_command(text: String, plain: bool, timeout_ms: u64) -> anyhow::Result<()> {
    let idea = if plain {
        if text.trim().is_empty() {
            return Err(Error::Validation("Please enter your idea first".to_string()).into());
        }
        StructuredIdea::from_free_text(&text)
    } else {
        let structurer = MockStructurer::default();
        structure_idea(&structurer, &text, Duration::from_millis(timeout_ms)).await?
    };
    println!("{}", serde_json::to_string_pretty(&idea)?);
    Ok(())
}

fn run_councils_command(query: &str) -> anyhow::Result<()> {
    let matches = search_councils(query);
    if matches.is_empty() {
        eprintln!("No councils found");
    }
    for council in matches {
        println!("{}", serde_json::to_string(council)?);
    }
    Ok(())
}

fn run_preference_options_command() -> anyhow::Result<()> {
    for category in PREFERENCE_CATALOGUE {
        println!("{}", serde_json::to_string(category)?);
    }
    Ok(())
}

fn run_proposals_command(config: &Config) -> anyhow::Result<()> {
    let mut catalog = load_catalog(config)?;
    let state = SessionStore::new(config.session_file.clone()).load()?;
    state.apply_votes(&mut catalog.proposals)?;

    for proposal in &catalog.proposals {
        println!("{}", serde_json::to_string(&ProposalSummary::from(proposal))?);
    }
    Ok(())
}

fn run_vote_command(config: &Config, proposal_id: &str, choice: &str) -> anyhow::Result<()> {
    let choice: VoteChoice = choice.parse()?;
    let mut catalog = load_catalog(config)?;
    let store = SessionStore::new(config.session_file.clone());
    let mut state = store.load()?;
    state.apply_votes(&mut catalog.proposals)?;

    let proposal = catalog.proposal_mut(proposal_id)?;
    state.cast_vote(proposal, choice)?;
    store.save(&state)?;

    println!("{}", serde_json::to_string(&ProposalSummary::from(&*proposal))?);
    Ok(())
}

fn run_translate_command(config: &Config, url: &str, lang: Option<String>) -> anyhow::Result<()> {
    let language = match lang {
        Some(code) => find_language(&code)?,
        None => SessionStore::new(config.session_file.clone()).load()?.language(),
    };

    match language.translate_url(url)? {
        Some(link) => println!("{}", link),
        None => println!("{}", url),
    }
    Ok(())
}

fn run_session_command(config: &Config, action: SessionAction) -> anyhow::Result<()> {
    let store = SessionStore::new(config.session_file.clone());
    let mut state = store.load()?;

    match action {
        SessionAction::Show => {}
        SessionAction::SignIn { email } => match email {
            Some(email) => state.sign_in_with_email(&email)?,
            None => state.sign_in_with_mygov(),
        },
        SessionAction::Council { name } => state.select_council(&name)?,
        SessionAction::Language { code } => {
            state.set_language(&code)?;
        }
        SessionAction::Preferences { preferences } => state.set_preferences(preferences)?,
        SessionAction::SignOut => {
            state.sign_out();
            // only the page language outlives a sign-out
            if state == SessionState::default() {
                store.clear()?;
            } else {
                store.save(&state)?;
            }
            println!("{}", serde_json::to_string(&state)?);
            return Ok(());
        }
    }

    store.save(&state)?;
    println!("{}", serde_json::to_string(&state)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let session_file = match args.command {
        Some(Command::Session {
            ref session_file, ..
        }) => resolve_session_file(session_file.clone())?,
        _ => resolve_session_file(None).unwrap_or_else(|_| PathBuf::from("session.json")),
    };
    let config = build_config(&args, session_file)?;

    match args.command {
        Some(cmd @ Command::Breakdown { .. }) => run_breakdown_command(&config, cmd),
        Some(Command::Profile { entity }) => run_profile_command(&config, entity),
        Some(Command::ActionPlans) => run_action_plans_command(&config),
        Some(Command::Structure {
            text,
            plain,
            timeout_ms,
        }) => run_structure_command(text, plain, timeout_ms).await,
        Some(Command::Councils { query }) => run_councils_command(&query),
        Some(Command::PreferenceOptions) => run_preference_options_command(),
        Some(Command::Proposals) => run_proposals_command(&config),
        Some(Command::Vote { proposal, choice }) => run_vote_command(&config, &proposal, &choice),
        Some(Command::Translate { url, lang }) => run_translate_command(&config, &url, lang),
        Some(Command::Session { action, .. }) => run_session_command(&config, action),
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
