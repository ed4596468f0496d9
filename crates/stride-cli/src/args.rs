//! Command-line argument definitions using clap's derive API.
//!
//! Each command has an argument struct carrying the clap attributes and a
//! `From` conversion into the matching core parameter type, so core params
//! stay free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! Commands whose parameters need context the arguments don't carry (the
//! player for imports and listings, a file to read for adaptations) are
//! converted in [`crate::cli`] instead.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use stride_core::params::{AddExercise, ClonePlan, CompleteSession, DeletePlan, Id};

/// Training plan tracker for players following multi-week programs
///
/// Stride imports multi-week training plans, finds the day to train next,
/// checks off sessions and days, and applies coaching adaptations. It can
/// also run as an MCP (Model Context Protocol) server for AI coaches.
#[derive(Parser)]
#[command(version, about, name = "stride")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stride/stride.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Player whose plans are imported and listed
    #[arg(long, global = true, env = "STRIDE_PLAYER", default_value = "default")]
    pub player: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Stride CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage training plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Record session results
    #[command(alias = "s")]
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Complete or skip whole days
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Manage the exercise library
    #[command(alias = "e")]
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Start the MCP server
    Serve,
}

/// Import a plan from a blueprint JSON file
#[derive(ClapArgs)]
pub struct ImportPlanArgs {
    /// Path to the blueprint JSON file
    pub file: PathBuf,
    /// Make the imported plan the player's active plan
    #[arg(short, long)]
    pub activate: bool,
}

/// List the player's plans
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Include inactive and completed plans
    #[arg(short, long, help = "Include inactive and completed plans")]
    pub all: bool,
}

/// Arguments for commands addressing a plan by ID
#[derive(ClapArgs)]
pub struct PlanIdArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Copy a plan with all progress reset
#[derive(ClapArgs)]
pub struct ClonePlanArgs {
    #[arg(help = "Unique identifier of the plan to copy")]
    pub id: u64,
    /// Name for the copy, defaults to "Copy of <name>"
    #[arg(short, long)]
    pub name: Option<String>,
}

impl From<ClonePlanArgs> for ClonePlan {
    fn from(val: ClonePlanArgs) -> Self {
        ClonePlan {
            id: val.id,
            name: val.name,
        }
    }
}

/// Delete a plan permanently
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    #[arg(help = "Unique identifier of the plan to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Apply a coaching adaptation to one week of a plan
///
/// The adaptation is a JSON object such as
/// `{"type":"modify_difficulty","day":2,"sessionIndex":0,"newDifficulty":3}`.
/// Prefix a path with `@` to read it from a file.
#[derive(ClapArgs)]
pub struct AdaptPlanArgs {
    #[arg(help = "Unique identifier of the plan to adapt")]
    pub id: u64,
    /// Week number the adaptation targets
    #[arg(short, long)]
    pub week: u32,
    /// Adaptation JSON, or @path to a file containing it
    pub adaptation: String,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Import a plan from a blueprint file
    #[command(alias = "i")]
    Import(ImportPlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with all weeks, days and sessions
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Show the day to train next
    #[command(alias = "c")]
    Current(PlanIdArgs),
    /// Make a plan the player's active plan
    Activate(PlanIdArgs),
    /// Copy a plan with progress reset
    Clone(ClonePlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Apply a coaching adaptation
    Adapt(AdaptPlanArgs),
}

/// Check off a session
#[derive(ClapArgs)]
pub struct CompleteSessionArgs {
    #[arg(help = "Unique identifier of the session")]
    pub id: u64,
    /// Minutes actually trained
    #[arg(short = 'd', long)]
    pub actual_duration: Option<u32>,
    /// Perceived intensity, 1 through 5
    #[arg(short = 'i', long)]
    pub actual_intensity: Option<u8>,
}

impl From<CompleteSessionArgs> for CompleteSession {
    fn from(val: CompleteSessionArgs) -> Self {
        CompleteSession {
            id: val.id,
            actual_duration: val.actual_duration,
            actual_intensity: val.actual_intensity,
        }
    }
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Check off a session
    #[command(alias = "c")]
    Complete(CompleteSessionArgs),
}

/// Arguments for commands addressing a day by ID
#[derive(ClapArgs)]
pub struct DayIdArgs {
    #[arg(help = "Unique identifier of the day")]
    pub id: u64,
}

impl From<DayIdArgs> for Id {
    fn from(val: DayIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum DayCommands {
    /// Mark a day completed without touching its sessions
    #[command(alias = "c")]
    Complete(DayIdArgs),
    /// Skip a day; its sessions leave the progress calculation
    Skip(DayIdArgs),
}

/// Add an exercise to the library
#[derive(ClapArgs)]
pub struct AddExerciseArgs {
    /// Exercise name, unique ignoring case
    pub name: String,
    /// Category: technical, physical, tactical or recovery
    #[arg(short, long)]
    pub category: Option<String>,
}

impl From<AddExerciseArgs> for AddExercise {
    fn from(val: AddExerciseArgs) -> Self {
        AddExercise {
            name: val.name,
            category: val.category,
        }
    }
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// Add an exercise to the library
    #[command(alias = "a")]
    Add(AddExerciseArgs),
    /// List the exercise library
    #[command(aliases = ["l", "ls"])]
    List,
}
