//! The fixed ten-competency registry.
//!
//! Competency keys, display names, and the five-level rubric text are static
//! for the process lifetime. The enum declaration order is the canonical
//! enumeration order used as the tiebreak everywhere rankings can tie.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One of the ten fixed skill dimensions rated 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompetencyKey {
    DataAnalysis,
    ProblemSolving,
    TechKnowledge,
    LearnSpeed,
    Creativity,
    Planning,
    Communication,
    Support,
    Management,
    Strategy,
}

impl CompetencyKey {
    /// All keys in canonical enumeration order.
    pub const ALL: [CompetencyKey; 10] = [
        CompetencyKey::DataAnalysis,
        CompetencyKey::ProblemSolving,
        CompetencyKey::TechKnowledge,
        CompetencyKey::LearnSpeed,
        CompetencyKey::Creativity,
        CompetencyKey::Planning,
        CompetencyKey::Communication,
        CompetencyKey::Support,
        CompetencyKey::Management,
        CompetencyKey::Strategy,
    ];

    /// The five competencies averaged into the "technical" composite axis.
    pub const TECHNICAL: [CompetencyKey; 5] = [
        CompetencyKey::DataAnalysis,
        CompetencyKey::ProblemSolving,
        CompetencyKey::TechKnowledge,
        CompetencyKey::LearnSpeed,
        CompetencyKey::Creativity,
    ];

    /// The five competencies averaged into the "human" composite axis.
    pub const HUMAN: [CompetencyKey; 5] = [
        CompetencyKey::Planning,
        CompetencyKey::Communication,
        CompetencyKey::Support,
        CompetencyKey::Management,
        CompetencyKey::Strategy,
    ];

    /// Fixed English display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            CompetencyKey::DataAnalysis => "Data Analysis",
            CompetencyKey::ProblemSolving => "Problem Solving",
            CompetencyKey::TechKnowledge => "Technical Knowledge",
            CompetencyKey::LearnSpeed => "Learning Speed",
            CompetencyKey::Creativity => "Creativity",
            CompetencyKey::Planning => "Planning",
            CompetencyKey::Communication => "Communication",
            CompetencyKey::Support => "Support",
            CompetencyKey::Management => "Management",
            CompetencyKey::Strategy => "Strategy",
        }
    }
}

impl fmt::Display for CompetencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            CompetencyKey::DataAnalysis => "dataAnalysis",
            CompetencyKey::ProblemSolving => "problemSolving",
            CompetencyKey::TechKnowledge => "techKnowledge",
            CompetencyKey::LearnSpeed => "learnSpeed",
            CompetencyKey::Creativity => "creativity",
            CompetencyKey::Planning => "planning",
            CompetencyKey::Communication => "communication",
            CompetencyKey::Support => "support",
            CompetencyKey::Management => "management",
            CompetencyKey::Strategy => "strategy",
        };
        write!(f, "{key}")
    }
}

impl FromStr for CompetencyKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dataAnalysis" | "data-analysis" => Ok(CompetencyKey::DataAnalysis),
            "problemSolving" | "problem-solving" => Ok(CompetencyKey::ProblemSolving),
            "techKnowledge" | "tech-knowledge" => Ok(CompetencyKey::TechKnowledge),
            "learnSpeed" | "learn-speed" => Ok(CompetencyKey::LearnSpeed),
            "creativity" => Ok(CompetencyKey::Creativity),
            "planning" => Ok(CompetencyKey::Planning),
            "communication" => Ok(CompetencyKey::Communication),
            "support" => Ok(CompetencyKey::Support),
            "management" => Ok(CompetencyKey::Management),
            "strategy" => Ok(CompetencyKey::Strategy),
            other => Err(format!("unknown competency: {other}")),
        }
    }
}

/// Rubric description for a competency at a given level.
///
/// Levels run 1 (lowest) through 5 (highest); anything else is `NotFound`.
pub fn rubric(key: CompetencyKey, level: u8) -> CoreResult<&'static str> {
    if !(1..=5).contains(&level) {
        return Err(CoreError::NotFound(format!(
            "rubric level {level} for {key} (levels run 1-5)"
        )));
    }
    let levels: [&'static str; 5] = match key {
        CompetencyKey::DataAnalysis => [
            "Reads prepared dashboards with guidance",
            "Pulls and filters data to answer direct questions",
            "Builds own analyses and spots anomalies unprompted",
            "Designs metrics and draws decisions from ambiguous data",
            "Sets the analytical approach others across teams adopt",
        ],
        CompetencyKey::ProblemSolving => [
            "Resolves routine issues with a known playbook",
            "Breaks familiar problems into workable steps",
            "Structures unfamiliar problems and weighs options",
            "Untangles cross-cutting problems under constraints",
            "Reframes problems so whole classes of them disappear",
        ],
        CompetencyKey::TechKnowledge => [
            "Knows the basics of the team's tools",
            "Works independently within the core stack",
            "Deep in one area, conversant across the stack",
            "Recognized reference for several technical areas",
            "Shapes technical direction beyond the team",
        ],
        CompetencyKey::LearnSpeed => [
            "Picks up new material with structured support",
            "Learns new tools from documentation alone",
            "Ramps quickly and shares what was learned",
            "Absorbs unfamiliar domains ahead of project need",
            "Learns fast enough to lead in brand-new territory",
        ],
        CompetencyKey::Creativity => [
            "Applies existing patterns as given",
            "Adapts known approaches to new situations",
            "Proposes original options beyond the obvious ones",
            "Regularly lands novel approaches that ship",
            "Produces ideas that redefine what the team attempts",
        ],
        CompetencyKey::Planning => [
            "Follows plans prepared by others",
            "Plans own work to reliable estimates",
            "Plans multi-person work with realistic buffers",
            "Plans across projects, re-sequencing as facts change",
            "Builds planning practices the organization relies on",
        ],
        CompetencyKey::Communication => [
            "Shares status when asked",
            "Reports clearly and raises blockers early",
            "Tailors the message to the audience",
            "Aligns disagreeing parties to a shared picture",
            "Communication that moves the whole organization",
        ],
        CompetencyKey::Support => [
            "Helps teammates when directly asked",
            "Notices struggling teammates and offers help",
            "Actively unblocks others ahead of own convenience",
            "Grows others through deliberate coaching",
            "Builds support structures that outlast any one person",
        ],
        CompetencyKey::Management => [
            "Manages own tasks with reminders",
            "Tracks own commitments dependably",
            "Coordinates a small group to a deadline",
            "Runs projects spanning teams and stakeholders",
            "Builds and steers organizations, not just projects",
        ],
        CompetencyKey::Strategy => [
            "Focuses on the task directly at hand",
            "Connects own work to the team's goals",
            "Weighs near-term work against long-term direction",
            "Sets direction others plan their quarters around",
            "Defines strategy at the organization level",
        ],
    };
    Ok(levels[(level - 1) as usize])
}
