pub mod parser;
pub mod prompts;
pub mod scoring;
pub mod trend;
pub mod generator;

pub use parser::{extract_section, parse_report};
pub use prompts::PromptLoader;
pub use scoring::{score_project, HybridScore, SCORING_VERSION};
pub use trend::{compute_trend, trend_for, ScoreTrend};
pub use generator::{generate_analysis, GeneratedAnalysis};
