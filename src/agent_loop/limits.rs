use std::collections::HashMap;

const RUNNER_MAX_ITERATIONS_KEYS: [&str; 3] = [
    "runner.max_iterations",
    "agent_loop.max_iterations",
    "max_iterations",
];

/// Bounds applied to one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    /// Maximum model-to-tools round trips.
    pub max_iterations: usize,
}

impl RunLimits {
    /// Metadata overrides win over `default_max_iterations`; zero or
    /// unparsable values are ignored.
    pub fn from_metadata(metadata: &HashMap<String, String>, default_max_iterations: usize) -> Self {
        Self {
            max_iterations: parse_runner_limit(
                metadata,
                &RUNNER_MAX_ITERATIONS_KEYS,
                default_max_iterations,
            ),
        }
    }
}

fn parse_runner_limit(metadata: &HashMap<String, String>, keys: &[&str], default: usize) -> usize {
    keys.iter()
        .filter_map(|key| metadata.get(*key))
        .find_map(|value| parse_positive_usize(value))
        .unwrap_or(default)
}

fn parse_positive_usize(value: &str) -> Option<usize> {
    let parsed = value.trim().parse::<usize>().ok()?;
    if parsed == 0 {
        None
    } else {
        Some(parsed)
    }
}
