//! Query helpers for analysing agent state distributions.

use crate::states::AgentState;
use std::collections::HashMap;

/// Count agents currently in `state`.
pub fn agents_in_state<'a, I>(state: AgentState, agents: I) -> usize
where
    I: IntoIterator<Item = &'a AgentState>,
{
    agents.into_iter().filter(|&&s| s == state).count()
}

/// Distribution of agents across all eight states. Every state is present
/// in the result, even with a zero count.
pub fn state_distribution<'a, I>(agents: I) -> HashMap<AgentState, usize>
where
    I: IntoIterator<Item = &'a AgentState>,
{
    let mut distribution: HashMap<AgentState, usize> =
        AgentState::ALL.into_iter().map(|s| (s, 0)).collect();
    for &state in agents {
        *distribution.entry(state).or_insert(0) += 1;
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_includes_zero_count_states() {
        let agents = vec![AgentState::Idle, AgentState::Idle];
        let dist = state_distribution(&agents);
        assert_eq!(dist.len(), 8);
        assert_eq!(dist[&AgentState::Idle], 2);
        assert_eq!(dist[&AgentState::Scrolling], 0);
    }

    #[test]
    fn distribution_sums_to_agent_count() {
        let agents = vec![
            AgentState::Idle,
            AgentState::Scrolling,
            AgentState::Scrolling,
        ];
        let dist = state_distribution(&agents);
        let total: usize = dist.values().sum();
        assert_eq!(total, agents.len());
    }
}
