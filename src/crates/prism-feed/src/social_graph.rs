//! A minimal social graph backing in-network classification for the
//! X-algorithm ranker.

use std::collections::{HashMap, HashSet};

/// Follow relationships between agents, built once from each agent's
/// `following` set and indexed both forward and in reverse.
pub struct SocialGraph {
    following: HashMap<String, HashSet<String>>,
    followers: HashMap<String, HashSet<String>>,
}

impl SocialGraph {
    pub fn new<'a, I>(agents: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a HashSet<String>)>,
    {
        let mut following = HashMap::new();
        let mut followers: HashMap<String, HashSet<String>> = HashMap::new();

        for (agent_id, follows) in agents {
            for followee in follows {
                followers
                    .entry(followee.clone())
                    .or_default()
                    .insert(agent_id.to_string());
            }
            following.insert(agent_id.to_string(), follows.clone());
        }

        Self {
            following,
            followers,
        }
    }

    pub fn get_following(&self, agent_id: &str) -> HashSet<String> {
        self.following.get(agent_id).cloned().unwrap_or_default()
    }

    pub fn is_following(&self, follower_id: &str, followee_id: &str) -> bool {
        self.following
            .get(follower_id)
            .map(|f| f.contains(followee_id))
            .unwrap_or(false)
    }

    pub fn get_followers(&self, agent_id: &str) -> HashSet<String> {
        self.followers.get(agent_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_forward_and_reverse_index() {
        let mut a_follows = HashSet::new();
        a_follows.insert("b".to_string());
        let b_follows = HashSet::new();
        let agents = vec![("a", &a_follows), ("b", &b_follows)];
        let graph = SocialGraph::new(agents);

        assert!(graph.is_following("a", "b"));
        assert!(!graph.is_following("b", "a"));
        assert!(graph.get_followers("b").contains("a"));
        assert!(graph.get_following("c").is_empty());
    }
}
