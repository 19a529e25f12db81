use tracing::warn;

use super::model::Todo;

const SEED_JSON: &str = include_str!("seed.json");

/// Sample records a fresh in-memory store starts with.
pub fn seed_todos() -> Vec<Todo> {
    serde_json::from_str(SEED_JSON).unwrap_or_else(|e| {
        warn!(error = %e, "embedded seed data invalid; starting empty");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_the_two_samples() {
        let todos = seed_todos();
        let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["0j6c5eol", "welcome1"]);
        assert!(!todos[0].completed);
        assert!(todos[1].completed);
        assert!(todos[1].created_at < todos[1].updated_at);
    }
}
