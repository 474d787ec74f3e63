use crate::dashboard::records::{DomainRecord, TodoRecord};
use std::collections::{BTreeMap, HashMap};

/// Group key of todos not attached to a domain.
pub const GENERAL_TASKS_KEY: &str = "general";

/// High priority first, then newest first. Stable.
pub fn sort_todos(todos: &mut [TodoRecord]) {
    todos.sort_by(|a, b| {
        b.is_high_priority
            .cmp(&a.is_high_priority)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Open todos grouped by owning domain name, each group sorted.
///
/// Todos without a domain go under [`GENERAL_TASKS_KEY`]; todos pointing at
/// an unknown domain are dropped.
pub fn group_todos(todos: &[TodoRecord], domains: &[DomainRecord]) -> BTreeMap<String, Vec<TodoRecord>> {
    let names: HashMap<&str, &str> = domains
        .iter()
        .filter_map(|d| d.id.as_deref().map(|id| (id, d.domain_name.as_str())))
        .collect();

    let mut groups: BTreeMap<String, Vec<TodoRecord>> = BTreeMap::new();
    for todo in todos.iter().filter(|t| !t.completed) {
        let key = match todo.domain_id.as_deref() {
            None => GENERAL_TASKS_KEY,
            Some(id) => match names.get(id) {
                Some(name) => *name,
                None => continue,
            },
        };
        groups.entry(key.to_string()).or_default().push(todo.clone());
    }

    for group in groups.values_mut() {
        sort_todos(group);
    }
    groups
}

/// Non-empty group keys: groups with open high-priority todos first, then the
/// general group, then the rest in key order.
pub fn sorted_group_keys(groups: &BTreeMap<String, Vec<TodoRecord>>) -> Vec<String> {
    let has_priority = |key: &str| {
        groups
            .get(key)
            .is_some_and(|todos| todos.iter().any(|t| t.is_high_priority && !t.completed))
    };

    let mut keys: Vec<String> = groups
        .iter()
        .filter(|(_, todos)| !todos.is_empty())
        .map(|(key, _)| key.clone())
        .collect();
    keys.sort_by_key(|key| (!has_priority(key.as_str()), key.as_str() != GENERAL_TASKS_KEY));
    keys
}

/// Whether each domain (by id) has at least one open todo.
pub fn has_open_todos(todos: &[TodoRecord]) -> HashMap<String, bool> {
    let mut open: HashMap<String, bool> = HashMap::new();
    for todo in todos {
        if let Some(domain_id) = &todo.domain_id {
            let entry = open.entry(domain_id.clone()).or_insert(false);
            *entry |= !todo.completed;
        }
    }
    open
}
