//! Client-side search over the fetched tasks and users.
//!
//! Matching is a case-insensitive substring test against task titles and user
//! names. Tasks are listed before users, each in server order. Highlight
//! ranges are character (not byte) indices into the result label.

use crate::domain::{Task, User};

const TASK_PREFIX: &str = "Task: ";
const USER_PREFIX: &str = "User: ";

/// What a search result points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Task(i64),
    User(i64),
}

/// One entry of the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub target: SearchTarget,
    /// `Task: <title>` or `User: <name>`.
    pub label: String,
    /// Matched character ranges within `label`, end exclusive.
    pub ranges: Vec<(usize, usize)>,
}

/// Runs `query` over both collections.
///
/// An empty query yields no hits.
#[must_use]
pub fn search(query: &str, tasks: &[Task], users: &[User]) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }

    let task_hits = tasks.iter().filter_map(|task| {
        hit(
            SearchTarget::Task(task.id),
            TASK_PREFIX,
            &task.title,
            query,
        )
    });
    let user_hits = users
        .iter()
        .filter_map(|user| hit(SearchTarget::User(user.id), USER_PREFIX, &user.name, query));

    task_hits.chain(user_hits).collect()
}

fn hit(target: SearchTarget, prefix: &str, text: &str, query: &str) -> Option<SearchHit> {
    let ranges = match_ranges(text, query);
    if ranges.is_empty() {
        return None;
    }

    let offset = prefix.chars().count();
    Some(SearchHit {
        target,
        label: format!("{prefix}{text}"),
        ranges: ranges
            .into_iter()
            .map(|(start, end)| (start + offset, end + offset))
            .collect(),
    })
}

/// Lowercases `text` as a whole and records, for every lowered char, the
/// index of the source char it came from. Some chars lowercase to several
/// (`İ` becomes `i̇`), so the two sequences can differ in length.
fn fold(text: &str) -> (Vec<char>, Vec<usize>) {
    let lowered: Vec<char> = text.to_lowercase().chars().collect();
    let origin: Vec<usize> = text
        .chars()
        .enumerate()
        .flat_map(|(i, c)| std::iter::repeat(i).take(c.to_lowercase().count()))
        .collect();
    debug_assert_eq!(lowered.len(), origin.len());
    (lowered, origin)
}

/// Non-overlapping, case-insensitive occurrences of `query` in `text`, as
/// character ranges of `text`.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let (haystack, origin) = fold(text);
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;

    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            let end = start + needle.len();
            let (from, to) = (origin[start], origin[end - 1] + 1);
            // Two matches can split one source char; join them.
            match ranges.last_mut() {
                Some(last) if from < last.1 => last.1 = to,
                _ => ranges.push((from, to)),
            }
            start = end;
        } else {
            start += 1;
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, TaskStatus};

    fn task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: Priority::Low,
            due_date: None,
            assigned_to: None,
        }
    }

    #[test]
    fn finds_task_by_title_case_insensitively() {
        let tasks = vec![task(1, "Design API"), task(2, "Write docs")];

        let hits = search("design", &tasks, &[]);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, SearchTarget::Task(1));
        assert_eq!(hits[0].label, "Task: Design API");
        assert_eq!(hits[0].ranges, vec![(6, 12)]);
    }

    #[test]
    fn users_follow_tasks() {
        let tasks = vec![task(1, "Call Ada")];
        let users = vec![User {
            id: 4,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }];

        let targets: Vec<_> = search("ada", &tasks, &users)
            .into_iter()
            .map(|h| h.target)
            .collect();

        assert_eq!(targets, vec![SearchTarget::Task(1), SearchTarget::User(4)]);
    }

    #[test]
    fn empty_query_has_no_hits() {
        assert!(search("", &[task(1, "Anything")], &[]).is_empty());
    }

    #[test]
    fn ranges_do_not_overlap() {
        assert_eq!(match_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert_eq!(match_ranges("Ünïcode ünï", "ÜNÏ"), vec![(0, 3), (8, 11)]);
        assert!(match_ranges("short", "longer query").is_empty());
    }

    #[test]
    fn multi_char_lowercase_maps_back_to_source_chars() {
        // `İ` lowercases to `i` plus a combining dot above.
        let tasks = vec![task(1, "İstanbul trip")];

        let hits = search("i\u{307}st", &tasks, &[]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].ranges, vec![(6, 9)]);

        assert!(search("ist", &tasks, &[]).is_empty());
        assert_eq!(match_ranges("TRIP İ", "\u{307}"), vec![(5, 6)]);
    }
}
