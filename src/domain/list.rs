//! Ordered task list
//!
//! Positions shown to users are 1-based and shift when a task before them is
//! deleted. Every operation that takes an index validates it and reports
//! [`ListError::IndexOutOfRange`], so callers never pre-check.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::task::{Task, TaskError, TaskPriority};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("Invalid task number {index}. There are {len} task(s) in the list.")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("There are no tasks to {0}.")]
    EmptyStore(&'static str),

    #[error("No sorting criterion given. Try one of: {names}.", names = SortCriterion::names())]
    NoCriterion,

    #[error("Cannot sort by '{0}'. Try one of: {names}.", names = SortCriterion::names())]
    UnsupportedCriterion(String),

    #[error(transparent)]
    Task(#[from] TaskError),
}

/// A named key accepted by `sort`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    /// Highest priority first, tasks without priority last
    Priority,
    /// Earliest date first, undated tasks last
    Date,
    /// Alphabetical by description, ignoring case
    Description,
    /// Todos, then deadlines, then events
    Type,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 4] = [
        SortCriterion::Priority,
        SortCriterion::Date,
        SortCriterion::Description,
        SortCriterion::Type,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortCriterion::Priority => "priority",
            SortCriterion::Date => "date",
            SortCriterion::Description => "description",
            SortCriterion::Type => "type",
        }
    }

    fn names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortCriterion::Priority => b.priority().cmp(&a.priority()),
            SortCriterion::Date => match (a.date(), b.date()) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortCriterion::Description => a
                .description()
                .to_lowercase()
                .cmp(&b.description().to_lowercase()),
            SortCriterion::Type => a.kind().cmp(&b.kind()),
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortCriterion {
    type Err = ListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ListError::NoCriterion);
        }

        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ListError::UnsupportedCriterion(name.to_string()))
    }
}

/// The in-memory task list of a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Iterates with 1-based positions
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().map(|(i, task)| (i + 1, task))
    }

    /// Appends a task and returns the new length
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    pub fn get(&self, index: usize) -> Result<&Task, ListError> {
        let slot = self.slot(index)?;
        Ok(&self.tasks[slot])
    }

    /// Replaces the task at `index`, returning the previous one
    pub fn replace(&mut self, index: usize, task: Task) -> Result<Task, ListError> {
        let slot = self.slot(index)?;
        Ok(std::mem::replace(&mut self.tasks[slot], task))
    }

    /// Removes the task at `index`; later tasks move up by one
    pub fn delete(&mut self, index: usize) -> Result<Task, ListError> {
        let slot = self.slot(index)?;
        Ok(self.tasks.remove(slot))
    }

    /// Replaces the task at `index` with a done copy
    ///
    /// This sets the flag rather than flipping it, so marking a finished task
    /// again leaves it done. [`TaskList::mark_undone`] clears it.
    pub fn mark_done(&mut self, index: usize) -> Result<&Task, ListError> {
        self.update(index, |task| Ok(task.with_done(true)))
    }

    pub fn mark_undone(&mut self, index: usize) -> Result<&Task, ListError> {
        self.update(index, |task| Ok(task.with_done(false)))
    }

    pub fn edit(&mut self, index: usize, description: &str) -> Result<&Task, ListError> {
        self.update(index, |task| task.with_description(description))
    }

    pub fn set_priority(
        &mut self,
        index: usize,
        priority: TaskPriority,
    ) -> Result<&Task, ListError> {
        self.update(index, |task| Ok(task.with_priority(priority)))
    }

    /// Removes every task, returning how many were removed
    pub fn clear(&mut self) -> Result<usize, ListError> {
        if self.tasks.is_empty() {
            return Err(ListError::EmptyStore("clear"));
        }
        let count = self.tasks.len();
        self.tasks.clear();
        Ok(count)
    }

    /// Finds tasks whose display text contains `keyword`, ignoring case
    pub fn search(&self, keyword: &str) -> Vec<(usize, &Task)> {
        let needle = keyword.to_lowercase();
        self.numbered()
            .filter(|(_, task)| task.display().to_lowercase().contains(&needle))
            .collect()
    }

    /// Sorts by a criterion name; ties keep their current order
    ///
    /// A blank name fails first, then an empty list, then an unknown name.
    pub fn sort(&mut self, criterion: &str) -> Result<SortCriterion, ListError> {
        if criterion.trim().is_empty() {
            return Err(ListError::NoCriterion);
        }
        if self.tasks.is_empty() {
            return Err(ListError::EmptyStore("sort"));
        }
        let criterion: SortCriterion = criterion.parse()?;
        self.sort_by(criterion);
        Ok(criterion)
    }

    pub fn sort_by(&mut self, criterion: SortCriterion) {
        // Vec::sort_by is stable
        self.tasks.sort_by(|a, b| criterion.compare(a, b));
    }

    fn slot(&self, index: usize) -> Result<usize, ListError> {
        if index == 0 || index > self.tasks.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }

    fn update<F>(&mut self, index: usize, change: F) -> Result<&Task, ListError>
    where
        F: FnOnce(&Task) -> Result<Task, TaskError>,
    {
        let slot = self.slot(index)?;
        let updated = change(&self.tasks[slot])?;
        self.tasks[slot] = updated;
        Ok(&self.tasks[slot])
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(description: &str) -> Task {
        Task::todo(description).unwrap()
    }

    fn list_of(descriptions: &[&str]) -> TaskList {
        descriptions.iter().map(|d| todo(d)).collect::<Vec<_>>().into()
    }

    fn descriptions(list: &TaskList) -> Vec<&str> {
        list.iter().map(|t| t.description()).collect()
    }

    #[test]
    fn add_appends_in_order() {
        let mut list = TaskList::new();
        assert_eq!(list.add(todo("one")), 1);
        assert_eq!(list.add(todo("two")), 2);
        assert_eq!(descriptions(&list), ["one", "two"]);
        assert_eq!(list.get(2).unwrap().description(), "two");
    }

    #[test]
    fn index_out_of_range() {
        let mut list = list_of(&["one"]);
        assert_eq!(
            list.get(0).unwrap_err(),
            ListError::IndexOutOfRange { index: 0, len: 1 }
        );
        assert_eq!(
            list.delete(2).unwrap_err(),
            ListError::IndexOutOfRange { index: 2, len: 1 }
        );
        assert!(list.mark_done(5).is_err());
        assert!(list.replace(9, todo("x")).is_err());
    }

    #[test]
    fn delete_shifts_following_tasks() {
        let mut list = list_of(&["one", "two", "three"]);
        let removed = list.delete(2).unwrap();
        assert_eq!(removed.description(), "two");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(2).unwrap().description(), "three");
    }

    #[test]
    fn mark_done_and_undone_replace_task() {
        let mut list = list_of(&["one"]);
        assert!(list.mark_done(1).unwrap().is_done());
        assert!(list.get(1).unwrap().is_done());
        assert!(list.mark_done(1).unwrap().is_done());
        assert!(!list.mark_undone(1).unwrap().is_done());
    }

    #[test]
    fn replace_returns_previous() {
        let mut list = list_of(&["one"]);
        let old = list.replace(1, todo("uno")).unwrap();
        assert_eq!(old.description(), "one");
        assert_eq!(descriptions(&list), ["uno"]);
    }

    #[test]
    fn edit_keeps_other_fields() {
        let mut list = TaskList::new();
        list.add(
            Task::deadline("pay rent /by 2024-02-01")
                .unwrap()
                .with_done(true),
        );
        let edited = list.edit(1, "pay the rent").unwrap();
        assert_eq!(edited.description(), "pay the rent");
        assert!(edited.is_done());
        assert_eq!(edited.date().unwrap().to_string(), "2024-02-01");

        assert!(matches!(
            list.edit(1, "  "),
            Err(ListError::Task(TaskError::EmptyDescription(_)))
        ));
    }

    #[test]
    fn clear_requires_tasks() {
        let mut list = list_of(&["one", "two"]);
        assert_eq!(list.clear(), Ok(2));
        assert!(list.is_empty());
        assert_eq!(list.clear(), Err(ListError::EmptyStore("clear")));
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let list = list_of(&["Read Book", "write code", "return BOOK"]);
        let hits = list.search("book");
        let found: Vec<_> = hits.iter().map(|(i, t)| (*i, t.description())).collect();
        assert_eq!(found, [(1, "Read Book"), (3, "return BOOK")]);

        assert!(list.search("garden").is_empty());
    }

    #[test]
    fn search_keeps_inner_whitespace() {
        let list = list_of(&["read  book", "read book"]);
        let hits = list.search("read book");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 2);
    }

    #[test]
    fn search_matches_display_text() {
        let mut list = TaskList::new();
        list.add(Task::deadline("return book /by 2024-01-01").unwrap());
        list.add(todo("read"));
        assert_eq!(list.search("2024-01").len(), 1);
        assert_eq!(list.search("[t]").len(), 1);
    }

    #[test]
    fn sort_by_priority_is_stable() {
        let mut list = TaskList::new();
        list.add(todo("a"));
        list.add(todo("b").with_priority(TaskPriority::High));
        list.add(todo("c"));
        list.add(todo("d").with_priority(TaskPriority::Low));
        list.add(todo("e").with_priority(TaskPriority::High));

        assert_eq!(list.sort("priority"), Ok(SortCriterion::Priority));
        assert_eq!(descriptions(&list), ["b", "e", "d", "a", "c"]);
    }

    #[test]
    fn sort_by_date_puts_undated_last() {
        let mut list = TaskList::new();
        list.add(todo("undated"));
        list.add(Task::event("late /at 2024-03-01").unwrap());
        list.add(Task::deadline("early /by 2024-01-01").unwrap());

        list.sort("DATE").unwrap();
        assert_eq!(descriptions(&list), ["early", "late", "undated"]);
    }

    #[test]
    fn sort_by_description_and_type() {
        let mut list = TaskList::new();
        list.add(Task::event("b event /at 2024-01-01").unwrap());
        list.add(todo("C todo"));
        list.add(todo("a todo"));

        list.sort("description").unwrap();
        assert_eq!(descriptions(&list), ["a todo", "b event", "C todo"]);

        list.sort("type").unwrap();
        assert_eq!(descriptions(&list), ["a todo", "C todo", "b event"]);
    }

    #[test]
    fn sort_errors() {
        let mut empty = TaskList::new();
        assert_eq!(empty.sort(""), Err(ListError::NoCriterion));
        assert_eq!(empty.sort("  "), Err(ListError::NoCriterion));
        assert_eq!(empty.sort("priority"), Err(ListError::EmptyStore("sort")));
        assert_eq!(empty.sort("colour"), Err(ListError::EmptyStore("sort")));

        let mut list = list_of(&["one"]);
        assert_eq!(
            list.sort("colour"),
            Err(ListError::UnsupportedCriterion("colour".to_string()))
        );
    }

    #[test]
    fn sort_error_messages_list_criteria() {
        assert_eq!(
            ListError::UnsupportedCriterion("colour".to_string()).to_string(),
            "Cannot sort by 'colour'. Try one of: priority, date, description, type."
        );
        assert_eq!(
            ListError::NoCriterion.to_string(),
            "No sorting criterion given. Try one of: priority, date, description, type."
        );
    }
}
