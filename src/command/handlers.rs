//! Task command handlers
//!
//! Each handler takes the argument text after the keyword and returns the
//! reply shown to the user. Replies always end with a newline.

use std::fmt::Write;

use super::error::CommandError;
use super::input::{parse_index, split_first_word};
use crate::domain::{Task, TaskKind, TaskList, TaskPriority};

pub fn list(tasks: &mut TaskList, _args: &str) -> Result<String, CommandError> {
    if tasks.is_empty() {
        return Ok("Your task list is empty.\n".to_string());
    }

    let mut reply = String::from("Here are the tasks in your list:\n");
    push_numbered(&mut reply, tasks.numbered());
    Ok(reply)
}

pub fn add_todo(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    add(tasks, TaskKind::Todo, args)
}

pub fn add_deadline(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    add(tasks, TaskKind::Deadline, args)
}

pub fn add_event(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    add(tasks, TaskKind::Event, args)
}

fn add(tasks: &mut TaskList, kind: TaskKind, args: &str) -> Result<String, CommandError> {
    let task = Task::from_user_text(kind, args)?;
    let line = task.display();
    let count = tasks.add(task);

    Ok(format!(
        "Got it. I've added this {} task:\n  {}\n{}",
        kind,
        line,
        count_line(count)
    ))
}

pub fn edit(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    let (number, description) = split_first_word(args);
    if number.is_empty() {
        return Err(CommandError::MissingArgument("edit <task number> <new description>"));
    }

    let index = parse_index(number)?;
    let task = tasks.edit(index, description)?;
    Ok(format!("Updated task {}:\n  {}\n", index, task))
}

pub fn done(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    let index = parse_index(args)?;
    let task = tasks.mark_done(index)?;
    Ok(format!("Nice! I've marked this task as done:\n  {}\n", task))
}

pub fn undone(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    let index = parse_index(args)?;
    let task = tasks.mark_undone(index)?;
    Ok(format!("OK, I've marked this task as not done yet:\n  {}\n", task))
}

pub fn delete(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    let index = parse_index(args)?;
    let removed = tasks.delete(index)?;
    Ok(format!(
        "Noted. I've removed this task:\n  {}\n{}",
        removed,
        count_line(tasks.len())
    ))
}

pub fn priority(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    let (number, level) = split_first_word(args);
    if number.is_empty() || level.is_empty() {
        return Err(CommandError::MissingArgument(
            "priority <task number> <none|low|medium|high or 0-3>",
        ));
    }

    let index = parse_index(number)?;
    let priority: TaskPriority = level.parse()?;
    let task = tasks.set_priority(index, priority)?;
    Ok(format!(
        "Set the priority of task {} to {}:\n  {}\n",
        index, priority, task
    ))
}

pub fn find(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(CommandError::MissingKeyword);
    }

    let matches = tasks.search(args);
    if matches.is_empty() {
        return Ok(format!("No tasks match '{}'.\n", args));
    }

    let mut reply = String::from("Here are the matching tasks in your list:\n");
    push_numbered(&mut reply, matches);
    Ok(reply)
}

pub fn sort(tasks: &mut TaskList, args: &str) -> Result<String, CommandError> {
    let criterion = tasks.sort(args)?;

    let mut reply = format!("Sorted your list by {}:\n", criterion);
    push_numbered(&mut reply, tasks.numbered());
    Ok(reply)
}

pub fn clear_all(tasks: &mut TaskList, _args: &str) -> Result<String, CommandError> {
    let removed = tasks.clear()?;
    Ok(format!(
        "Removed all {} task(s). Your list is now empty.\n",
        removed
    ))
}

pub fn ping(_tasks: &mut TaskList, _args: &str) -> Result<String, CommandError> {
    Ok("pong\n".to_string())
}

pub fn motivate(tasks: &mut TaskList, _args: &str) -> Result<String, CommandError> {
    let open = tasks.iter().filter(|t| !t.is_done()).count();
    Ok(match open {
        0 => "Nothing left to do. Go enjoy the sunshine!\n".to_string(),
        1 => "Just one task to go. You can do it!\n".to_string(),
        n => format!("{} tasks to go. One at a time, you can do it!\n", n),
    })
}

pub fn shrug(_tasks: &mut TaskList, _args: &str) -> Result<String, CommandError> {
    Ok("¯\\_(ツ)_/¯\n".to_string())
}

fn count_line(count: usize) -> String {
    format!("Now you have {} task(s) in the list.\n", count)
}

fn push_numbered<'a>(reply: &mut String, tasks: impl IntoIterator<Item = (usize, &'a Task)>) {
    for (index, task) in tasks {
        // Writing to a String cannot fail
        let _ = writeln!(reply, "{}. {}", index, task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListError, TaskError};

    fn list_with(lines: &[&str]) -> TaskList {
        let mut tasks = TaskList::new();
        for line in lines {
            add_todo(&mut tasks, line).unwrap();
        }
        tasks
    }

    #[test]
    fn list_empty_and_filled() {
        let mut tasks = TaskList::new();
        assert_eq!(list(&mut tasks, "").unwrap(), "Your task list is empty.\n");

        let mut tasks = list_with(&["read book", "write essay"]);
        assert_eq!(
            list(&mut tasks, "").unwrap(),
            "Here are the tasks in your list:\n1. [T][ ] read book\n2. [T][ ] write essay\n"
        );
    }

    #[test]
    fn add_reports_task_and_count() {
        let mut tasks = TaskList::new();
        let reply = add_deadline(&mut tasks, "buy milk /by 2024-01-01").unwrap();
        assert_eq!(
            reply,
            "Got it. I've added this deadline task:\n  [D][ ] buy milk (by: 2024-01-01)\nNow you have 1 task(s) in the list.\n"
        );
    }

    #[test]
    fn add_errors_leave_list_unchanged() {
        let mut tasks = TaskList::new();
        assert!(matches!(
            add_deadline(&mut tasks, "buy milk"),
            Err(CommandError::Task(TaskError::MissingMarker { .. }))
        ));
        assert!(matches!(
            add_event(&mut tasks, "party /at next week"),
            Err(CommandError::Task(TaskError::BadDateFormat(_)))
        ));
        assert!(matches!(
            add_todo(&mut tasks, ""),
            Err(CommandError::Task(TaskError::EmptyDescription(TaskKind::Todo)))
        ));
        assert!(tasks.is_empty());
    }

    #[test]
    fn edit_validates_arguments() {
        let mut tasks = list_with(&["read book"]);

        assert!(edit(&mut tasks, "1 read two books").unwrap().contains("read two books"));
        assert!(matches!(
            edit(&mut tasks, "one more"),
            Err(CommandError::NotANumber(_))
        ));
        assert!(matches!(
            edit(&mut tasks, "4 text"),
            Err(CommandError::List(ListError::IndexOutOfRange { index: 4, len: 1 }))
        ));
        assert!(matches!(
            edit(&mut tasks, "1"),
            Err(CommandError::List(ListError::Task(TaskError::EmptyDescription(_))))
        ));
        assert!(matches!(edit(&mut tasks, ""), Err(CommandError::MissingArgument(_))));
    }

    #[test]
    fn done_undone_and_delete() {
        let mut tasks = list_with(&["one", "two"]);

        assert!(done(&mut tasks, "2").unwrap().contains("[T][X] two"));
        assert!(undone(&mut tasks, "2").unwrap().contains("[T][ ] two"));
        assert!(matches!(done(&mut tasks, "x"), Err(CommandError::NotANumber(_))));

        let reply = delete(&mut tasks, "1").unwrap();
        assert!(reply.contains("[T][ ] one"));
        assert!(reply.ends_with("Now you have 1 task(s) in the list.\n"));
        assert!(matches!(
            delete(&mut tasks, "2"),
            Err(CommandError::List(ListError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn priority_sets_level() {
        let mut tasks = list_with(&["one"]);
        let reply = priority(&mut tasks, "1 high").unwrap();
        assert!(reply.contains("to high"));
        assert_eq!(tasks.get(1).unwrap().priority(), TaskPriority::High);

        assert!(matches!(
            priority(&mut tasks, "1 urgent"),
            Err(CommandError::Task(TaskError::InvalidPriority(_)))
        ));
        assert!(matches!(priority(&mut tasks, "1"), Err(CommandError::MissingArgument(_))));
    }

    #[test]
    fn find_lists_matches_with_original_numbers() {
        let mut tasks = list_with(&["read book", "write code", "return Book"]);
        assert_eq!(
            find(&mut tasks, "BOOK").unwrap(),
            "Here are the matching tasks in your list:\n1. [T][ ] read book\n3. [T][ ] return Book\n"
        );
        assert_eq!(find(&mut tasks, "garden").unwrap(), "No tasks match 'garden'.\n");
        assert!(matches!(find(&mut tasks, ""), Err(CommandError::MissingKeyword)));
    }

    #[test]
    fn sort_and_clear() {
        let mut tasks = list_with(&["low", "high"]);
        priority(&mut tasks, "2 3").unwrap();

        let reply = sort(&mut tasks, "priority").unwrap();
        assert!(reply.starts_with("Sorted your list by priority:\n1. [T][ ] high {high}\n"));

        assert!(matches!(
            sort(&mut tasks, ""),
            Err(CommandError::List(ListError::NoCriterion))
        ));

        assert_eq!(
            clear_all(&mut tasks, "").unwrap(),
            "Removed all 2 task(s). Your list is now empty.\n"
        );
        assert!(matches!(
            clear_all(&mut tasks, ""),
            Err(CommandError::List(ListError::EmptyStore(_)))
        ));
        assert!(matches!(
            sort(&mut tasks, "priority"),
            Err(CommandError::List(ListError::EmptyStore(_)))
        ));
    }

    #[test]
    fn novelty_replies() {
        let mut tasks = list_with(&["one"]);
        assert_eq!(ping(&mut tasks, "").unwrap(), "pong\n");
        assert!(motivate(&mut tasks, "").unwrap().contains("one task"));
        assert!(shrug(&mut tasks, "").unwrap().ends_with('\n'));
    }
}
