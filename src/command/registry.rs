//! Command registry
//!
//! Maps command keywords to their handlers. Help text is read from the same
//! entries, so a command and its documentation cannot drift apart.

use std::collections::HashMap;

use super::error::CommandError;
use super::handlers;
use crate::domain::TaskList;

/// Runs a task command against the list with the argument text
pub type Handler = fn(&mut TaskList, &str) -> Result<String, CommandError>;

/// What the session does when a command is entered
#[derive(Clone, Copy)]
pub enum Action {
    /// Operate on the task list
    Task(Handler),
    /// Show help from the registry
    Help,
    /// Write the task file now
    Save,
    /// End the session
    Exit,
}

/// How a command is listed by `help`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Tasks,
    Session,
    /// Not listed, but `help <name>` still works
    Novelty,
}

/// A registered command
#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub summary: &'static str,
    /// Commands without arguments reject any trailing text
    pub takes_args: bool,
    /// Successful runs change the task list
    pub mutates: bool,
    pub group: Group,
    pub action: Action,
}

impl CommandSpec {
    /// Detailed help for this command
    pub fn help(&self) -> String {
        let mut text = format!("{}\nUsage: {}\n", self.summary, self.usage);
        if !self.aliases.is_empty() {
            text.push_str(&format!("Also: {}\n", self.aliases.join(", ")));
        }
        text
    }
}

/// Registry of available commands
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates a registry with every built-in command
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for spec in builtin_commands() {
            registry.register(spec);
        }
        registry
    }

    /// Adds a command; a later registration of the same name wins
    pub fn register(&mut self, spec: CommandSpec) {
        let position = self.commands.len();
        self.index.insert(spec.name, position);
        for alias in spec.aliases {
            self.index.insert(*alias, position);
        }
        self.commands.push(spec);
    }

    /// Looks up a command by name or alias
    pub fn lookup(&self, keyword: &str) -> Option<&CommandSpec> {
        self.index.get(keyword).map(|&i| &self.commands[i])
    }

    /// Iterates over registered commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    /// Help for one command, or an overview when `topic` is blank
    pub fn help(&self, topic: &str) -> Result<String, CommandError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Ok(self.overview());
        }

        self.lookup(topic)
            .map(CommandSpec::help)
            .ok_or_else(|| CommandError::UnknownHelpTopic(topic.to_string()))
    }

    fn overview(&self) -> String {
        let width = self
            .commands
            .iter()
            .filter(|c| c.group != Group::Novelty)
            .map(|c| c.usage.len())
            .max()
            .unwrap_or(0);

        let mut text = String::from("Here are the commands I understand:\n");
        for group in [Group::Tasks, Group::Session] {
            for spec in self.commands.iter().filter(|c| c.group == group) {
                text.push_str(&format!("  {:<width$}  {}\n", spec.usage, spec.summary));
            }
        }
        text.push_str("Type 'help <command>' for details.\n");
        text
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: "list",
            aliases: &["ls"],
            usage: "list",
            summary: "Lists all tasks with their numbers.",
            takes_args: false,
            mutates: false,
            group: Group::Tasks,
            action: Action::Task(handlers::list),
        },
        CommandSpec {
            name: "todo",
            aliases: &[],
            usage: "todo <description>",
            summary: "Adds a task without a date.",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::add_todo),
        },
        CommandSpec {
            name: "deadline",
            aliases: &[],
            usage: "deadline <description> /by <date>",
            summary: "Adds a task due by a date (YYYY-MM-DD or YYYY-MM-DDTHH:MM).",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::add_deadline),
        },
        CommandSpec {
            name: "event",
            aliases: &[],
            usage: "event <description> /at <date>",
            summary: "Adds a task happening at a date (YYYY-MM-DD or YYYY-MM-DDTHH:MM).",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::add_event),
        },
        CommandSpec {
            name: "edit",
            aliases: &[],
            usage: "edit <task number> <new description>",
            summary: "Changes the description of a task.",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::edit),
        },
        CommandSpec {
            name: "done",
            aliases: &["mark"],
            usage: "done <task number>",
            summary: "Marks a task as done.",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::done),
        },
        CommandSpec {
            name: "undone",
            aliases: &["unmark"],
            usage: "undone <task number>",
            summary: "Marks a task as not done.",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::undone),
        },
        CommandSpec {
            name: "delete",
            aliases: &["rm"],
            usage: "delete <task number>",
            summary: "Removes a task from the list.",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::delete),
        },
        CommandSpec {
            name: "priority",
            aliases: &[],
            usage: "priority <task number> <none|low|medium|high or 0-3>",
            summary: "Sets the priority of a task.",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::priority),
        },
        CommandSpec {
            name: "find",
            aliases: &["search"],
            usage: "find <keyword>",
            summary: "Lists tasks containing the keyword, ignoring case.",
            takes_args: true,
            mutates: false,
            group: Group::Tasks,
            action: Action::Task(handlers::find),
        },
        CommandSpec {
            name: "sort",
            aliases: &[],
            usage: "sort <priority|date|description|type>",
            summary: "Reorders the list. Tasks that tie keep their order.",
            takes_args: true,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::sort),
        },
        CommandSpec {
            name: "clear-all",
            aliases: &[],
            usage: "clear-all",
            summary: "Removes every task.",
            takes_args: false,
            mutates: true,
            group: Group::Tasks,
            action: Action::Task(handlers::clear_all),
        },
        CommandSpec {
            name: "help",
            aliases: &[],
            usage: "help [command]",
            summary: "Shows the commands, or details for one command.",
            takes_args: true,
            mutates: false,
            group: Group::Session,
            action: Action::Help,
        },
        CommandSpec {
            name: "save",
            aliases: &[],
            usage: "save",
            summary: "Writes the task file now.",
            takes_args: false,
            mutates: false,
            group: Group::Session,
            action: Action::Save,
        },
        CommandSpec {
            name: "bye",
            aliases: &["exit", "quit"],
            usage: "bye",
            summary: "Saves and ends the session.",
            takes_args: false,
            mutates: false,
            group: Group::Session,
            action: Action::Exit,
        },
        CommandSpec {
            name: "ping",
            aliases: &[],
            usage: "ping",
            summary: "Checks that I am listening.",
            takes_args: false,
            mutates: false,
            group: Group::Novelty,
            action: Action::Task(handlers::ping),
        },
        CommandSpec {
            name: "motivate",
            aliases: &[],
            usage: "motivate",
            summary: "Says something encouraging.",
            takes_args: false,
            mutates: false,
            group: Group::Novelty,
            action: Action::Task(handlers::motivate),
        },
        CommandSpec {
            name: "shrug",
            aliases: &[],
            usage: "shrug",
            summary: "Shrugs.",
            takes_args: false,
            mutates: false,
            group: Group::Novelty,
            action: Action::Task(handlers::shrug),
        },
    ]
}
