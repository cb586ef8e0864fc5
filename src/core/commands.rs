//! # Built-in Commands
//!
//! The dispatcher the binary attaches once booting is done. Commands act on
//! the shared [`Console`] only, so they work the same from any thread.
//!
//! | Command            | Effect                                   |
//! |--------------------|------------------------------------------|
//! | `help`             | list commands                            |
//! | `log [channel]`    | show the log view                        |
//! | `graph [channel]`  | show the graph view                      |
//! | `channels`         | list channels with logs or graphs        |
//! | `echo <text>`      | write text to the `main` log             |
//! | `quit`, `exit`     | leave the dashboard                      |

use std::sync::Arc;

use log::info;

use crate::core::command::{CommandDispatcher, CommandError};
use crate::core::console::Console;
use crate::core::log_store::EntryKind;

const HELP: &[(&str, &str)] = &[
    ("help", "list commands"),
    ("log [channel]", "show the log of a channel"),
    ("graph [channel]", "show the graph of a channel (ESC closes)"),
    ("channels", "list known channels"),
    ("echo <text>", "print text to the main log"),
    ("quit", "leave the dashboard"),
];

pub struct Builtins {
    console: Arc<Console>,
}

impl Builtins {
    pub fn new(console: Arc<Console>) -> Self {
        Self { console }
    }

    fn help(&self) {
        for (usage, summary) in HELP {
            self.console
                .write(EntryKind::Debug, &format!("{usage:<18}{summary}"));
        }
    }

    fn channels(&self) {
        let channels = self.console.channels();
        if channels.is_empty() {
            self.console.write(EntryKind::Message, "No channels yet.");
            return;
        }
        let list = channels.into_iter().collect::<Vec<_>>().join(", ");
        self.console.write(EntryKind::Success, &list);
    }
}

impl CommandDispatcher for Builtins {
    fn execute(&mut self, line: &str) -> Result<(), CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(());
        };
        let args: Vec<&str> = words.collect();

        match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("help", []) => self.help(),
            ("log", [] | [_]) => self.console.show_log(args.first().copied()),
            ("graph", [] | [_]) => self.console.show_graph(args.first().copied()),
            ("channels", []) => self.channels(),
            ("echo", _) => {
                let text = line.trim_start()[name.len()..].trim_start();
                self.console.write(EntryKind::Message, text);
            }
            ("quit" | "exit", []) => {
                info!("Quit requested from prompt");
                self.console.request_quit();
            }
            ("help" | "log" | "graph" | "channels" | "quit" | "exit", _) => {
                return Err(CommandError::bad(format!(
                    "Wrong number of arguments for '{name}'"
                )));
            }
            _ => {
                return Err(CommandError::bad(format!(
                    "Unknown command '{name}', try 'help'"
                )));
            }
        }
        Ok(())
    }
}
