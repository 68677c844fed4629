//! Interactive shell over a [`PasswordStore`].

use crate::cli::{OutputFormat, ShellConfig};
use crate::security::PinGate;
use crate::service::{Insertion, PasswordStore};
use crate::sorting::SortAlgorithm;
use crate::utils::{self, encode_secret, success, warning};
use anyhow::{Context, Result};
use colored::*;
use dialoguer::Password;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Serialize;
use std::ops::ControlFlow;
use std::rc::Rc;
use zeroize::Zeroize;

/// Commands whose arguments carry secrets and are kept out of line history.
const SENSITIVE_COMMANDS: &[&str] = &["add", "reveal", "decrypt", "generate"];

#[derive(Serialize)]
struct EntryView<'a> {
    site: &'a str,
    secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    indexed: Option<bool>,
}

/// Interactive password store shell.
pub struct InteractiveStore {
    config: ShellConfig,
    store: PasswordStore,
    editor: DefaultEditor,
}

impl InteractiveStore {
    /// Create a new shell with an empty store.
    pub fn new(config: ShellConfig) -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to create line editor")?;

        Ok(Self {
            config,
            store: PasswordStore::new(),
            editor,
        })
    }

    /// Run the read-eval loop until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            let prompt = format!("{} ", "pwstore>".cyan());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let command = line.split_whitespace().next().unwrap_or_default();
                    if !SENSITIVE_COMMANDS.contains(&command) {
                        let _ = self.editor.add_history_entry(line);
                    }

                    match self.execute_command(line) {
                        Ok(ControlFlow::Break(())) => break,
                        Ok(ControlFlow::Continue(())) => {}
                        Err(e) => eprintln!("{} {}", "Error:".red(), e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("\nUse 'exit' to quit");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err).context("Failed to read command"),
            }
        }

        println!("Exiting password store...");
        Ok(())
    }

    /// Execute a single command line.
    pub fn execute_command(&mut self, input: &str) -> Result<ControlFlow<()>> {
        let parts = split_args(input, 4);
        let Some(&command) = parts.first() else {
            return Ok(ControlFlow::Continue(()));
        };

        match command {
            "help" | "?" => self.show_help(),
            "add" => match parts.as_slice() {
                [_, site, key, password] => self.add_entry(site, password, key)?,
                _ => eprintln!("Usage: add <site> <key> <password>"),
            },
            "generate" | "gen" => match parts.as_slice() {
                [_, site, key] => self.generate_entry(site, key)?,
                _ => eprintln!("Usage: generate <site> <key>"),
            },
            "reveal" | "decrypt" => match parts.as_slice() {
                [_, site, key] => self.reveal_entry(site, key)?,
                _ => eprintln!("Usage: reveal <site> <key>"),
            },
            "list" | "ls" => self.list_entries()?,
            "history" => self.show_history()?,
            "delete" | "rm" => match parts.as_slice() {
                [_, site] => self.delete_entry(site)?,
                _ => eprintln!("Usage: delete <site>"),
            },
            "undo" => self.undo()?,
            "sort" => match parts.as_slice() {
                [_, algorithm] => self.sort(algorithm)?,
                _ => eprintln!("Usage: sort <quick|merge>"),
            },
            "stats" => self.show_stats()?,
            "clear" => utils::clear_screen(),
            "exit" | "quit" => return Ok(ControlFlow::Break(())),
            _ => eprintln!("Unknown command: {command}. Type 'help' for available commands."),
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Show help message.
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold());
        help_line("help", "", "Show this help");
        help_line("add", "<site> <key> <password>", "Add a password");
        help_line("generate", "<site> <key>", "Generate and add a password");
        help_line("reveal", "<site> <key>", "Decrypt a password");
        help_line("list", "", "List entries by site");
        help_line("history", "", "List entries in insertion order");
        help_line("delete", "<site>", "Delete an entry (admin PIN)");
        help_line("undo", "", "Show the last affected entry");
        help_line("sort", "<quick|merge>", "Rebalance the index");
        help_line("stats", "", "Show store statistics");
        help_line("clear", "", "Clear screen");
        help_line("exit", "", "Exit");
        println!();
        println!("Keys are exactly 3 characters and obscure, not encrypt, the password.");
        println!();
    }

    /// Add a password under `site`.
    fn add_entry(&mut self, site: &str, password: &str, key: &str) -> Result<()> {
        match self.store.add(site, password, key)? {
            Insertion::Indexed => success(&format!("Added: {site}")),
            Insertion::Shadowed => warning(&format!(
                "{site} already exists; the new entry is kept in history but not searchable"
            )),
        }
        Ok(())
    }

    /// Generate a random password and add it under `site`.
    fn generate_entry(&mut self, site: &str, key: &str) -> Result<()> {
        let mut password =
            utils::generate_password(self.config.password_length, &mut rand::thread_rng());
        let outcome = self.add_entry(site, &password, key);

        if outcome.is_ok() {
            println!("{}: {}", "Generated Password".bold(), password);
        }
        password.zeroize();
        outcome
    }

    /// Decrypt and print the password stored under `site`.
    fn reveal_entry(&self, site: &str, key: &str) -> Result<()> {
        let mut plaintext = self.store.reveal(site, key)?;
        println!("{}: {}", "Decrypted Password".bold(), plaintext);
        plaintext.zeroize();
        Ok(())
    }

    /// List entries in site order.
    fn list_entries(&self) -> Result<()> {
        let entries: Vec<EntryView> = self
            .store
            .list_all()
            .map(|(site, secret)| EntryView {
                site,
                secret: encode_secret(secret),
                indexed: None,
            })
            .collect();

        match self.config.output {
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No passwords stored");
                }
                for entry in entries {
                    println!(
                        "Website: {} | Encrypted Password: {}",
                        entry.site.cyan(),
                        entry.secret
                    );
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({ "entries": entries });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Ok(())
    }

    /// List entries in the order they were added.
    fn show_history(&self) -> Result<()> {
        let entries: Vec<EntryView> = self
            .store
            .history()
            .map(|record| EntryView {
                site: record.key(),
                secret: encode_secret(record.secret()),
                indexed: Some(
                    self.store
                        .search(record.key())
                        .is_ok_and(|indexed| Rc::ptr_eq(indexed, record)),
                ),
            })
            .collect();

        match self.config.output {
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No passwords stored");
                }
                for (position, entry) in entries.iter().enumerate() {
                    let line = format!(
                        "{:>3}. Website: {} | Encrypted Password: {}",
                        position + 1,
                        entry.site.cyan(),
                        entry.secret
                    );
                    if entry.indexed == Some(false) {
                        println!("{} {}", line, "[shadowed]".yellow());
                    } else {
                        println!("{line}");
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({ "history": entries });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Ok(())
    }

    /// Delete an entry after an admin PIN challenge.
    fn delete_entry(&mut self, site: &str) -> Result<()> {
        let attempts = self.config.attempts;
        let on_terminal = atty::is(atty::Stream::Stdin);
        let editor = &mut self.editor;

        let mut gate = PinGate::new(&self.config.admin_pin, attempts, |remaining: u32| {
            if remaining < attempts {
                eprintln!("Incorrect PIN. {remaining} attempts remaining.");
            }
            let prompt = format!("Enter Admin PIN ({remaining} attempts left): ");
            if on_terminal {
                Password::new().with_prompt(prompt).interact().ok()
            } else {
                editor.readline(&prompt).ok()
            }
        });

        let record = self.store.remove(site, &mut gate)?;
        success(&format!("Deleted: {}", record.key()));
        Ok(())
    }

    /// Report the last affected entry.
    fn undo(&mut self) -> Result<()> {
        let record = self.store.undo()?;
        success(&format!(
            "Last affected entry: {} (no changes were reverted)",
            record.key()
        ));
        Ok(())
    }

    /// Rebuild the index with the named algorithm.
    fn sort(&mut self, algorithm: &str) -> Result<()> {
        let algorithm: SortAlgorithm = algorithm.parse().map_err(anyhow::Error::msg)?;
        self.store.sort(algorithm);

        match self.config.output {
            OutputFormat::Text => success(&format!("Passwords sorted using {algorithm}")),
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "sorted": algorithm,
                    "height": self.store.stats().height,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Ok(())
    }

    /// Show store statistics.
    fn show_stats(&self) -> Result<()> {
        let stats = self.store.stats();
        match self.config.output {
            OutputFormat::Text => {
                println!("{}: {}", "Entries".bold(), stats.records);
                println!("{}: {}", "Searchable".bold(), stats.indexed);
                println!("{}: {}", "Index height".bold(), stats.height);
                println!("{}: {}", "Undo depth".bold(), stats.undo_depth);
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        }
        Ok(())
    }

    /// Print welcome message.
    fn print_welcome(&self) {
        println!("\n{}", "Password Management Console".bold().cyan());
        println!("Type 'help' for available commands\n");
    }
}

fn help_line(command: &str, args: &str, description: &str) {
    let width = 27usize.saturating_sub(command.len() + 1);
    println!("  {} {:<width$} - {}", command.cyan(), args, description);
}

/// Split `input` into at most `limit` whitespace-separated parts, the last
/// part keeping the rest of the line.
fn split_args(input: &str, limit: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = input.trim();

    while !rest.is_empty() {
        if parts.len() + 1 == limit {
            parts.push(rest);
            break;
        }
        match rest.split_once(char::is_whitespace) {
            Some((head, tail)) => {
                parts.push(head);
                rest = tail.trim_start();
            }
            None => {
                parts.push(rest);
                break;
            }
        }
    }
    parts
}
