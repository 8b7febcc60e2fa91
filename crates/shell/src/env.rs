// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell runtime state: variables, aliases, functions, positionals, and cwd.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ast::Command;

/// Default field separators used when `IFS` is unset.
pub const DEFAULT_IFS: &str = " \t\n";

#[derive(Debug, Clone, Default)]
pub struct VarEntry {
    pub value: String,
    pub exported: bool,
    pub readonly: bool,
}

/// Option toggles for the `set` builtin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Abort a command list when a command fails (`set -e`). Off by default.
    pub errexit: bool,
    /// Report the rightmost pipeline failure instead of the last stage
    /// (`set -o pipefail`).
    pub pipefail: bool,
}

impl Options {
    /// Look up an option slot by its `set -o` name.
    pub fn by_name(&mut self, name: &str) -> Option<&mut bool> {
        match name {
            "errexit" => Some(&mut self.errexit),
            "pipefail" => Some(&mut self.pipefail),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("{name}: readonly variable")]
    Readonly { name: String },

    #[error("not in a function")]
    NotInFunction,
}

/// The shell's mutable state, created once per session.
///
/// Variable reads search function-call frames top-down and then the global
/// frame; writes go to the global frame unless the name was declared `local`.
/// Subshells get an isolated copy via `Clone`.
#[derive(Debug, Clone)]
pub struct Env {
    globals: HashMap<String, VarEntry>,
    /// Function-call frames, innermost last.
    frames: Vec<HashMap<String, VarEntry>>,
    aliases: HashMap<String, String>,
    functions: HashMap<String, Command>,
    positionals: Vec<String>,
    arg0: String,
    /// Exit status of the last command (`$?`).
    pub last_status: i32,
    cwd: PathBuf,
    pub options: Options,
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    pub fn new() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Env {
            globals: HashMap::new(),
            frames: Vec::new(),
            aliases: HashMap::new(),
            functions: HashMap::new(),
            positionals: Vec::new(),
            arg0: "zish".to_string(),
            last_status: 0,
            cwd,
            options: Options::default(),
        }
    }

    /// Build an environment seeded from the calling process: every inherited
    /// variable is imported as exported, and `PWD` mirrors the working
    /// directory.
    pub fn from_process() -> Self {
        let mut env = Self::new();
        for (name, value) in std::env::vars() {
            env.globals.insert(name, VarEntry { value, exported: true, readonly: false });
        }
        let pwd = env.cwd.display().to_string();
        env.globals
            .entry("PWD".to_string())
            .or_insert_with(|| VarEntry { value: pwd, exported: true, readonly: false });
        env
    }

    // ── Variables ────────────────────────────────────────────────────────

    pub fn get(&self, name: &str) -> Option<&str> {
        for frame in self.frames.iter().rev() {
            if let Some(entry) = frame.get(name) {
                return Some(&entry.value);
            }
        }
        self.globals.get(name).map(|e| e.value.as_str())
    }

    /// Set a variable, preserving its exported flag.
    ///
    /// Writes hit the innermost frame that already holds the name (a `local`
    /// declaration), otherwise the global frame.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), EnvError> {
        let value = value.into();
        for frame in self.frames.iter_mut().rev() {
            if let Some(entry) = frame.get_mut(name) {
                if entry.readonly {
                    return Err(EnvError::Readonly { name: name.to_string() });
                }
                entry.value = value;
                return Ok(());
            }
        }
        match self.globals.get_mut(name) {
            Some(entry) => {
                if entry.readonly {
                    return Err(EnvError::Readonly { name: name.to_string() });
                }
                entry.value = value;
            }
            None => {
                self.globals.insert(
                    name.to_string(),
                    VarEntry { value, exported: false, readonly: false },
                );
            }
        }
        Ok(())
    }

    /// Mark a name exported, optionally assigning a new value first.
    pub fn export(&mut self, name: &str, value: Option<String>) -> Result<(), EnvError> {
        if let Some(value) = value {
            self.set(name, value)?;
        }
        for frame in self.frames.iter_mut().rev() {
            if let Some(entry) = frame.get_mut(name) {
                entry.exported = true;
                return Ok(());
            }
        }
        self.globals
            .entry(name.to_string())
            .or_insert_with(VarEntry::default)
            .exported = true;
        Ok(())
    }

    /// Mark a name readonly, optionally assigning a new value first.
    pub fn mark_readonly(&mut self, name: &str, value: Option<String>) -> Result<(), EnvError> {
        if let Some(value) = value {
            self.set(name, value)?;
        }
        for frame in self.frames.iter_mut().rev() {
            if let Some(entry) = frame.get_mut(name) {
                entry.readonly = true;
                return Ok(());
            }
        }
        self.globals
            .entry(name.to_string())
            .or_insert_with(VarEntry::default)
            .readonly = true;
        Ok(())
    }

    /// Declare a name in the innermost function frame.
    pub fn declare_local(&mut self, name: &str, value: String) -> Result<(), EnvError> {
        let Some(frame) = self.frames.last_mut() else {
            return Err(EnvError::NotInFunction);
        };
        frame.insert(name.to_string(), VarEntry { value, exported: false, readonly: false });
        Ok(())
    }

    /// Remove a variable from its innermost occurrence.
    pub fn unset(&mut self, name: &str) -> Result<(), EnvError> {
        for frame in self.frames.iter_mut().rev() {
            if let Some(entry) = frame.get(name) {
                if entry.readonly {
                    return Err(EnvError::Readonly { name: name.to_string() });
                }
                frame.remove(name);
                return Ok(());
            }
        }
        if let Some(entry) = self.globals.get(name) {
            if entry.readonly {
                return Err(EnvError::Readonly { name: name.to_string() });
            }
            self.globals.remove(name);
        }
        Ok(())
    }

    pub fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    pub fn in_function(&self) -> bool {
        !self.frames.is_empty()
    }

    /// The exported subset as a `NAME=value` map for child processes.
    ///
    /// Exported locals shadow exported globals of the same name.
    pub fn child_env(&self) -> HashMap<String, String> {
        let mut out: HashMap<String, String> = self
            .globals
            .iter()
            .filter(|(_, e)| e.exported)
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect();
        for frame in &self.frames {
            for (k, e) in frame {
                if e.exported {
                    out.insert(k.clone(), e.value.clone());
                }
            }
        }
        out
    }

    /// The effective field separators (`$IFS`, defaulting to space/tab/newline).
    pub fn ifs(&self) -> String {
        self.get("IFS").map(|s| s.to_string()).unwrap_or_else(|| DEFAULT_IFS.to_string())
    }

    // ── Special parameters ───────────────────────────────────────────────

    /// Resolve a special parameter: `$?`, `$$`, `$#`, `$0`, `$@`, `$*`,
    /// and positionals (`$1`, `${10}`, …).
    pub fn special(&self, name: &str) -> Option<String> {
        match name {
            "?" => Some(self.last_status.to_string()),
            "$" => Some(std::process::id().to_string()),
            "#" => Some(self.positionals.len().to_string()),
            "0" => Some(self.arg0.clone()),
            "@" | "*" => Some(self.positionals.join(" ")),
            _ => {
                let n: usize = name.parse().ok()?;
                // `$0` and `$00` both name the shell itself
                match n.checked_sub(1) {
                    Some(index) => self.positionals.get(index).cloned(),
                    None => Some(self.arg0.clone()),
                }
            }
        }
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn set_positionals(&mut self, args: Vec<String>) {
        self.positionals = args;
    }

    pub fn arg0(&self) -> &str {
        &self.arg0
    }

    pub fn set_arg0(&mut self, arg0: impl Into<String>) {
        self.arg0 = arg0.into();
    }

    // ── Working directory ────────────────────────────────────────────────

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Change directory, keeping `PWD` and `OLDPWD` in sync.
    pub fn set_cwd(&mut self, path: PathBuf) {
        let old = self.cwd.display().to_string();
        // PWD/OLDPWD mirror the cwd; a readonly marking on them is ignored.
        let _ = self.set("OLDPWD", old);
        let _ = self.set("PWD", path.display().to_string());
        self.cwd = path;
    }

    // ── Aliases ──────────────────────────────────────────────────────────

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(|s| s.as_str())
    }

    pub fn set_alias(&mut self, name: impl Into<String>, replacement: impl Into<String>) {
        self.aliases.insert(name.into(), replacement.into());
    }

    pub fn remove_alias(&mut self, name: &str) -> bool {
        self.aliases.remove(name).is_some()
    }

    /// All aliases, sorted by name (for `alias` output).
    pub fn aliases_sorted(&self) -> Vec<(&str, &str)> {
        let mut list: Vec<_> =
            self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        list.sort_by_key(|(k, _)| *k);
        list
    }

    // ── Functions ────────────────────────────────────────────────────────

    pub fn function(&self, name: &str) -> Option<&Command> {
        self.functions.get(name)
    }

    pub fn define_function(&mut self, name: impl Into<String>, body: Command) {
        self.functions.insert(name.into(), body);
    }

    pub fn remove_function(&mut self, name: &str) -> bool {
        self.functions.remove(name).is_some()
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
