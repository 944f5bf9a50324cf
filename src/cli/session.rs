//! Interactive forest session
//!
//! A line-oriented menu over one forest:
//!
//! ```text
//! p          print the forest
//! a          add a random tree
//! c <index>  cut down a tree
//! g          simulate one year of growth
//! r <height> reap trees taller than height
//! s          save the snapshot
//! l          reload from the snapshot
//! i <file>   import delimited text
//! x          exit
//! ```
//!
//! Failed commands are reported and the session continues.

use std::io::{self, BufRead, Write};
use std::path::Path;

use rand::Rng;
use tracing::debug;

use crate::application::services::ForestService;
use crate::domain::Forest;

const PROMPT: &str = "(P)rint, (A)dd, (C)ut, (G)row, (R)eap, (S)ave, (L)oad, (I)mport, e(X)it:";

const HELP: &str = "\
p          print the forest
a          add a random tree
c <index>  cut down a tree
g          simulate one year of growth
r <height> reap trees taller than height
s          save the snapshot
l          reload from the snapshot
i <file>   import delimited text
x          exit";

/// What the session loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// An interactive session owning one forest.
pub struct Session<'a, R: Rng> {
    service: &'a ForestService,
    forest: Forest,
    rng: R,
}

impl<'a, R: Rng> Session<'a, R> {
    pub fn new(service: &'a ForestService, forest: Forest, rng: R) -> Self {
        Self {
            service,
            forest,
            rng,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Read commands from `input` until `x` or end of input.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, out: &mut O) -> io::Result<()> {
        writeln!(out, "{}", PROMPT)?;
        for line in input.lines() {
            let line = line?;
            if self.execute(line.trim(), out)? == Flow::Exit {
                break;
            }
            writeln!(out, "{}", PROMPT)?;
        }
        Ok(())
    }

    fn execute<O: Write>(&mut self, line: &str, out: &mut O) -> io::Result<Flow> {
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        debug!("session command: {:?} {:?}", command, arg);

        match command.to_ascii_lowercase().as_str() {
            "" => {}
            "p" => writeln!(out, "{}", self.forest)?,
            "a" => {
                let tree = self.forest.add_random_tree(&mut self.rng);
                writeln!(out, "Planted {}", tree)?;
            }
            "c" => match arg.parse::<usize>() {
                Ok(index) => match self.forest.remove_at(index) {
                    Ok(tree) => writeln!(out, "Cut down {}", tree)?,
                    Err(e) => writeln!(out, "{}", e)?,
                },
                Err(_) => writeln!(out, "Tree number '{}' is not a valid index", arg)?,
            },
            "g" => {
                self.forest.simulate_year();
                writeln!(out, "Simulated one year of growth")?;
            }
            "r" => match arg.parse::<f64>() {
                Ok(height) if height.is_nan() => writeln!(out, "Height must be a number")?,
                Ok(height) => {
                    for reaping in self.forest.reap_and_replace(height, &mut self.rng) {
                        writeln!(out, "Reaping the tall tree {}", reaping.reaped)?;
                        writeln!(out, "Replaced with new tree {}", reaping.replacement)?;
                    }
                }
                Err(_) => writeln!(out, "Height '{}' is not a number", arg)?,
            },
            "s" => match self.service.save_snapshot(&self.forest) {
                Ok(path) => writeln!(out, "Saved to {}", path.display())?,
                Err(e) => writeln!(out, "Unable to save file - try again: {}", e)?,
            },
            "l" => {
                let path = self.service.snapshot_path(self.forest.name());
                match self.service.load_snapshot(&mut self.forest, &path) {
                    Ok(count) => {
                        writeln!(out, "Loaded {} trees from {}", count, path.display())?
                    }
                    Err(e) => writeln!(out, "Unable to load snapshot: {}", e)?,
                }
            }
            "i" if !arg.is_empty() => {
                match self.service.load_text(&mut self.forest, Path::new(arg)) {
                    Ok(count) => writeln!(out, "Imported {} trees from {}", count, arg)?,
                    Err(e) => writeln!(out, "Unable to import {}: {}", arg, e)?,
                }
            }
            "i" => writeln!(out, "Usage: i <file>")?,
            "x" | "q" | "exit" | "quit" => return Ok(Flow::Exit),
            "h" | "?" | "help" => writeln!(out, "{}", HELP)?,
            other => writeln!(out, "Unknown command '{}'; type h for help", other)?,
        }
        Ok(Flow::Continue)
    }
}
