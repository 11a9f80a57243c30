//! A line-oriented [`Presenter`] for interactive terminals.
//!
//! Items are numbered from 1. At any prompt `b` goes back and `q` cancels;
//! `r` presses the step's button and `r<N>` the button of item `N`. Several
//! numbers separated by commas or spaces answer a multi-select step. End of
//! input cancels.

use crate::error::Result;
use crate::traits::Presenter;
use crate::wizard::{Response, Step, StepKind};
use std::io::{BufRead, Write};

/// Presents steps on a text stream and reads answers line by line.
#[derive(Debug)]
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    /// Read answers from `input`, write prompts to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    fn render(&mut self, step: &Step) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", step.title)?;
        if let Some(placeholder) = &step.placeholder {
            writeln!(self.output, "  {placeholder}")?;
        }
        if let Some(notice) = &step.notice {
            for line in notice.lines() {
                writeln!(self.output, "  | {line}")?;
            }
        }

        for (index, item) in step.items.iter().enumerate() {
            let marker = if item.picked { '*' } else { ' ' };
            write!(self.output, " {marker}{:>2}) {}", index + 1, item.label)?;
            if let Some(description) = &item.description {
                write!(self.output, "  ({description})")?;
            }
            writeln!(self.output)?;
            if let Some(detail) = &item.detail {
                writeln!(self.output, "       {detail}")?;
            }
        }

        let mut keys = vec!["b = back", "q = cancel"];
        if !step.buttons.is_empty() {
            keys.push("r = show all");
        }
        if !step.item_buttons.is_empty() {
            keys.push("r<N> = show item");
        }
        writeln!(self.output, "  [{}]", keys.join(", "))?;
        Ok(())
    }

    fn prompt(&mut self, step: &Step) -> Result<()> {
        match (step.kind, &step.value) {
            (StepKind::Input, Some(value)) => write!(self.output, "[{value}]> ")?,
            (StepKind::SelectMany, _) => write!(self.output, "choose one or more> ")?,
            _ => write!(self.output, "> ")?,
        }
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn present(&mut self, step: &Step) -> Result<Response> {
        self.render(step)?;
        loop {
            self.prompt(step)?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Response::Cancel);
            }
            match parse_answer(step, line.trim_end_matches(['\r', '\n'])) {
                Ok(response) => return Ok(response),
                Err(reason) => writeln!(self.output, "  {reason}")?,
            }
        }
    }
}

/// Turn one line of user input into a response for `step`.
fn parse_answer(step: &Step, line: &str) -> std::result::Result<Response, String> {
    let trimmed = line.trim();
    match trimmed {
        "b" => return Ok(Response::Back),
        "q" => return Ok(Response::Cancel),
        _ => {}
    }

    if let Some(rest) = trimmed.strip_prefix('r') {
        if rest.is_empty() {
            if let Some(&button) = step.buttons.first() {
                return Ok(Response::Button { button, item: None });
            }
        } else if let (Ok(n), Some(&button)) = (rest.parse::<usize>(), step.item_buttons.first()) {
            return match n.checked_sub(1).filter(|i| *i < step.items.len()) {
                Some(index) => Ok(Response::Button { button, item: Some(index) }),
                None => Err(format!("There is no item {n}")),
            };
        }
    }

    if step.kind == StepKind::Input {
        if line.is_empty() {
            return Ok(Response::Text(step.value.clone().unwrap_or_default()));
        }
        return Ok(Response::Text(line.to_string()));
    }

    if trimmed.is_empty() {
        let picked: Vec<usize> =
            step.items.iter().enumerate().filter(|(_, i)| i.picked).map(|(n, _)| n).collect();
        return if picked.is_empty() {
            Err("Please choose an item".to_string())
        } else {
            Ok(Response::Items(picked))
        };
    }

    let mut indices = Vec::new();
    for token in trimmed.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
        let n: usize = token.parse().map_err(|_| format!("'{token}' is not an item number"))?;
        match n.checked_sub(1).filter(|i| *i < step.items.len()) {
            Some(index) if !indices.contains(&index) => indices.push(index),
            Some(_) => {}
            None => return Err(format!("There is no item {n}")),
        }
    }
    if indices.len() > 1 && step.kind != StepKind::SelectMany {
        return Err("Please choose a single item".to_string());
    }
    Ok(Response::Items(indices))
}
