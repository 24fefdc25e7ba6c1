//! Numbered text menus whose options produce values.
//!
//! Each option is bound to a producer that runs when the option is chosen.
//! A menu may carry a cancel option, listed as `0`.

use std::io::{self, BufRead, Write};

use crossterm::style::{Color, Stylize};

use crate::app::{Result, RetrieverError};

type Producer<'a, T> = Box<dyn FnMut() -> T + 'a>;

struct MenuOption<'a, T> {
    text: String,
    color: Color,
    producer: Producer<'a, T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Choice(usize),
    Cancel,
}

pub struct Menu<'a, T> {
    title: String,
    options: Vec<MenuOption<'a, T>>,
    cancel: Option<MenuOption<'a, T>>,
    was_cancelled: bool,
}

impl<'a, T> Menu<'a, T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options: Vec::new(),
            cancel: None,
            was_cancelled: false,
        }
    }

    pub fn add(&mut self, text: impl Into<String>, producer: impl FnMut() -> T + 'a) {
        self.add_colored(text, Color::Grey, producer);
    }

    pub fn add_colored(
        &mut self,
        text: impl Into<String>,
        color: Color,
        producer: impl FnMut() -> T + 'a,
    ) {
        self.options.push(MenuOption {
            text: text.into(),
            color,
            producer: Box::new(producer),
        });
    }

    /// Add an option that always returns `value`.
    pub fn add_value(&mut self, text: impl Into<String>, value: T)
    where
        T: Clone + 'a,
    {
        self.add(text, move || value.clone());
    }

    /// Set the cancel option; choosing it returns `T::default()`.
    pub fn set_cancel(&mut self, text: impl Into<String>)
    where
        T: Default + 'a,
    {
        self.set_cancel_with(text, Color::Grey, T::default);
    }

    pub fn set_cancel_value(&mut self, text: impl Into<String>, value: T)
    where
        T: Clone + 'a,
    {
        self.set_cancel_with(text, Color::Grey, move || value.clone());
    }

    pub fn set_cancel_with(
        &mut self,
        text: impl Into<String>,
        color: Color,
        producer: impl FnMut() -> T + 'a,
    ) {
        self.cancel = Some(MenuOption {
            text: text.into(),
            color,
            producer: Box::new(producer),
        });
    }

    pub fn can_cancel(&self) -> bool {
        self.cancel.is_some()
    }

    /// Whether the last selection was the cancel option.
    pub fn was_cancelled(&self) -> bool {
        self.was_cancelled
    }

    /// Display the menu, wait for a valid choice, and run its producer.
    pub fn show<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<T> {
        let selection = self.select(input, output)?;
        self.run(selection)
    }

    /// Display the menu repeatedly, one value per display, until cancelled.
    ///
    /// The value produced by the cancel option is yielded last.
    pub fn show_repeat<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: W,
    ) -> Result<Repeat<'_, 'a, T, R, W>> {
        if !self.can_cancel() {
            return Err(RetrieverError::Menu(
                "a menu cannot auto-repeat without a cancel option".to_string(),
            ));
        }

        Ok(Repeat {
            menu: self,
            input,
            output,
            done: false,
        })
    }

    fn render<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", self.title)?;
        for (i, option) in self.options.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, option.text.as_str().with(option.color))?;
        }
        if let Some(cancel) = &self.cancel {
            writeln!(output, "0. {}", cancel.text.as_str().with(cancel.color))?;
        }
        output.flush()
    }

    fn select<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<Selection> {
        self.render(output)?;

        let mut line = String::new();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input ended before an option was selected",
                ));
            }

            match self.parse_choice(line.trim()) {
                Some(selection) => return Ok(selection),
                None => writeln!(output, "Invalid choice: {}", line.trim())?,
            }
        }
    }

    fn parse_choice(&self, choice: &str) -> Option<Selection> {
        let number: usize = choice.parse().ok()?;
        match number {
            0 if self.can_cancel() => Some(Selection::Cancel),
            n if (1..=self.options.len()).contains(&n) => Some(Selection::Choice(n - 1)),
            _ => None,
        }
    }

    fn run(&mut self, selection: Selection) -> io::Result<T> {
        let option = match selection {
            Selection::Choice(index) => self.options.get_mut(index),
            Selection::Cancel => self.cancel.as_mut(),
        }
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no such option"))?;
        self.was_cancelled = selection == Selection::Cancel;
        Ok((option.producer)())
    }
}

/// Iterator returned by [`Menu::show_repeat`].
pub struct Repeat<'m, 'a, T, R, W> {
    menu: &'m mut Menu<'a, T>,
    input: R,
    output: W,
    done: bool,
}

impl<T, R: BufRead, W: Write> Iterator for Repeat<'_, '_, T, R, W> {
    type Item = io::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let outcome = self
            .menu
            .select(&mut self.input, &mut self.output)
            .and_then(|selection| self.menu.run(selection));
        self.done = outcome.is_err() || self.menu.was_cancelled();
        Some(outcome)
    }
}
