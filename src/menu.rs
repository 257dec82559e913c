// 🧭 Interactive driver - numbered menu over the inventory
// Generic over input/output so whole sessions can be scripted in tests.
// Inventory errors are reported and the loop keeps going; only failures
// writing to the terminal end the session.

use crate::error::InventoryError;
use crate::inventory::Inventory;
use crate::record::Record;
use crate::render::{records_table, values_table};
use crate::store::{parse_cost, parse_quantity};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Capture,
    ViewAll,
    Restock,
    Search,
    ValuePerItem,
    HighestQuantity,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Capture,
        MenuChoice::ViewAll,
        MenuChoice::Restock,
        MenuChoice::Search,
        MenuChoice::ValuePerItem,
        MenuChoice::HighestQuantity,
        MenuChoice::Exit,
    ];

    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(MenuChoice::Capture),
            2 => Some(MenuChoice::ViewAll),
            3 => Some(MenuChoice::Restock),
            4 => Some(MenuChoice::Search),
            5 => Some(MenuChoice::ValuePerItem),
            6 => Some(MenuChoice::HighestQuantity),
            7 => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Capture => "Capture shoes",
            MenuChoice::ViewAll => "View all shoes",
            MenuChoice::Restock => "Re-stock",
            MenuChoice::Search => "Search for a shoe",
            MenuChoice::ValuePerItem => "Value per item",
            MenuChoice::HighestQuantity => "Highest quantity",
            MenuChoice::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Load the store for a session.
///
/// Skipped rows are reported to `out`. A missing file starts an empty
/// inventory at the same path; any other I/O failure is fatal.
pub fn open_inventory<W: Write>(path: &Path, out: &mut W) -> Result<Inventory> {
    match Inventory::open(path) {
        Ok((inventory, rejected)) => {
            for row in &rejected {
                writeln!(out, "Error reading row: {}", row.raw)?;
            }
            info!(records = inventory.len(), rejected = rejected.len(), "inventory ready");
            Ok(inventory)
        }
        Err(err) if err.is_not_found() => {
            warn!(path = %path.display(), "store file missing, starting empty");
            writeln!(out, "Error: {}", err)?;
            writeln!(
                out,
                "Starting with an empty inventory; {} will be created on the first save.",
                path.display()
            )?;
            Ok(Inventory::new(path))
        }
        Err(err) => Err(err).with_context(|| format!("Failed to load inventory from {}", path.display())),
    }
}

pub struct Session<R, W> {
    inventory: Inventory,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(inventory: Inventory, input: R, output: W) -> Self {
        Session {
            inventory,
            input,
            output,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu until Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.read_line("\nEnter your choice: ")? else {
                writeln!(self.output, "\nExiting...")?;
                return Ok(());
            };

            let choice = match line.trim().parse::<i64>() {
                Ok(number) => MenuChoice::from_number(number),
                Err(_) => {
                    writeln!(self.output, "Please enter a number between 1 and 7.")?;
                    continue;
                }
            };

            match choice {
                Some(choice) => {
                    if self.dispatch(choice)? == Flow::Exit {
                        return Ok(());
                    }
                }
                None => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nInventory Management System")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, choice.label())?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        let outcome = match choice {
            MenuChoice::Capture => self.capture(),
            MenuChoice::ViewAll => self.view_all(),
            MenuChoice::Restock => self.restock(),
            MenuChoice::Search => self.search(),
            MenuChoice::ValuePerItem => self.value_per_item(),
            MenuChoice::HighestQuantity => self.highest_quantity(),
            MenuChoice::Exit => {
                writeln!(self.output, "Exiting...")?;
                return Ok(Flow::Exit);
            }
        };

        if let Err(err) = outcome {
            self.report(err)?;
        }
        Ok(Flow::Continue)
    }

    /// Show inventory errors to the operator; pass anything else up
    fn report(&mut self, err: anyhow::Error) -> Result<()> {
        match err.downcast::<InventoryError>() {
            Ok(err) => {
                warn!(error = %err, "operation failed");
                writeln!(self.output, "Error: {}", err)?;
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    fn capture(&mut self) -> Result<()> {
        let Some(origin) = self.read_line("\nEnter the country: ")? else {
            return Ok(());
        };
        let Some(code) = self.read_line("\nEnter the code: ")? else {
            return Ok(());
        };
        let Some(name) = self.read_line("\nEnter the product name: ")? else {
            return Ok(());
        };
        let Some(cost) = self.prompt_parsed(
            "\nEnter the cost: ",
            parse_cost,
            "Cost must be a number of zero or more.",
        )?
        else {
            return Ok(());
        };
        let Some(quantity) = self.prompt_parsed(
            "\nEnter the quantity: ",
            parse_quantity,
            "Quantity must be a whole number of zero or more.",
        )?
        else {
            return Ok(());
        };

        let captured = self
            .inventory
            .capture(Record::new(origin, code, name, cost, quantity))
            .to_string();
        writeln!(self.output, "Captured: {}", captured)?;

        self.inventory.save()?;
        self.confirm_saved()
    }

    fn view_all(&mut self) -> Result<()> {
        let table = records_table(self.inventory.records());
        write!(self.output, "{}", table)?;
        Ok(())
    }

    fn restock(&mut self) -> Result<()> {
        let (index, summary) = {
            let (index, record) = self.inventory.lowest_quantity()?;
            (index, record.to_string())
        };
        writeln!(self.output, "The shoe with the lowest quantity is: {}", summary)?;

        let Some(answer) = self.read_line("Do you want to add quantity for this shoe? (y/n): ")? else {
            return Ok(());
        };
        if !answer.trim().eq_ignore_ascii_case("y") {
            writeln!(self.output, "No changes made.")?;
            return Ok(());
        }

        let Some(added) = self.prompt_parsed(
            "Enter the quantity to add: ",
            parse_quantity,
            "Quantity must be a whole number of zero or more.",
        )?
        else {
            return Ok(());
        };

        let updated = self.inventory.restock(index, added)?.to_string();
        writeln!(self.output, "Updated: {}", updated)?;

        self.inventory.save()?;
        self.confirm_saved()
    }

    fn search(&mut self) -> Result<()> {
        let Some(code) = self.read_line("Enter the shoe code: ")? else {
            return Ok(());
        };

        let found: Vec<String> = self
            .inventory
            .search(&code)
            .iter()
            .map(|record| record.to_string())
            .collect();

        if found.is_empty() {
            writeln!(self.output, "No shoes found with code {}", code)?;
        } else {
            for line in found {
                writeln!(self.output, "{}", line)?;
            }
        }
        Ok(())
    }

    fn value_per_item(&mut self) -> Result<()> {
        let table = values_table(&self.inventory.value_per_item());
        write!(self.output, "{}", table)?;
        Ok(())
    }

    fn highest_quantity(&mut self) -> Result<()> {
        let summary = self.inventory.highest_quantity()?.to_string();
        writeln!(self.output, "The shoe with the highest quantity is: {}", summary)?;
        Ok(())
    }

    // ========================================================================
    // PROMPTS
    // ========================================================================

    fn confirm_saved(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Saved {} records to {}",
            self.inventory.len(),
            self.inventory.path().display()
        )?;
        Ok(())
    }

    /// Prompt and read one line without its line ending; None at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read operator input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Re-prompt until `parse` accepts the input; None at end of input
    fn prompt_parsed<T>(
        &mut self,
        prompt: &str,
        parse: fn(&str) -> Option<T>,
        invalid: &str,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse(&line) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.output, "{}", invalid)?,
            }
        }
    }
}
