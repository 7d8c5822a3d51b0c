//! Shell
//!
//! A line-oriented front end over a [`Session`]. Each input line is one
//! command, parsed with clap.

use std::{
    io::{self, BufRead},
    num::NonZeroU32,
};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::{
    channel::OrderChannel,
    checkout::CheckoutState,
    products::{Category, ProductId},
    session::{Session, SessionError},
    summary::{SummaryError, write_cart, write_offer, write_products},
};

/// Errors that stop the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Rendering a table failed.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// A session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// One parsed input line.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true)]
pub struct ShellLine {
    /// The command to run
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Shell commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Browse a category (canecas, canetas, personalizados, cadernos)
    Category {
        /// Category to browse
        category: Category,
    },

    /// List the products in the current category
    Products,

    /// Add a product to the cart
    Add {
        /// Product id
        id: u32,

        /// How many to add
        #[arg(default_value = "1")]
        quantity: NonZeroU32,
    },

    /// Increase a line's quantity
    Inc {
        /// Product id
        id: u32,

        /// Amount to add
        #[arg(default_value_t = 1)]
        by: u32,
    },

    /// Decrease a line's quantity, stopping at one
    Dec {
        /// Product id
        id: u32,

        /// Amount to subtract
        #[arg(default_value_t = 1)]
        by: u32,
    },

    /// Remove a line from the cart
    Remove {
        /// Product id
        id: u32,
    },

    /// Show the cart
    Cart,

    /// Finish the order; shows the special offer first
    Checkout,

    /// Show the special offer again
    Offer,

    /// Accept the special offer and send the order
    Accept,

    /// Send the order without the special offer
    Decline,

    /// Close the special offer without sending
    Dismiss,

    /// Leave the shell
    Quit,
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,

    /// Stop.
    Quit,
}

/// Run a single command against the session.
///
/// # Errors
///
/// Returns a [`ShellError`] if output cannot be written or an order cannot be
/// built or delivered. Unknown product ids are reported on `out` instead.
pub fn execute(
    session: &mut Session<'_>,
    command: ShellCommand,
    out: &mut impl io::Write,
    channel: &mut dyn OrderChannel,
) -> Result<Flow, ShellError> {
    debug!(?command, "executing shell command");

    match command {
        ShellCommand::Category { category } => {
            session.select_category(category);
            write_products(&mut *out, session.visible_products())?;
        }
        ShellCommand::Products => {
            writeln!(out, "{}", session.category())?;
            write_products(&mut *out, session.visible_products())?;
        }
        ShellCommand::Add { id, quantity } => match session.add(ProductId(id), quantity) {
            Ok(()) => writeln!(
                out,
                "✓ added {quantity}x #{id} ({} in cart)",
                session.cart().item_count()
            )?,
            Err(SessionError::UnknownProduct(id)) => writeln!(out, "no product with id {id}")?,
            Err(err) => return Err(err.into()),
        },
        ShellCommand::Inc { id, by } => {
            session.adjust(ProductId(id), i64::from(by));
            write_cart(&mut *out, session.cart())?;
        }
        ShellCommand::Dec { id, by } => {
            session.adjust(ProductId(id), -i64::from(by));
            write_cart(&mut *out, session.cart())?;
        }
        ShellCommand::Remove { id } => {
            session.remove(ProductId(id));
            write_cart(&mut *out, session.cart())?;
        }
        ShellCommand::Cart => write_cart(&mut *out, session.cart())?,
        ShellCommand::Checkout => match session.finalize() {
            CheckoutState::OfferPending => {
                write_offer(&mut *out, session.catalog().special_offer())?;
            }
            CheckoutState::Idle => writeln!(out, "Cart is empty; nothing to check out.")?,
        },
        ShellCommand::Offer => {
            if session.checkout_state() == CheckoutState::OfferPending {
                write_offer(&mut *out, session.catalog().special_offer())?;
            } else {
                writeln!(out, "No checkout in progress.")?;
            }
        }
        ShellCommand::Accept => {
            if session.accept_offer(channel)?.is_none() {
                writeln!(out, "No checkout in progress.")?;
            }
        }
        ShellCommand::Decline => {
            if session.decline_offer(channel)?.is_none() {
                writeln!(out, "No checkout in progress.")?;
            }
        }
        ShellCommand::Dismiss => session.dismiss_offer(),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Read commands from `input` until it ends or `quit` is given.
///
/// Lines that do not parse are answered with the parser's message and skipped.
///
/// # Errors
///
/// Returns a [`ShellError`] if reading, writing or delivery fails.
pub fn run(
    session: &mut Session<'_>,
    input: impl BufRead,
    out: &mut impl io::Write,
    channel: &mut dyn OrderChannel,
) -> Result<(), ShellError> {
    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();

        if words.is_empty() || words.first().is_some_and(|word| word.starts_with('#')) {
            continue;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                write!(out, "{err}")?;
                continue;
            }
        };

        if execute(session, command, out, channel)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}
