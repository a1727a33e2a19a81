use anyhow::Result;
use chrono::Utc;
use std::io::{self, BufRead, Write};
use waypoint_core::Notifier;

use crate::report::{render_entries, render_status};
use crate::tracker::Tracker;

const HELP: &str = "\
Commands:
  add <distance> [YYYY-MM-DD]   log a distance (date defaults to today)
  edit <distance>               change the most recent entry
  undo                          delete the most recent entry
  status                        show progress
  list                          entries, newest date first
  help                          this text
  quit                          leave";

fn prompt() -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush().ok();
    let mut s = String::new();
    if io::stdin().lock().read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim().to_string()))
}

/// One line of session input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Add(&'a str, Option<&'a str>),
    Edit(&'a str),
    Undo,
    Status,
    List,
    Help,
    Quit,
}

/// `None` for anything unrecognized, including trailing words after a command.
fn parse_input(line: &str) -> Option<Input<'_>> {
    let mut words = line.split_whitespace();
    let input = match (words.next(), words.next(), words.next()) {
        (None, ..) => Input::Empty,
        (Some("quit" | "exit"), None, None) => Input::Quit,
        (Some("help"), None, None) => Input::Help,
        (Some("add"), Some(distance), date) => Input::Add(distance, date),
        (Some("edit"), Some(distance), None) => Input::Edit(distance),
        (Some("undo"), None, None) => Input::Undo,
        (Some("status"), None, None) => Input::Status,
        (Some("list"), None, None) => Input::List,
        _ => return None,
    };
    words.next().is_none().then_some(input)
}

/// Interactive loop. A milestone toast stays up until its timer runs out or
/// another milestone replaces it.
pub fn run_session(tracker: &mut Tracker) -> Result<()> {
    let mut toast = Notifier::from_millis(tracker.cfg.toast_ms);
    let unit = tracker.cfg.unit.clone();

    println!("Waypoint session ({} milestones). Type 'help' for commands.", tracker.cfg.milestones);

    while let Some(line) = prompt()? {
        let outcome = match parse_input(&line) {
            Some(Input::Empty) => Ok(None),
            Some(Input::Quit) => break,
            Some(Input::Help) => {
                println!("{HELP}");
                Ok(None)
            }
            Some(Input::Add(distance, date)) => tracker.log(distance, date),
            Some(Input::Edit(distance)) => tracker.edit_last(distance),
            Some(Input::Undo) => tracker.undo().map(|removed| {
                match removed {
                    Some(e) => println!("Removed {:.2} {unit} from {}", e.distance, e.date),
                    None => println!("Nothing to undo."),
                }
                None
            }),
            Some(Input::Status) => {
                print!("{}", render_status(&tracker.report(), &unit));
                Ok(None)
            }
            Some(Input::List) => {
                print!("{}", render_entries(tracker.state.entries.by_date_desc(), &unit));
                Ok(None)
            }
            None => {
                println!("Unrecognized input. Type 'help' for commands.");
                Ok(None)
            }
        };

        match outcome {
            Ok(Some(notice)) => {
                toast.raise(notice, Utc::now());
            }
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }

        if let Some(message) = toast.visible(Utc::now()) {
            println!("[{message}]");
        }
        println!(
            "Total: {:.1} {unit}",
            tracker.state.entries.total()
        );
    }

    Ok(())
}
