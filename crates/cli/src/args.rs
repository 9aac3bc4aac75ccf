use anyhow::{bail, Context, Result};

pub const USAGE: &str = "\
Usage: expenses <command>

Commands:
  add <amount> <category> <description...>   Record an expense
  delete <index>                             Delete the expense at <index> (as shown by `list`)
  list                                       Show all expenses
  summary                                    Show total and per-category totals
  help                                       Show this message

Environment:
  EXPENSES_DIR   Data directory (default: platform data dir /expense-tracker)
  RUST_LOG       Log filter (default: expense_tracker_core=info)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        amount: String,
        category: String,
        description: String,
    },
    Delete {
        index: usize,
    },
    List,
    Summary,
    Help,
}

/// Parse the arguments after the program name.
pub fn parse(args: &[String]) -> Result<Command> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::List);
    };

    match command.as_str() {
        "add" => {
            if rest.len() < 3 {
                bail!("`add` needs an amount, a category and a description\n\n{USAGE}");
            }
            Ok(Command::Add {
                amount: rest[0].clone(),
                category: rest[1].clone(),
                description: rest[2..].join(" "),
            })
        }
        "delete" | "rm" => {
            let [index] = rest else {
                bail!("`delete` takes exactly one index\n\n{USAGE}");
            };
            let index = index
                .parse()
                .with_context(|| format!("'{index}' is not a valid list index"))?;
            Ok(Command::Delete { index })
        }
        "list" | "ls" => Ok(Command::List),
        "summary" => Ok(Command::Summary),
        "help" | "-h" | "--help" => Ok(Command::Help),
        other => bail!("unknown command '{other}'\n\n{USAGE}"),
    }
}
