//! Text commands: one line per edit event
//!
//! ```text
//! total 120.50      set the bill total
//! people 4          reset to 4 equal shares
//! add               add a person, keeping proportions
//! set 2 40          set person 2 to 40%
//! equal             split equally
//! currency EUR      change display currency
//! show | help | quit
//! ```

use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Currency;

/// A single edit or query forwarded to the allocation engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitCommand {
    Total(f64),
    People(NonZeroUsize),
    AddPerson,
    /// `person` is 1-based, as displayed.
    Set { person: NonZeroUsize, percentage: f64 },
    Equal,
    Currency(Currency),
    Show,
    Help,
    Quit,
}

pub const COMMAND_HELP: &str = "\
total <amount>          set the bill total
people <n>              reset to n equal shares
add                     add a person, keeping proportions
set <person> <percent>  set a person's percentage (others absorb any excess)
equal                   split equally
currency <USD|EUR|CAD>  change display currency
show                    print the current split
help                    print this help
quit                    end the session";

impl SplitCommand {
    /// Parse a line; `None` for blank lines and `#` comments.
    pub fn parse_line(line: &str) -> ApplicationResult<Option<Self>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl FromStr for SplitCommand {
    type Err = ApplicationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Err(ApplicationError::invalid_command(line, "empty command"));
        };
        let args: Vec<&str> = words.collect();
        let keyword = keyword.to_ascii_lowercase();

        let command = match keyword.as_str() {
            "total" => {
                let [amount] = expect_args::<1>(line, &args, "total <amount>")?;
                SplitCommand::Total(parse_amount(line, amount)?)
            }
            "people" => {
                let [n] = expect_args::<1>(line, &args, "people <n>")?;
                SplitCommand::People(parse_count(line, n, "people count")?)
            }
            "add" => {
                expect_args::<0>(line, &args, "add")?;
                SplitCommand::AddPerson
            }
            "set" => {
                let [person, percentage] = expect_args::<2>(line, &args, "set <person> <percent>")?;
                SplitCommand::Set {
                    person: parse_count(line, person, "person number")?,
                    percentage: parse_percentage(line, percentage)?,
                }
            }
            "equal" => {
                expect_args::<0>(line, &args, "equal")?;
                SplitCommand::Equal
            }
            "currency" => {
                let [code] = expect_args::<1>(line, &args, "currency <code>")?;
                SplitCommand::Currency(code.parse()?)
            }
            "show" => {
                expect_args::<0>(line, &args, "show")?;
                SplitCommand::Show
            }
            "help" => {
                expect_args::<0>(line, &args, "help")?;
                SplitCommand::Help
            }
            "quit" | "exit" => {
                expect_args::<0>(line, &args, "quit")?;
                SplitCommand::Quit
            }
            other => {
                return Err(ApplicationError::invalid_command(
                    line,
                    format!("unknown command '{other}' (try 'help')"),
                ))
            }
        };
        Ok(command)
    }
}

fn expect_args<'a, const N: usize>(
    line: &str,
    args: &[&'a str],
    usage: &str,
) -> ApplicationResult<[&'a str; N]> {
    <[&str; N]>::try_from(args)
        .map_err(|_| ApplicationError::invalid_command(line, format!("usage: {usage}")))
}

fn parse_amount(line: &str, raw: &str) -> ApplicationResult<f64> {
    let amount: f64 = raw
        .parse()
        .map_err(|_| ApplicationError::invalid_command(line, format!("not a number: {raw}")))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ApplicationError::invalid_command(
            line,
            "total must be a non-negative number",
        ));
    }
    Ok(amount)
}

fn parse_percentage(line: &str, raw: &str) -> ApplicationResult<f64> {
    let value: f64 = raw
        .trim_end_matches('%')
        .parse()
        .map_err(|_| ApplicationError::invalid_command(line, format!("not a number: {raw}")))?;
    if !value.is_finite() {
        return Err(ApplicationError::invalid_command(
            line,
            "percentage must be a finite number",
        ));
    }
    Ok(value)
}

fn parse_count(line: &str, raw: &str, what: &str) -> ApplicationResult<NonZeroUsize> {
    raw.parse::<NonZeroUsize>().map_err(|_| {
        ApplicationError::invalid_command(line, format!("{what} must be a whole number >= 1"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[rstest]
    #[case("total 120.5", SplitCommand::Total(120.5))]
    #[case("TOTAL 0", SplitCommand::Total(0.0))]
    #[case("people 4", SplitCommand::People(nz(4)))]
    #[case("add", SplitCommand::AddPerson)]
    #[case("set 2 40", SplitCommand::Set { person: nz(2), percentage: 40.0 })]
    #[case("set 1 12.5%", SplitCommand::Set { person: nz(1), percentage: 12.5 })]
    #[case("  equal  ", SplitCommand::Equal)]
    #[case("currency eur", SplitCommand::Currency(Currency::Eur))]
    #[case("show", SplitCommand::Show)]
    #[case("Help", SplitCommand::Help)]
    #[case("quit", SplitCommand::Quit)]
    #[case("exit", SplitCommand::Quit)]
    fn parses_commands(#[case] input: &str, #[case] expected: SplitCommand) {
        assert_eq!(input.parse::<SplitCommand>().unwrap(), expected);
    }

    #[rstest]
    #[case("total")]
    #[case("total -5")]
    #[case("total abc")]
    #[case("total inf")]
    #[case("people 0")]
    #[case("people two")]
    #[case("set 0 50")]
    #[case("set 1")]
    #[case("set 1 NaN")]
    #[case("add 3")]
    #[case("equal now")]
    #[case("show all")]
    #[case("help total")]
    #[case("quit now please")]
    #[case("exit 1")]
    #[case("split 3")]
    fn rejects_malformed_commands(#[case] input: &str) {
        let err = input.parse::<SplitCommand>().unwrap_err();
        assert!(
            matches!(err, ApplicationError::InvalidCommand { .. }),
            "unexpected error for '{input}': {err:?}"
        );
    }

    #[test]
    fn given_unknown_currency_then_domain_error() {
        let err = "currency GBP".parse::<SplitCommand>().unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("# people 3")]
    fn skips_blank_and_comment_lines(#[case] input: &str) {
        assert_eq!(SplitCommand::parse_line(input).unwrap(), None);
    }
}
