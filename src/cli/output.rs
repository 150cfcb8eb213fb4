//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{Split, SUM_TOLERANCE};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl std::fmt::Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Summary line: total, currency and party size.
pub fn summary_line(split: &Split) -> String {
    let people = split.num_people();
    format!(
        "Total {} ({}) split between {} {}",
        split.currency().format(split.total_bill()),
        split.currency(),
        people,
        if people == 1 { "person" } else { "people" }
    )
}

/// One line per person: `Person 1 (50.00%): $12.50`.
pub fn share_lines(split: &Split) -> Vec<String> {
    let currency = split.currency();
    split
        .shares()
        .iter()
        .enumerate()
        .map(|(i, share)| {
            format!(
                "Person {} ({:.2}%): {}",
                i + 1,
                share.percentage(),
                currency.format(share.amount())
            )
        })
        .collect()
}

/// Describe an allocation that does not sum to 100, if any.
pub fn allocation_warning(split: &Split) -> Option<String> {
    let unallocated = split.unallocated_percentage();
    if unallocated > SUM_TOLERANCE {
        Some(format!(
            "{:.2}% of the bill is unallocated ({} not covered)",
            unallocated,
            split
                .currency()
                .format(split.total_bill() * unallocated / 100.0)
        ))
    } else if unallocated < -SUM_TOLERANCE {
        Some(format!(
            "shares add up to {:.2}%, {:.2}% over the bill",
            split.allocated_percentage(),
            -unallocated
        ))
    } else {
        None
    }
}

/// Print the split: summary header, one line per share, allocation warning.
pub fn render_split(split: &Split) {
    header(&summary_line(split));
    for line in share_lines(split) {
        detail(&line);
    }
    if let Some(msg) = allocation_warning(split) {
        warning(&msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use std::num::NonZeroUsize;

    #[test]
    fn given_equal_split_then_lines_show_percent_and_amount() {
        let split = Split::new(25.0, NonZeroUsize::new(2).unwrap(), Currency::Usd);
        assert_eq!(
            share_lines(&split),
            vec!["Person 1 (50.00%): $12.50", "Person 2 (50.00%): $12.50"]
        );
        assert_eq!(summary_line(&split), "Total $25.00 (USD) split between 2 people");
        assert_eq!(allocation_warning(&split), None);
    }

    #[test]
    fn given_three_people_then_percentages_rounded_for_display() {
        let split = Split::new(10.0, NonZeroUsize::new(3).unwrap(), Currency::Eur);
        assert_eq!(share_lines(&split)[0], "Person 1 (33.33%): €3.33");
    }

    #[test]
    fn given_single_person_then_summary_is_singular() {
        let split = Split::new(7.0, NonZeroUsize::MIN, Currency::Cad);
        assert_eq!(summary_line(&split), "Total C$7.00 (CAD) split between 1 person");
    }

    #[test]
    fn given_under_allocation_then_warns_about_uncovered_amount() {
        let mut split = Split::new(200.0, NonZeroUsize::new(2).unwrap(), Currency::Usd);
        split.set_percentage(0, 30.0).unwrap();
        assert_eq!(
            allocation_warning(&split).unwrap(),
            "20.00% of the bill is unallocated ($40.00 not covered)"
        );
    }

    #[test]
    fn given_clamped_over_allocation_then_warns_about_excess() {
        let mut split =
            Split::from_percentages(100.0, &[50.0, 30.0, 20.0], Currency::Usd).unwrap();
        split.set_percentage(0, 95.0).unwrap();
        assert_eq!(
            allocation_warning(&split).unwrap(),
            "shares add up to 102.50%, 2.50% over the bill"
        );
    }
}
