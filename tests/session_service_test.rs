//! Tests for SessionService driven the way the CLI drives it

use std::num::NonZeroUsize;

use billsplit::application::services::{SessionOutcome, SessionService};
use billsplit::application::{ApplicationError, SplitCommand};
use billsplit::config::Settings;
use billsplit::domain::{Currency, DomainError};
use billsplit::infrastructure::di::ServiceContainer;
use billsplit::util::testing;

fn container(total: f64, people: usize, currency: Currency) -> ServiceContainer {
    testing::init_test_setup();
    ServiceContainer::new(Settings {
        currency,
        people: NonZeroUsize::new(people).unwrap(),
        total_bill: total,
    })
}

fn run(session: &mut SessionService, lines: &[&str]) {
    for line in lines {
        session.run_line(line).unwrap();
    }
}

#[test]
fn given_dinner_for_two_when_third_guest_arrives_then_custom_split_scales() {
    // Arrange
    let mut session = container(0.0, 2, Currency::Usd).session();

    // Act
    run(&mut session, &["total 150", "set 1 70", "add"]);

    // Assert
    let split = session.split();
    let shown: Vec<String> = split
        .amounts()
        .iter()
        .map(|&a| split.currency().format(a))
        .collect();
    assert_eq!(shown, vec!["$70.00", "$30.00", "$50.00"]);
    assert!(split.is_balanced());
}

#[test]
fn given_custom_split_when_people_set_then_equal_again() {
    let mut session = container(90.0, 2, Currency::Eur).session();

    run(&mut session, &["set 2 80", "people 3"]);

    let split = session.split();
    assert_eq!(split.num_people(), 3);
    for amount in split.amounts() {
        assert!((amount - 30.0).abs() < 1e-9);
    }
}

#[test]
fn given_under_allocated_split_when_equal_then_balanced() {
    let mut session = container(60.0, 3, Currency::Cad).session();

    run(&mut session, &["set 1 10"]);
    assert!(session.split().unallocated_percentage() > 0.0);

    let outcome = session.apply(SplitCommand::Equal).unwrap();

    assert_eq!(outcome, SessionOutcome::Updated);
    assert!(session.split().is_balanced());
}

#[test]
fn given_invalid_line_when_running_then_error_and_state_kept() {
    let mut session = container(100.0, 2, Currency::Usd).session();
    run(&mut session, &["set 1 60"]);
    let before = session.split().clone();

    let unknown = session.run_line("set 9 10").unwrap_err();
    let malformed = session.run_line("total lots").unwrap_err();

    assert!(matches!(
        unknown,
        ApplicationError::Domain(DomainError::ShareOutOfRange { index: 8, people: 2 })
    ));
    assert!(matches!(malformed, ApplicationError::InvalidCommand { .. }));
    assert_eq!(session.split(), &before);
}

#[test]
fn given_currency_switch_then_amounts_not_converted() {
    let mut session = container(40.0, 2, Currency::Usd).session();

    run(&mut session, &["currency EUR"]);

    let split = session.split();
    assert_eq!(split.currency(), Currency::Eur);
    assert_eq!(split.currency().format(split.amounts()[0]), "€20.00");
}
