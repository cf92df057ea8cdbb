//! Behaviour tests for transfer classification and the value ceiling.

use std::cell::RefCell;

use chrono::NaiveDateTime;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use transfer_ledger::domain::transfer::{MAX_TRANSFER_VALUE, parse_creation_date};
use transfer_ledger::domain::{
    NewTransfer, TransferDraft, TransferType, TransferValidationError, UserId,
};
use transfer_ledger::test_support::clock::{FixtureClock, timestamp};

struct ClassificationWorld {
    draft: RefCell<TransferDraft>,
    clock_time: RefCell<NaiveDateTime>,
    outcome: RefCell<Option<Result<NewTransfer, TransferValidationError>>>,
}

impl ClassificationWorld {
    fn new() -> Self {
        Self {
            draft: RefCell::new(TransferDraft::new(UserId::new(1))),
            clock_time: RefCell::new(timestamp(2019, 6, 1, 3, 0, 0)),
            outcome: RefCell::new(None),
        }
    }

    fn prepared(&self) -> NewTransfer {
        self.outcome
            .borrow()
            .clone()
            .expect("transfer should have been prepared")
            .expect("preparation should succeed")
    }
}

fn parse_time(raw: &str) -> NaiveDateTime {
    parse_creation_date(raw).expect("feature timestamps use the wire format")
}

#[fixture]
fn world() -> ClassificationWorld {
    ClassificationWorld::new()
}

#[given("a transfer from bank \"{payer}\" to bank \"{receiver}\"")]
fn a_transfer_between_banks(world: &ClassificationWorld, payer: String, receiver: String) {
    let mut draft = world.draft.borrow_mut();
    draft.payer.bank = payer;
    draft.receiver.bank = receiver;
}

#[given("a transfer value of {value}")]
fn a_transfer_value_of(world: &ClassificationWorld, value: u32) {
    world.draft.borrow_mut().transfer_value = value;
}

#[given("a creation time of \"{raw}\"")]
fn a_creation_time_of(world: &ClassificationWorld, raw: String) {
    world.draft.borrow_mut().creation_date = Some(parse_time(&raw));
}

#[given("the clock reads \"{raw}\"")]
fn the_clock_reads(world: &ClassificationWorld, raw: String) {
    *world.clock_time.borrow_mut() = parse_time(&raw);
}

#[when("the transfer is prepared")]
fn the_transfer_is_prepared(world: &ClassificationWorld) {
    let clock = FixtureClock::at(*world.clock_time.borrow());
    let draft = world.draft.borrow().clone();
    *world.outcome.borrow_mut() = Some(draft.prepare(&clock));
}

#[then("the transfer type is \"{expected}\"")]
fn the_transfer_type_is(world: &ClassificationWorld, expected: String) {
    let expected: TransferType = expected.parse().expect("known transfer type label");
    assert_eq!(world.prepared().transfer_type, expected);
}

#[then("the creation time is \"{raw}\"")]
fn the_creation_time_is(world: &ClassificationWorld, raw: String) {
    assert_eq!(world.prepared().creation_date, parse_time(&raw));
}

#[then("the transfer is rejected as too large")]
fn the_transfer_is_rejected_as_too_large(world: &ClassificationWorld) {
    let outcome = world.outcome.borrow();
    let error = outcome
        .as_ref()
        .expect("transfer should have been prepared")
        .as_ref()
        .expect_err("preparation should fail");
    assert!(matches!(
        error,
        TransferValidationError::ValueTooLarge { max, .. } if *max == MAX_TRANSFER_VALUE
    ));
}

#[scenario(
    path = "tests/features/transfer_classification.feature",
    name = "Same-bank transfers are CC"
)]
fn same_bank_transfers_are_cc(world: ClassificationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/transfer_classification.feature",
    name = "Low-value transfers in business hours are TED"
)]
fn low_value_transfers_in_business_hours_are_ted(world: ClassificationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/transfer_classification.feature",
    name = "Transfers after the window closes are DOC"
)]
fn transfers_after_the_window_closes_are_doc(world: ClassificationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/transfer_classification.feature",
    name = "Transfers at the TED limit are DOC"
)]
fn transfers_at_the_ted_limit_are_doc(world: ClassificationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/transfer_classification.feature",
    name = "Values above the ceiling are rejected"
)]
fn values_above_the_ceiling_are_rejected(world: ClassificationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/transfer_classification.feature",
    name = "A missing creation time is taken from the clock"
)]
fn a_missing_creation_time_is_taken_from_the_clock(world: ClassificationWorld) {
    drop(world);
}
