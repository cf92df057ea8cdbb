//! Tests for the transfer ledger service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockTransferRepository, MockUserRepository};
use crate::domain::{ErrorCode, NewTransfer, Party, TransferType, User, UserProfile};
use crate::test_support::clock::{FixtureClock, timestamp};

fn party(name: &str, bank: &str) -> Party {
    Party {
        name: name.to_owned(),
        bank: bank.to_owned(),
        ..Party::default()
    }
}

#[fixture]
fn draft() -> TransferDraft {
    TransferDraft {
        payer: party("Alice", "Bank A"),
        receiver: party("Bob", "Bank B"),
        transfer_value: 100,
        ..TransferDraft::new(UserId::new(1))
    }
}

fn clock_at(hour: u32) -> Arc<dyn Clock> {
    Arc::new(FixtureClock::at(timestamp(2019, 1, 1, hour, 0, 0)))
}

fn known_user() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|id| {
        Ok(Some(User::new(
            id,
            UserProfile::try_from_strings("User A", "123").expect("valid profile"),
        )))
    });
    users
}

fn echo_create(transfers: &mut MockTransferRepository) {
    transfers
        .expect_create()
        .times(1)
        .returning(|new| Ok(Transfer::new(TransferId::new(1), new.clone(), false)));
}

fn stored(draft: TransferDraft) -> Transfer {
    let clock = FixtureClock::at(timestamp(2019, 1, 1, 12, 0, 0));
    Transfer::new(
        TransferId::new(5),
        draft.prepare(&clock).expect("valid draft"),
        false,
    )
}

#[rstest]
#[case(12, TransferType::Ted)]
#[case(9, TransferType::Doc)]
#[tokio::test]
async fn create_transfer_classifies_with_clock_time(
    draft: TransferDraft,
    #[case] hour: u32,
    #[case] expected: TransferType,
) {
    let mut transfers = MockTransferRepository::new();
    echo_create(&mut transfers);

    let service =
        TransferLedgerService::new(Arc::new(known_user()), Arc::new(transfers), clock_at(hour));
    let transfer = service.create_transfer(draft).await.expect("created");

    assert_eq!(transfer.transfer_type(), expected);
    assert_eq!(transfer.creation_date(), timestamp(2019, 1, 1, hour, 0, 0));
}

#[rstest]
#[tokio::test]
async fn create_transfer_rejects_value_above_ceiling(mut draft: TransferDraft) {
    draft.transfer_value = 100_001;
    let mut transfers = MockTransferRepository::new();
    transfers.expect_create().times(0);

    let service =
        TransferLedgerService::new(Arc::new(known_user()), Arc::new(transfers), clock_at(12));
    let error = service
        .create_transfer(draft)
        .await
        .expect_err("value too large");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("field")).and_then(|f| f.as_str()),
        Some("transfer_value")
    );
}

#[rstest]
#[tokio::test]
async fn create_transfer_rejects_unknown_user(draft: TransferDraft) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(UserId::new(1)))
        .return_once(|_| Ok(None));
    let mut transfers = MockTransferRepository::new();
    transfers.expect_create().times(0);

    let service = TransferLedgerService::new(Arc::new(users), Arc::new(transfers), clock_at(12));
    let error = service
        .create_transfer(draft)
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_transfer_maps_connection_failure(draft: TransferDraft) {
    let mut transfers = MockTransferRepository::new();
    transfers
        .expect_create()
        .return_once(|_| Err(TransferPersistenceError::connection("pool closed")));

    let service =
        TransferLedgerService::new(Arc::new(known_user()), Arc::new(transfers), clock_at(12));
    let error = service
        .create_transfer(draft)
        .await
        .expect_err("store offline");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn get_transfer_hides_missing_rows() {
    let mut transfers = MockTransferRepository::new();
    transfers
        .expect_find_active_by_id()
        .with(eq(TransferId::new(9)))
        .return_once(|_| Ok(None));

    let service = TransferLedgerService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(transfers),
        clock_at(12),
    );
    let error = service
        .get_transfer(TransferId::new(9))
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_transfer_reclassifies_merged_fields(draft: TransferDraft) {
    let current = stored(draft);
    assert_eq!(current.transfer_type(), TransferType::Ted);

    let mut transfers = MockTransferRepository::new();
    transfers
        .expect_find_active_by_id()
        .return_once(move |_| Ok(Some(current)));
    transfers
        .expect_update()
        .withf(|id, new: &NewTransfer| {
            *id == TransferId::new(5) && new.transfer_type == TransferType::Cc
        })
        .return_once(|id, new| Ok(Some(Transfer::new(id, new.clone(), false))));

    // Same user: no user lookup is needed.
    let users = MockUserRepository::new();
    let service = TransferLedgerService::new(Arc::new(users), Arc::new(transfers), clock_at(3));
    let patch = TransferPatch {
        receivers_bank: Some("Bank A".to_owned()),
        user_id: Some(UserId::new(1)),
        ..TransferPatch::default()
    };
    let updated = service
        .update_transfer(TransferId::new(5), patch)
        .await
        .expect("updated");

    assert_eq!(updated.transfer_type(), TransferType::Cc);
    assert_eq!(updated.receiver().name, "Bob");
    assert_eq!(updated.creation_date(), timestamp(2019, 1, 1, 12, 0, 0));
}

#[rstest]
#[tokio::test]
async fn update_transfer_checks_new_owner(draft: TransferDraft) {
    let current = stored(draft);
    let mut transfers = MockTransferRepository::new();
    transfers
        .expect_find_active_by_id()
        .return_once(move |_| Ok(Some(current)));
    transfers.expect_update().times(0);

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(UserId::new(2)))
        .return_once(|_| Ok(None));

    let service = TransferLedgerService::new(Arc::new(users), Arc::new(transfers), clock_at(3));
    let patch = TransferPatch {
        user_id: Some(UserId::new(2)),
        ..TransferPatch::default()
    };
    let error = service
        .update_transfer(TransferId::new(5), patch)
        .await
        .expect_err("unknown owner");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_transfer_soft_deletes(#[case] removed: bool, #[case] expected: Option<ErrorCode>) {
    let mut transfers = MockTransferRepository::new();
    transfers
        .expect_soft_delete()
        .with(eq(TransferId::new(4)))
        .return_once(move |_| Ok(removed));
    transfers.expect_hard_delete().times(0);

    let service = TransferLedgerService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(transfers),
        clock_at(12),
    );
    let result = service.delete_transfer(TransferId::new(4)).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn purge_transfer_hard_deletes() {
    let mut transfers = MockTransferRepository::new();
    transfers
        .expect_hard_delete()
        .with(eq(TransferId::new(4)))
        .return_once(|_| Ok(true));
    transfers.expect_soft_delete().times(0);

    let service = TransferLedgerService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(transfers),
        clock_at(12),
    );

    service
        .purge_transfer(TransferId::new(4))
        .await
        .expect("purged");
}

#[rstest]
#[tokio::test]
async fn filter_transfers_forwards_criterion() {
    let mut transfers = MockTransferRepository::new();
    transfers
        .expect_filter_active()
        .with(eq(TransferFilter::Payer("Alice".to_owned())))
        .return_once(|_| Ok(Vec::new()));

    let service = TransferLedgerService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(transfers),
        clock_at(12),
    );
    let found = service
        .filter_transfers(TransferFilter::Payer("Alice".to_owned()))
        .await
        .expect("filtered");

    assert!(found.is_empty());
}

#[rstest]
#[case(Ok(1_000), Ok(1_000))]
#[case(Err(TransferPersistenceError::query("boom")), Err(ErrorCode::InternalError))]
#[tokio::test]
async fn transfer_total_reports_sum(
    #[case] outcome: Result<u64, TransferPersistenceError>,
    #[case] expected: Result<u64, ErrorCode>,
) {
    let mut transfers = MockTransferRepository::new();
    transfers
        .expect_total_active_value()
        .return_once(move || outcome);

    let service = TransferLedgerService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(transfers),
        clock_at(12),
    );
    let total = service.transfer_total().await.map_err(|err| err.code());

    assert_eq!(total, expected);
}
