//! Client-side precondition rules for state-changing calls.
//!
//! The rules run against already-fetched simulation snapshots and do no
//! I/O of their own. They exist to stop a submission the contract would
//! reject anyway. The contract stays the final arbiter: a ledger change
//! landing between the read and the submit can still invalidate a check
//! that passed here.
//!
//! Rules run in a fixed order and stop at the first failure.

use invlog_types::{
    Identity, InventoryItem, IssueRequest, RentalRecord, ReturnRequest, ValidationError,
};

/// Issuance rules that need nothing but the request itself.
///
/// Runs before any simulation, so a malformed request never costs a
/// read: the renter must be a canonical account address and both the
/// item id and the duration must be strictly positive.
pub fn check_issue_request(req: &IssueRequest) -> Result<(), ValidationError> {
    Identity::parse(&req.renter)?;
    if req.item_id == 0 {
        return Err(ValidationError::InvalidQuantity(
            "item id must be positive".to_string(),
        ));
    }
    if req.rental_days == 0 {
        return Err(ValidationError::InvalidQuantity(
            "rental days must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Issuance rules against the latest item snapshot: the item must exist,
/// be available, and the deposit must cover price times duration.
///
/// The deposit check is exact 128-bit integer arithmetic; monetary
/// amounts never touch floating point.
pub fn check_issue_against_item(
    req: &IssueRequest,
    item: Option<&InventoryItem>,
) -> Result<(), ValidationError> {
    let item =
        item.ok_or_else(|| ValidationError::NotFound(format!("item {}", req.item_id)))?;
    if !item.is_available {
        return Err(ValidationError::Unavailable(format!("item {}", req.item_id)));
    }
    let minimum = item
        .rental_price_per_day
        .checked_mul(req.rental_days as i128)
        .ok_or_else(|| {
            ValidationError::InvalidQuantity(
                "rental term overflows the deposit computation".to_string(),
            )
        })?;
    if req.deposit_amount < minimum {
        return Err(ValidationError::InsufficientDeposit { minimum });
    }
    Ok(())
}

/// Return rules that need nothing but the request itself.
pub fn check_return_request(req: &ReturnRequest) -> Result<(), ValidationError> {
    Identity::parse(&req.returner)?;
    if req.rental_id == 0 {
        return Err(ValidationError::InvalidQuantity(
            "rental id must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Return rules against the rental snapshot: the rental must exist,
/// still be active, and belong to the returner.
pub fn check_return_against_rental(
    req: &ReturnRequest,
    rental: Option<&RentalRecord>,
) -> Result<(), ValidationError> {
    let rental =
        rental.ok_or_else(|| ValidationError::NotFound(format!("rental {}", req.rental_id)))?;
    if !rental.is_active {
        return Err(ValidationError::Unavailable(format!(
            "rental {}",
            req.rental_id
        )));
    }
    if rental.renter.as_str() != req.returner.trim() {
        return Err(ValidationError::InvalidIdentity(
            "only the renter can return the item".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(fill: char) -> String {
        format!("G{}", fill.to_string().repeat(55))
    }

    fn issue_request() -> IssueRequest {
        IssueRequest {
            renter: address('B'),
            item_id: 3,
            rental_days: 5,
            deposit_amount: 50_000_000,
        }
    }

    fn item(price: i128, available: bool) -> InventoryItem {
        InventoryItem {
            item_id: 3,
            owner: Identity::parse(&address('A')).unwrap(),
            name: "Camera".to_string(),
            description: "Canon EOS R5".to_string(),
            rental_price_per_day: price,
            is_available: available,
        }
    }

    #[test]
    fn malformed_renter_is_rejected_first() {
        let req = IssueRequest {
            renter: "not-an-address".to_string(),
            item_id: 0,
            rental_days: 0,
            ..issue_request()
        };
        // Both quantities are bad too, but only the identity is reported
        assert!(matches!(
            check_issue_request(&req),
            Err(ValidationError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn zero_quantities_are_rejected_in_order() {
        let req = IssueRequest {
            item_id: 0,
            rental_days: 0,
            ..issue_request()
        };
        let err = check_issue_request(&req).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidQuantity("item id must be positive".to_string())
        );

        let req = IssueRequest {
            rental_days: 0,
            ..issue_request()
        };
        let err = check_issue_request(&req).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidQuantity("rental days must be positive".to_string())
        );
    }

    #[test]
    fn missing_item_is_not_found() {
        let err = check_issue_against_item(&issue_request(), None).unwrap_err();
        assert_eq!(err, ValidationError::NotFound("item 3".to_string()));
    }

    #[test]
    fn unavailable_item_is_rejected_before_economics() {
        // Deposit is far too low as well; availability is what's reported
        let req = IssueRequest {
            deposit_amount: 1,
            ..issue_request()
        };
        let err = check_issue_against_item(&req, Some(&item(10_000_000, false))).unwrap_err();
        assert_eq!(err, ValidationError::Unavailable("item 3".to_string()));
    }

    #[test]
    fn deposit_below_the_minimum_reports_the_minimum() {
        let req = IssueRequest {
            deposit_amount: 49_999_999,
            ..issue_request()
        };
        let err = check_issue_against_item(&req, Some(&item(10_000_000, true))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientDeposit {
                minimum: 50_000_000
            }
        );
    }

    #[test]
    fn deposit_at_the_exact_minimum_passes() {
        check_issue_against_item(&issue_request(), Some(&item(10_000_000, true))).unwrap();
    }

    #[test]
    fn economics_stay_exact_beyond_64_bits() {
        let price = 1i128 << 90;
        let req = IssueRequest {
            rental_days: 3,
            deposit_amount: price * 3 - 1,
            ..issue_request()
        };
        let err = check_issue_against_item(&req, Some(&item(price, true))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientDeposit { minimum: price * 3 }
        );

        let req = IssueRequest {
            rental_days: 3,
            deposit_amount: price * 3,
            ..issue_request()
        };
        check_issue_against_item(&req, Some(&item(price, true))).unwrap();
    }

    #[test]
    fn an_overflowing_term_is_rejected_rather_than_wrapped() {
        let req = IssueRequest {
            rental_days: 2,
            deposit_amount: i128::MAX,
            ..issue_request()
        };
        let err = check_issue_against_item(&req, Some(&item(i128::MAX, true))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidQuantity(_)));
    }

    fn rental(renter: &str, active: bool) -> RentalRecord {
        RentalRecord {
            rental_id: 9,
            item_id: 3,
            renter: Identity::parse(renter).unwrap(),
            issue_date: 1_700_000_000,
            expected_return_date: 1_700_432_000,
            actual_return_date: if active { None } else { Some(1_700_100_000) },
            deposit_amount: 50_000_000,
            is_active: active,
        }
    }

    #[test]
    fn return_rules_cover_the_rental_lifecycle() {
        let req = ReturnRequest {
            rental_id: 9,
            returner: address('B'),
        };

        check_return_request(&req).unwrap();
        check_return_against_rental(&req, Some(&rental(&address('B'), true))).unwrap();

        let err = check_return_against_rental(&req, None).unwrap_err();
        assert_eq!(err, ValidationError::NotFound("rental 9".to_string()));

        let err =
            check_return_against_rental(&req, Some(&rental(&address('B'), false))).unwrap_err();
        assert_eq!(err, ValidationError::Unavailable("rental 9".to_string()));

        let err =
            check_return_against_rental(&req, Some(&rental(&address('C'), true))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidIdentity(_)));
    }

    #[test]
    fn return_request_rules_run_in_order() {
        let req = ReturnRequest {
            rental_id: 0,
            returner: "junk".to_string(),
        };
        assert!(matches!(
            check_return_request(&req).unwrap_err(),
            ValidationError::InvalidIdentity(_)
        ));

        let req = ReturnRequest {
            rental_id: 0,
            returner: address('B'),
        };
        assert!(matches!(
            check_return_request(&req).unwrap_err(),
            ValidationError::InvalidQuantity(_)
        ));
    }
}
