/// Gift Lifecycle Tests
///
/// Tests for the gift flow from contribution to custodian decision:
/// - Gift request validation (POST /api/gifts)
/// - Approval state machine (pending -> approved / rejected, single-shot)
/// - Viewed timestamp semantics (first view wins)
/// - Guest gift adoption on contributor signup
/// - Gift link / sprout request code generation
///
/// NOTE: These tests validate request structures and business rules.
/// Full integration tests against a live database require running the test server.

// ---------------------------------------------------------------------------
// Request Structures
// ---------------------------------------------------------------------------

use bigdecimal::BigDecimal;
use std::str::FromStr;

#[derive(Debug, Clone)]
struct GiftRequest {
    contributor_name: String,
    contributor_email: Option<String>,
    amount: BigDecimal,
    message: Option<String>,
}

impl Default for GiftRequest {
    fn default() -> Self {
        Self {
            contributor_name: "Aunt Carol".to_string(),
            contributor_email: Some("carol@example.com".to_string()),
            amount: BigDecimal::from_str("25.00").unwrap(),
            message: Some("Happy birthday!".to_string()),
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    re.is_match(email)
}

fn validate_gift_request(req: &GiftRequest) -> Result<(), String> {
    if req.contributor_name.trim().is_empty() {
        return Err("Contributor name must not be empty".to_string());
    }
    if let Some(ref email) = req.contributor_email {
        if !is_valid_email(email) {
            return Err(format!("Invalid email: {}", email));
        }
    }
    if req.amount <= BigDecimal::from(0) {
        return Err("Gift amount must be positive".to_string());
    }
    if let Some(ref message) = req.message {
        if message.len() > 500 {
            return Err("Message too long".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod request_validation {
    use super::*;

    #[test]
    fn test_valid_default_request() {
        let req = GiftRequest::default();
        assert!(validate_gift_request(&req).is_ok());
    }

    #[test]
    fn test_guest_without_email_is_valid() {
        let req = GiftRequest { contributor_email: None, ..Default::default() };
        assert!(validate_gift_request(&req).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let req = GiftRequest { contributor_name: "   ".to_string(), ..Default::default() };
        assert!(validate_gift_request(&req).is_err());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let req = GiftRequest { amount: BigDecimal::from(0), ..Default::default() };
        assert!(validate_gift_request(&req).is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let req = GiftRequest {
            amount: BigDecimal::from_str("-10.00").unwrap(),
            ..Default::default()
        };
        assert!(validate_gift_request(&req).is_err());
    }

    #[test]
    fn test_malformed_email_rejected() {
        let req = GiftRequest {
            contributor_email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(validate_gift_request(&req).is_err());
    }

    #[test]
    fn test_email_without_tld_rejected() {
        let req = GiftRequest {
            contributor_email: Some("carol@localhost".to_string()),
            ..Default::default()
        };
        assert!(validate_gift_request(&req).is_err());
    }
}

// ---------------------------------------------------------------------------
// Approval State Machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum GiftStatus {
    Pending,
    Approved,
    Rejected,
}

/// A decision only lands on a pending gift; anything else is a conflict.
fn decide(status: &GiftStatus, approve: bool) -> Result<GiftStatus, String> {
    match status {
        GiftStatus::Pending => Ok(if approve { GiftStatus::Approved } else { GiftStatus::Rejected }),
        other => Err(format!("Gift already decided: {:?}", other)),
    }
}

#[cfg(test)]
mod approval_state_machine {
    use super::*;

    #[test]
    fn test_pending_can_be_approved() {
        assert_eq!(decide(&GiftStatus::Pending, true), Ok(GiftStatus::Approved));
    }

    #[test]
    fn test_pending_can_be_rejected() {
        assert_eq!(decide(&GiftStatus::Pending, false), Ok(GiftStatus::Rejected));
    }

    #[test]
    fn test_approved_cannot_be_approved_again() {
        assert!(decide(&GiftStatus::Approved, true).is_err());
    }

    #[test]
    fn test_approved_cannot_be_rejected() {
        assert!(decide(&GiftStatus::Approved, false).is_err());
    }

    #[test]
    fn test_rejected_cannot_be_approved() {
        assert!(decide(&GiftStatus::Rejected, true).is_err());
    }
}

// ---------------------------------------------------------------------------
// Viewed Timestamp
// ---------------------------------------------------------------------------

/// Mirrors `SET viewed_at = COALESCE(viewed_at, now())`: the first view sticks.
fn record_view(viewed_at: Option<i64>, now: i64) -> Option<i64> {
    viewed_at.or(Some(now))
}

#[cfg(test)]
mod viewed_timestamp {
    use super::*;

    #[test]
    fn test_first_view_sets_timestamp() {
        assert_eq!(record_view(None, 1_700_000_000), Some(1_700_000_000));
    }

    #[test]
    fn test_second_view_keeps_first_timestamp() {
        let first = record_view(None, 1_700_000_000);
        let second = record_view(first, 1_700_009_999);
        assert_eq!(second, Some(1_700_000_000));
    }
}

// ---------------------------------------------------------------------------
// Guest Gift Adoption
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct GiftRow {
    contributor_id: Option<uuid::Uuid>,
    contributor_email: Option<String>,
}

/// Mirrors the signup backfill: claim rows matching the new contributor's
/// email that no account owns yet.
fn adoptable(rows: &[GiftRow], email: &str) -> usize {
    rows.iter()
        .filter(|r| r.contributor_id.is_none() && r.contributor_email.as_deref() == Some(email))
        .count()
}

#[cfg(test)]
mod guest_adoption {
    use super::*;

    #[test]
    fn test_adopts_unowned_gifts_with_matching_email() {
        let rows = vec![
            GiftRow { contributor_id: None, contributor_email: Some("carol@example.com".into()) },
            GiftRow { contributor_id: None, contributor_email: Some("carol@example.com".into()) },
        ];
        assert_eq!(adoptable(&rows, "carol@example.com"), 2);
    }

    #[test]
    fn test_skips_gifts_already_owned() {
        let rows = vec![GiftRow {
            contributor_id: Some(uuid::Uuid::new_v4()),
            contributor_email: Some("carol@example.com".into()),
        }];
        assert_eq!(adoptable(&rows, "carol@example.com"), 0);
    }

    #[test]
    fn test_skips_other_emails_and_anonymous_gifts() {
        let rows = vec![
            GiftRow { contributor_id: None, contributor_email: Some("dave@example.com".into()) },
            GiftRow { contributor_id: None, contributor_email: None },
        ];
        assert_eq!(adoptable(&rows, "carol@example.com"), 0);
    }
}

// ---------------------------------------------------------------------------
// Share Codes
// ---------------------------------------------------------------------------

#[cfg(test)]
mod share_codes {
    use rand::distr::{Alphanumeric, SampleString};
    use std::collections::HashSet;

    fn generate_code(length: usize) -> String {
        Alphanumeric.sample_string(&mut rand::rng(), length)
    }

    #[test]
    fn test_code_is_alphanumeric_with_requested_length() {
        let code = generate_code(10);
        assert_eq!(code.len(), 10);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_codes_do_not_collide_in_small_sample() {
        let codes: HashSet<String> = (0..200).map(|_| generate_code(10)).collect();
        assert_eq!(codes.len(), 200);
    }
}
