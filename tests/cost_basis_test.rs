/// Cost Basis Accuracy Tests
///
/// Tests for the fractional-share and weighted-average-cost arithmetic used
/// when an approved gift is folded into a child's holding.

use bigdecimal::BigDecimal;
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// Shares are kept to 6 decimal places, money to 2. Two guard digits are
/// carried before the final half-away-from-zero rounding.
fn quantize_shares(value: BigDecimal) -> BigDecimal {
    value.with_scale(8).round(6)
}

fn quantize_money(value: BigDecimal) -> BigDecimal {
    value.with_scale(4).round(2)
}

/// shares = amount / price, or None when the amount is too small to buy
/// anything at that price.
fn shares_for_amount(amount: &BigDecimal, price: &BigDecimal) -> Option<BigDecimal> {
    if price <= &BigDecimal::from(0) {
        return None;
    }
    let shares = quantize_shares(amount / price);
    if shares <= BigDecimal::from(0) {
        None
    } else {
        Some(shares)
    }
}

#[derive(Debug, PartialEq)]
struct Position {
    shares: BigDecimal,
    average_cost: BigDecimal,
    current_value: BigDecimal,
}

/// new_avg = (old_avg * old_shares + gift_amount) / (old_shares + gift_shares)
fn merge_position(
    old_shares: &BigDecimal,
    old_average_cost: &BigDecimal,
    gift_shares: &BigDecimal,
    gift_amount: &BigDecimal,
    price: &BigDecimal,
) -> Position {
    let shares = old_shares + gift_shares;
    let invested = old_average_cost * old_shares + gift_amount;
    Position {
        average_cost: quantize_money(&invested / &shares),
        current_value: quantize_money(&shares * price),
        shares,
    }
}

// ---------------------------------------------------------------------------
// Share Purchase
// ---------------------------------------------------------------------------

#[cfg(test)]
mod share_purchase {
    use super::*;

    #[test]
    fn test_whole_share_purchase() {
        let shares = shares_for_amount(&dec("150.00"), &dec("50.00")).unwrap();
        assert_eq!(shares.to_string(), "3.000000");
    }

    #[test]
    fn test_fractional_share_purchase() {
        // $25 of a $227.52 stock
        let shares = shares_for_amount(&dec("25.00"), &dec("227.52")).unwrap();
        assert_eq!(shares.to_string(), "0.109880");
    }

    #[test]
    fn test_repeating_decimal_is_truncated_then_rounded() {
        let shares = shares_for_amount(&dec("100.00"), &dec("3.00")).unwrap();
        assert_eq!(shares.to_string(), "33.333333");
    }

    #[test]
    fn test_amount_too_small_for_price_is_rejected() {
        // A cent of a ~$64k asset rounds to zero shares at 6 decimal places
        assert!(shares_for_amount(&dec("0.01"), &dec("64250.00")).is_none());
    }

    #[test]
    fn test_zero_price_is_rejected() {
        assert!(shares_for_amount(&dec("25.00"), &dec("0")).is_none());
    }
}

// ---------------------------------------------------------------------------
// Weighted Average Cost
// ---------------------------------------------------------------------------

#[cfg(test)]
mod weighted_average_cost {
    use super::*;

    #[test]
    fn test_first_gift_sets_basis_to_purchase_price() {
        let gift_shares = shares_for_amount(&dec("150.00"), &dec("50.00")).unwrap();
        let pos = merge_position(
            &dec("0"),
            &dec("0"),
            &gift_shares,
            &dec("150.00"),
            &dec("50.00"),
        );
        assert_eq!(pos.shares.to_string(), "3.000000");
        assert_eq!(pos.average_cost.to_string(), "50.00");
        assert_eq!(pos.current_value.to_string(), "150.00");
    }

    #[test]
    fn test_second_gift_at_higher_price_blends_basis() {
        // 3 shares at $50, then $120 more at $60: 5 shares, $270 in, avg $54
        let gift_shares = shares_for_amount(&dec("120.00"), &dec("60.00")).unwrap();
        let pos = merge_position(
            &dec("3.000000"),
            &dec("50.00"),
            &gift_shares,
            &dec("120.00"),
            &dec("60.00"),
        );
        assert_eq!(pos.shares.to_string(), "5.000000");
        assert_eq!(pos.average_cost.to_string(), "54.00");
        assert_eq!(pos.current_value.to_string(), "300.00");
    }

    #[test]
    fn test_gift_at_lower_price_drags_basis_down() {
        // 2 shares at $100, then $100 more at $50: 4 shares, $300 in, avg $75
        let gift_shares = shares_for_amount(&dec("100.00"), &dec("50.00")).unwrap();
        let pos = merge_position(
            &dec("2.000000"),
            &dec("100.00"),
            &gift_shares,
            &dec("100.00"),
            &dec("50.00"),
        );
        assert_eq!(pos.shares.to_string(), "4.000000");
        assert_eq!(pos.average_cost.to_string(), "75.00");
        assert_eq!(pos.current_value.to_string(), "200.00");
    }

    #[test]
    fn test_fractional_merge_stays_on_scale() {
        let first = shares_for_amount(&dec("25.00"), &dec("227.52")).unwrap();
        let second = shares_for_amount(&dec("40.00"), &dec("231.10")).unwrap();
        let pos = merge_position(&first, &dec("227.52"), &second, &dec("40.00"), &dec("231.10"));
        // 0.109880 + 0.173085 shares, $65 invested between the two gifts
        assert_eq!(pos.shares.to_string(), "0.282965");
        assert_eq!(pos.average_cost.to_string(), "229.71");
        assert_eq!(pos.current_value.to_string(), "65.39");
    }
}

// ---------------------------------------------------------------------------
// Rounding Policy
// ---------------------------------------------------------------------------

#[cfg(test)]
mod rounding_policy {
    use super::*;

    #[test]
    fn test_money_ties_round_away_from_zero() {
        assert_eq!(quantize_money(dec("10.005")).to_string(), "10.01");
        assert_eq!(quantize_money(dec("-10.005")).to_string(), "-10.01");
    }

    #[test]
    fn test_money_below_tie_rounds_down() {
        assert_eq!(quantize_money(dec("10.0049")).to_string(), "10.00");
    }

    #[test]
    fn test_shares_round_at_sixth_decimal() {
        assert_eq!(quantize_shares(dec("0.1234564")).to_string(), "0.123456");
        assert_eq!(quantize_shares(dec("0.1234565")).to_string(), "0.123457");
    }

    #[test]
    fn test_long_division_output_survives_quantization() {
        // 1/3 produces a very wide decimal; quantization must not choke on it
        let shares = quantize_shares(&dec("1") / &dec("3"));
        assert_eq!(shares.to_string(), "0.333333");
    }
}
