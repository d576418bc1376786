//! Stipend and job-offer comparison calculations.
//!
//! Weekly pay arithmetic lives on [`JobOffer`] itself; this module adds the
//! derived comparisons: take-home pay under assumed tax rates, overtime
//! totals, GSA per-diem compliance of the stipends, and ranking a set of
//! offers by weekly take-home pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{PerDiemConfig, TaxConfig};
use crate::models::JobOffer;

use super::brackets::marginal_rate;
use super::common::round_half_up;

const DAYS_PER_WEEK: Decimal = Decimal::from_parts(7, 0, 0, false, 0);
const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Whether an offer's weekly stipends fit inside the GSA per-diem ceilings.
///
/// Stipends above the ceilings do not void an offer, but the excess is at
/// risk of being treated as taxable wages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerDiemCompliance {
    /// Housing stipend per day (weekly stipend over seven days).
    pub daily_housing: Decimal,
    /// Meals stipend per day.
    pub daily_meals: Decimal,
    /// Whether the daily housing stipend is within the lodging ceiling.
    pub housing_compliant: bool,
    /// Whether the daily meals stipend is within the meals ceiling.
    pub meals_compliant: bool,
    /// Both components within their ceilings.
    pub compliant: bool,
}

/// One offer's position in a ranked comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedOffer {
    /// 1-based rank, best first.
    pub rank: u32,
    /// Index of the offer in the submitted list.
    pub offer_index: usize,
    /// Weekly take-home pay under the assumed rates.
    pub weekly_take_home: Decimal,
    /// Take-home projected over the contract length.
    pub contract_take_home: Decimal,
    /// Blended hourly rate of the offer.
    pub blended_hourly_rate: Decimal,
    /// Percentage of weekly gross paid as stipends.
    pub non_taxable_percentage: Decimal,
    /// The federal rate used (supplied or estimated per offer).
    pub federal_rate_used: Decimal,
    /// GSA per-diem compliance of the stipends.
    pub per_diem: PerDiemCompliance,
}

/// The result of comparing a set of offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferComparison {
    /// Offers ranked by weekly take-home, best first; ties keep
    /// submission order.
    pub rankings: Vec<RankedOffer>,
    /// Index (into the submitted list) of the best offer.
    pub best_offer_index: Option<usize>,
}

/// Weekly take-home pay under assumed federal and state withholding rates.
///
/// Only the taxable wage is reduced; stipends pass through untaxed:
/// `taxable x (1 - federal - state) + stipends`, rounded to cents.
pub fn weekly_take_home(offer: &JobOffer, federal_rate: Decimal, state_rate: Decimal) -> Decimal {
    let keep_rate = Decimal::ONE - federal_rate - state_rate;
    round_half_up(offer.weekly_taxable() * keep_rate + offer.weekly_stipends())
}

/// Weekly gross including overtime hours.
///
/// Overtime pays at the offer's overtime rate, or time-and-a-half of the
/// base rate when the offer does not name one.
pub fn weekly_total_with_overtime(offer: &JobOffer, overtime_hours: Decimal) -> Decimal {
    let overtime_rate = offer
        .overtime_rate
        .unwrap_or_else(|| offer.hourly_rate * Decimal::new(15, 1));
    offer.weekly_gross() + overtime_rate * overtime_hours
}

/// Checks an offer's stipends against the GSA per-diem daily ceilings.
///
/// Weekly stipends are spread over seven days and each component is
/// compared to its ceiling; overall compliance requires both.
pub fn check_per_diem_compliance(offer: &JobOffer, limits: &PerDiemConfig) -> PerDiemCompliance {
    let daily_housing = round_half_up(offer.housing_stipend / DAYS_PER_WEEK);
    let daily_meals = round_half_up(offer.meals_stipend / DAYS_PER_WEEK);

    let housing_compliant = daily_housing <= limits.daily_lodging_limit;
    let meals_compliant = daily_meals <= limits.daily_meals_limit;

    PerDiemCompliance {
        daily_housing,
        daily_meals,
        housing_compliant,
        meals_compliant,
        compliant: housing_compliant && meals_compliant,
    }
}

/// Estimates the federal marginal rate for an offer's pay level.
///
/// The weekly taxable wage is annualized over 52 weeks and looked up in the
/// federal bracket table.
pub fn estimate_federal_tax_bracket(offer: &JobOffer, config: &TaxConfig) -> Decimal {
    let annualized = offer.weekly_taxable() * WEEKS_PER_YEAR;
    marginal_rate(annualized, config.federal_brackets())
}

/// Ranks offers by weekly take-home pay, best first.
///
/// When `federal_rate` is `None` each offer uses its own estimated marginal
/// bracket (see [`estimate_federal_tax_bracket`]); `state_rate` defaults to
/// zero. The sort is stable, so offers with equal take-home keep their
/// submission order. Contract take-home projects the weekly figure over the
/// offer's contract length.
pub fn rank_offers(
    offers: &[JobOffer],
    federal_rate: Option<Decimal>,
    state_rate: Option<Decimal>,
    config: &TaxConfig,
) -> OfferComparison {
    let state_rate = state_rate.unwrap_or(Decimal::ZERO);

    let mut rankings: Vec<RankedOffer> = offers
        .iter()
        .enumerate()
        .map(|(offer_index, offer)| {
            let federal = federal_rate.unwrap_or_else(|| estimate_federal_tax_bracket(offer, config));
            let weekly = weekly_take_home(offer, federal, state_rate);
            RankedOffer {
                rank: 0,
                offer_index,
                weekly_take_home: weekly,
                contract_take_home: weekly * Decimal::from(offer.contract_weeks),
                blended_hourly_rate: offer.blended_hourly_rate(),
                non_taxable_percentage: offer.non_taxable_percentage(),
                federal_rate_used: federal,
                per_diem: check_per_diem_compliance(offer, config.per_diem()),
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.weekly_take_home.cmp(&a.weekly_take_home));
    for (i, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = i as u32 + 1;
    }

    let best_offer_index = rankings.first().map(|r| r.offer_index);

    OfferComparison {
        rankings,
        best_offer_index,
    }
}

/// Returns the index of the best offer by weekly take-home pay.
pub fn best_offer(
    offers: &[JobOffer],
    federal_rate: Option<Decimal>,
    state_rate: Option<Decimal>,
    config: &TaxConfig,
) -> Option<usize> {
    rank_offers(offers, federal_rate, state_rate, config).best_offer_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> TaxConfig {
        ConfigLoader::load("./config/us2024").unwrap().config().clone()
    }

    fn offer(hourly: &str, hours: &str, housing: &str, meals: &str) -> JobOffer {
        JobOffer {
            hourly_rate: dec(hourly),
            hours_per_week: dec(hours),
            housing_stipend: dec(housing),
            meals_stipend: dec(meals),
            travel_reimbursement: Decimal::ZERO,
            overtime_rate: None,
            sign_on_bonus: None,
            completion_bonus: None,
            referral_bonus: None,
            contract_weeks: 13,
            state: None,
        }
    }

    /// SP-001: take-home taxes wages only, stipends pass through
    #[test]
    fn test_weekly_take_home() {
        let offer = offer("35", "36", "2100", "553");

        // 1260 x (1 - 0.22 - 0.05) + 2653 = 919.80 + 2653.
        let take_home = weekly_take_home(&offer, dec("0.22"), dec("0.05"));
        assert_eq!(take_home, dec("3572.80"));
    }

    /// SP-002: zero rates take home the full gross
    #[test]
    fn test_take_home_with_zero_rates() {
        let offer = offer("35", "36", "2100", "553");
        assert_eq!(
            weekly_take_home(&offer, Decimal::ZERO, Decimal::ZERO),
            dec("3913.00")
        );
    }

    /// SP-003: overtime uses the named rate, else time and a half
    #[test]
    fn test_weekly_total_with_overtime() {
        let mut o = offer("35", "36", "2100", "553");

        // No named rate: 3913 + 52.50 x 8.
        assert_eq!(weekly_total_with_overtime(&o, dec("8")), dec("4333.00"));

        o.overtime_rate = Some(dec("60"));
        assert_eq!(weekly_total_with_overtime(&o, dec("8")), dec("4393"));
    }

    /// SP-004: per-diem compliance compares daily stipends to ceilings
    #[test]
    fn test_per_diem_compliance() {
        let config = config();

        // 2100/7 = 300/day lodging, 553/7 = 79/day meals; both exceed the
        // standard CONUS ceilings (107 and 59).
        let rich = check_per_diem_compliance(&offer("35", "36", "2100", "553"), config.per_diem());
        assert_eq!(rich.daily_housing, dec("300.00"));
        assert_eq!(rich.daily_meals, dec("79.00"));
        assert!(!rich.housing_compliant);
        assert!(!rich.meals_compliant);
        assert!(!rich.compliant);

        // 700/7 = 100/day, 350/7 = 50/day; both inside the ceilings.
        let modest = check_per_diem_compliance(&offer("35", "36", "700", "350"), config.per_diem());
        assert!(modest.housing_compliant);
        assert!(modest.meals_compliant);
        assert!(modest.compliant);
    }

    /// SP-005: one non-compliant component fails the whole check
    #[test]
    fn test_per_diem_partial_compliance() {
        let config = config();
        let result = check_per_diem_compliance(&offer("35", "36", "700", "553"), config.per_diem());

        assert!(result.housing_compliant);
        assert!(!result.meals_compliant);
        assert!(!result.compliant);
    }

    /// SP-006: bracket estimation annualizes the taxable wage
    #[test]
    fn test_estimate_federal_tax_bracket() {
        let config = config();

        // 1260/week x 52 = 65,520 -> 22% bracket.
        assert_eq!(
            estimate_federal_tax_bracket(&offer("35", "36", "2100", "553"), &config),
            dec("0.22")
        );

        // 20/week x 20 hours x 52 = 20,800 -> 12% bracket.
        assert_eq!(
            estimate_federal_tax_bracket(&offer("20", "20", "0", "0"), &config),
            dec("0.12")
        );
    }

    /// SP-007: ranking is descending by take-home with stable ties
    #[test]
    fn test_rank_offers() {
        let config = config();
        let offers = vec![
            offer("35", "36", "1000", "300"),
            offer("55", "36", "1500", "400"),
            offer("35", "36", "1000", "300"),
        ];

        let comparison = rank_offers(&offers, Some(dec("0.22")), None, &config);

        assert_eq!(comparison.rankings.len(), 3);
        assert_eq!(comparison.rankings[0].offer_index, 1);
        assert_eq!(comparison.rankings[0].rank, 1);
        // Equal offers keep submission order.
        assert_eq!(comparison.rankings[1].offer_index, 0);
        assert_eq!(comparison.rankings[2].offer_index, 2);
        assert_eq!(comparison.best_offer_index, Some(1));
    }

    /// SP-008: omitted federal rate is estimated per offer
    #[test]
    fn test_rank_offers_estimates_rates() {
        let config = config();
        let offers = vec![offer("35", "36", "1000", "300"), offer("20", "20", "0", "0")];

        let comparison = rank_offers(&offers, None, None, &config);

        let high = comparison.rankings.iter().find(|r| r.offer_index == 0).unwrap();
        let low = comparison.rankings.iter().find(|r| r.offer_index == 1).unwrap();
        assert_eq!(high.federal_rate_used, dec("0.22"));
        assert_eq!(low.federal_rate_used, dec("0.12"));
    }

    /// SP-009: contract take-home projects over the contract length
    #[test]
    fn test_contract_take_home_projection() {
        let config = config();
        let offers = vec![offer("35", "36", "2100", "553")];

        let comparison = rank_offers(&offers, Some(Decimal::ZERO), None, &config);
        assert_eq!(
            comparison.rankings[0].contract_take_home,
            dec("3913.00") * Decimal::from(13u32)
        );
    }

    /// SP-010: empty offer list has no best offer
    #[test]
    fn test_empty_offer_list() {
        let config = config();
        let comparison = rank_offers(&[], None, None, &config);
        assert!(comparison.rankings.is_empty());
        assert!(comparison.best_offer_index.is_none());
        assert_eq!(best_offer(&[], None, None, &config), None);
    }
}
