//! Self-employment tax calculation.
//!
//! Follows the Form 1040-ES self-employment worksheet: net earnings are
//! adjusted by 92.35%, social security tax applies up to the annual wage
//! base, and medicare tax applies uncapped. The additional medicare surtax
//! for high earners is out of scope.

use rust_decimal::Decimal;

use crate::config::SelfEmploymentConfig;

use super::common::round_half_up;

/// The result of a self-employment tax calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeTaxResult {
    /// Net earnings after the 92.35% adjustment.
    pub adjusted_earnings: Decimal,
    /// Social security component, capped at the wage base.
    pub social_security_tax: Decimal,
    /// Medicare component, uncapped.
    pub medicare_tax: Decimal,
    /// Total self-employment tax.
    pub total: Decimal,
}

impl SeTaxResult {
    fn zero() -> Self {
        Self {
            adjusted_earnings: Decimal::ZERO,
            social_security_tax: Decimal::ZERO,
            medicare_tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Calculates self-employment tax on net earnings.
///
/// Earnings below the $400 worksheet floor (or negative) owe no tax.
/// Otherwise the adjusted earnings are `net_earnings x 0.9235`; social
/// security tax is 12.4% of the adjusted earnings capped at the wage base,
/// and medicare tax is 2.9% uncapped. Components are rounded to cents
/// independently and the total is their sum.
///
/// # Arguments
///
/// * `net_earnings` - Net self-employment earnings for the year
/// * `config` - Worksheet parameters from `federal.yaml`
///
/// # Example
///
/// ```no_run
/// use traveltax_engine::calculation::calculate_se_tax;
/// use traveltax_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/us2024").unwrap();
/// let result = calculate_se_tax(Decimal::from(50000), loader.self_employment());
/// assert_eq!(result.total, Decimal::from_str("7064.78").unwrap());
/// ```
pub fn calculate_se_tax(net_earnings: Decimal, config: &SelfEmploymentConfig) -> SeTaxResult {
    if net_earnings < config.minimum_net_earnings {
        return SeTaxResult::zero();
    }

    let adjusted = net_earnings * config.net_earnings_factor;
    let social_security_tax = round_half_up(adjusted.min(config.ss_wage_base) * config.ss_rate);
    let medicare_tax = round_half_up(adjusted * config.medicare_rate);

    SeTaxResult {
        adjusted_earnings: adjusted,
        social_security_tax,
        medicare_tax,
        total: social_security_tax + medicare_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> SelfEmploymentConfig {
        SelfEmploymentConfig {
            ss_wage_base: dec("168600"),
            ss_rate: dec("0.124"),
            medicare_rate: dec("0.029"),
            net_earnings_factor: dec("0.9235"),
            minimum_net_earnings: dec("400"),
        }
    }

    /// SE-001: worksheet result for 50,000 of net earnings
    #[test]
    fn test_se_tax_on_50000() {
        let result = calculate_se_tax(dec("50000"), &config());

        assert_eq!(result.adjusted_earnings, dec("46175.0000"));
        assert_eq!(result.social_security_tax, dec("5725.70"));
        assert_eq!(result.medicare_tax, dec("1339.08"));
        assert_eq!(result.total, dec("7064.78"));
    }

    /// SE-002: earnings below the $400 floor owe nothing
    #[test]
    fn test_below_minimum_owes_nothing() {
        let result = calculate_se_tax(dec("399.99"), &config());
        assert_eq!(result.total, Decimal::ZERO);

        let result = calculate_se_tax(Decimal::ZERO, &config());
        assert_eq!(result.total, Decimal::ZERO);

        let result = calculate_se_tax(dec("-10000"), &config());
        assert_eq!(result.total, Decimal::ZERO);
    }

    /// SE-003: exactly $400 is taxed
    #[test]
    fn test_exactly_minimum_is_taxed() {
        let result = calculate_se_tax(dec("400"), &config());

        // 400 x 0.9235 = 369.40; SS 45.81, medicare 10.71
        assert_eq!(result.social_security_tax, dec("45.81"));
        assert_eq!(result.medicare_tax, dec("10.71"));
        assert!(result.total > Decimal::ZERO);
    }

    /// SE-004: social security caps at the wage base, medicare does not
    #[test]
    fn test_wage_base_caps_social_security() {
        let result = calculate_se_tax(dec("250000"), &config());

        // 250000 x 0.9235 = 230875 > 168600, so SS is capped.
        assert_eq!(result.social_security_tax, dec("20906.40"));
        assert_eq!(result.medicare_tax, round_half_up(dec("230875") * dec("0.029")));
        assert_eq!(
            result.total,
            result.social_security_tax + result.medicare_tax
        );
    }

    /// SE-005: total equals the sum of independently rounded components
    #[test]
    fn test_total_is_sum_of_components() {
        let result = calculate_se_tax(dec("87654.32"), &config());
        assert_eq!(
            result.total,
            result.social_security_tax + result.medicare_tax
        );
    }
}
