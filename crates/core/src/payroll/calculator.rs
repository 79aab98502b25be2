//! Pay stub calculator.

use abacus_shared::config::PayrollConfig;
use abacus_shared::types::round_money;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::PayrollError;
use super::types::{
    CompensationBasis, Deduction, DeductionKind, DeductionRule, EmploymentClass, PayRequest,
    PayRunResult, PayStub,
};

/// Name of the default contractor withholding deduction.
pub const CONTRACTOR_WITHHOLDING: &str = "Contractor Withholding";

/// Settings shared by every pay computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollSettings {
    /// Hours paid to an hourly worker when neither an override nor
    /// scheduled hours are supplied.
    pub default_hours: Decimal,
    /// Withholding applied to contractors when the caller supplies no rule
    /// for them.
    pub contractor_withholding: DeductionRule,
}

impl PayrollSettings {
    /// Builds the default contractor withholding rule.
    #[must_use]
    pub fn contractor_rule(threshold: Decimal, rate_percent: Decimal) -> DeductionRule {
        DeductionRule::percentage(
            CONTRACTOR_WITHHOLDING,
            rate_percent,
            [EmploymentClass::Contractor],
        )
        .with_threshold(threshold)
    }
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self::from(&PayrollConfig::default())
    }
}

impl From<&PayrollConfig> for PayrollSettings {
    fn from(config: &PayrollConfig) -> Self {
        Self {
            default_hours: config.default_hours,
            contractor_withholding: Self::contractor_rule(
                config.contractor_threshold,
                config.contractor_rate_percent,
            ),
        }
    }
}

/// Computes gross pay, itemized deductions, and net pay.
#[derive(Debug, Clone, Default)]
pub struct PayrollCalculator {
    settings: PayrollSettings,
}

impl PayrollCalculator {
    /// Creates a calculator with the given settings.
    #[must_use]
    pub fn new(settings: PayrollSettings) -> Self {
        Self { settings }
    }

    /// Returns the calculator settings.
    #[must_use]
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Computes a pay stub.
    ///
    /// Gross pay:
    /// - Hourly: hours × rate, hours from `hours_override`, then the basis,
    ///   then the configured default
    /// - FixedSalary: the rate; hours are ignored
    /// - Contractor: the rate
    ///
    /// `gross_override` replaces the derived gross for every class; an
    /// overridden hourly stub reports no `hours_worked`, since hours no
    /// longer determine the pay.
    ///
    /// Contractors get exactly one withholding rule: the first caller rule
    /// that applies to contractors, or the configured default. Other
    /// classes get every applicable rule in declaration order, with
    /// non-positive percentage results left off the stub.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::NegativeValue` naming the first negative
    /// rate, hours, override, or rule field, and `PayrollError::Overflow`
    /// when gross pay, a deduction, or the deduction total leaves the
    /// decimal range.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use abacus_core::payroll::{
    ///     CompensationBasis, DeductionRule, EmploymentClass, PayrollCalculator,
    /// };
    ///
    /// let calculator = PayrollCalculator::default();
    /// let rules = vec![DeductionRule::percentage("SS", dec!(6.20), [EmploymentClass::Hourly])];
    ///
    /// let stub = calculator
    ///     .compute_pay(&CompensationBasis::hourly(dec!(20.00)), Some(dec!(45)), None, &rules)
    ///     .unwrap();
    /// assert_eq!(stub.gross_pay, dec!(900.00));
    /// assert_eq!(stub.deduction("SS"), Some(dec!(55.80)));
    /// assert_eq!(stub.net_pay, dec!(844.20));
    /// ```
    pub fn compute_pay(
        &self,
        basis: &CompensationBasis,
        hours_override: Option<Decimal>,
        gross_override: Option<Decimal>,
        rules: &[DeductionRule],
    ) -> Result<PayStub, PayrollError> {
        Self::validate(basis, hours_override, gross_override, rules)?;

        let class = basis.employment_class;
        let hours_worked = match (class, gross_override) {
            (EmploymentClass::Hourly, None) => Some(
                hours_override
                    .or(basis.hours)
                    .unwrap_or(self.settings.default_hours),
            ),
            _ => None,
        };

        let gross = match (gross_override, hours_worked) {
            (Some(gross), _) => gross,
            (None, Some(hours)) => hours
                .checked_mul(basis.rate)
                .ok_or_else(|| overflow("gross_pay"))?,
            (None, None) => basis.rate,
        };
        let gross_pay = round_money(gross);

        let deductions = match class {
            EmploymentClass::Contractor => self.contractor_deductions(gross_pay, rules)?,
            EmploymentClass::Hourly | EmploymentClass::FixedSalary => {
                Self::employee_deductions(class, gross_pay, rules)?
            }
        };

        let total_deductions = deductions
            .iter()
            .try_fold(Decimal::ZERO, |total, d| total.checked_add(d.amount))
            .map(round_money)
            .ok_or_else(|| overflow("total_deductions"))?;
        let net_pay = round_money((gross_pay - total_deductions).max(Decimal::ZERO));

        debug!(
            ?class,
            %gross_pay,
            deductions = deductions.len(),
            %total_deductions,
            %net_pay,
            "Computed pay stub"
        );

        Ok(PayStub {
            employment_class: class,
            hours_worked,
            gross_pay,
            deductions,
            total_deductions,
            net_pay,
        })
    }

    /// Computes a stub from a bundled request.
    ///
    /// # Errors
    ///
    /// Same as [`Self::compute_pay`].
    pub fn compute(&self, request: &PayRequest) -> Result<PayStub, PayrollError> {
        self.compute_pay(
            &request.basis,
            request.hours_override,
            request.gross_override,
            &request.rules,
        )
    }

    /// Computes many independent stubs in parallel.
    ///
    /// Results keep the order of `requests`; a malformed request fails on
    /// its own without affecting the others.
    pub fn compute_pay_run(&self, requests: &[PayRequest]) -> Vec<PayRunResult> {
        let results: Vec<PayRunResult> = requests
            .par_iter()
            .map(|request| PayRunResult {
                employee_id: request.employee_id,
                stub: self.compute(request),
            })
            .collect();

        let failed = results.iter().filter(|r| r.stub.is_err()).count();
        debug!(requests = requests.len(), failed, "Computed pay run");

        results
    }

    /// Applies the single withholding rule for contractors.
    fn contractor_deductions(
        &self,
        gross: Decimal,
        rules: &[DeductionRule],
    ) -> Result<Vec<Deduction>, PayrollError> {
        let (field, rule) = rules
            .iter()
            .enumerate()
            .find(|(_, r)| r.applies(EmploymentClass::Contractor))
            .map_or_else(
                || ("contractor_withholding".to_string(), &self.settings.contractor_withholding),
                |(idx, rule)| (format!("rules[{idx}]"), rule),
            );

        let amount = round_money(rule.amount_for(gross).ok_or_else(|| overflow(&field))?);
        if amount > Decimal::ZERO {
            Ok(vec![Deduction {
                name: rule.name.clone(),
                amount,
            }])
        } else {
            Ok(Vec::new())
        }
    }

    /// Applies every rule for the class in declaration order.
    fn employee_deductions(
        class: EmploymentClass,
        gross: Decimal,
        rules: &[DeductionRule],
    ) -> Result<Vec<Deduction>, PayrollError> {
        rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.applies(class))
            .filter_map(|(idx, rule)| {
                let Some(raw) = rule.amount_for(gross) else {
                    return Some(Err(overflow(&format!("rules[{idx}]"))));
                };
                let amount = round_money(raw);
                let keep = match rule.kind {
                    DeductionKind::Percentage => amount > Decimal::ZERO,
                    DeductionKind::FixedAmount => true,
                };
                keep.then(|| {
                    Ok(Deduction {
                        name: rule.name.clone(),
                        amount,
                    })
                })
            })
            .collect()
    }

    /// Fails on the first negative field.
    fn validate(
        basis: &CompensationBasis,
        hours_override: Option<Decimal>,
        gross_override: Option<Decimal>,
        rules: &[DeductionRule],
    ) -> Result<(), PayrollError> {
        let checks = [
            ("basis.rate", Some(basis.rate)),
            ("basis.hours", basis.hours),
            ("hours_override", hours_override),
            ("gross_override", gross_override),
        ];
        for (field, value) in checks {
            if let Some(value) = value
                && value < Decimal::ZERO
            {
                return Err(PayrollError::NegativeValue {
                    field: field.to_string(),
                    value,
                });
            }
        }

        rules
            .iter()
            .enumerate()
            .try_for_each(|(idx, rule)| rule.validate(idx))
    }
}

fn overflow(field: &str) -> PayrollError {
    PayrollError::Overflow {
        field: field.to_string(),
    }
}
