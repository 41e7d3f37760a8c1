use serde::{Deserialize, Serialize};

/// Count, sum and mean of all account balances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountAggregate {
    pub count: i64,
    pub sum: f64,
    pub average: f64,
}

impl AccountAggregate {
    /// Build from the raw store totals. The store reports no sum for an
    /// empty table; the average of zero accounts is 0.
    pub fn from_totals(count: i64, sum: Option<f64>) -> Self {
        let sum = sum.unwrap_or(0.0);
        let average = if count > 0 { sum / count as f64 } else { 0.0 };
        Self {
            count,
            sum,
            average,
        }
    }
}

/// Transaction count plus the summed amounts per transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAggregate {
    pub count: i64,
    pub sum_deposits: f64,
    pub sum_withdrawals: f64,
}

impl TransactionAggregate {
    pub fn from_totals(count: i64, deposits: Option<f64>, withdrawals: Option<f64>) -> Self {
        Self {
            count,
            sum_deposits: deposits.unwrap_or(0.0),
            sum_withdrawals: withdrawals.unwrap_or(0.0),
        }
    }
}
