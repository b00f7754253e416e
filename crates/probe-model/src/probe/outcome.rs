use serde::Serialize;

use super::flags::Flag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    #[serde(rename = "TOTAL_REVENUE_5CR_FLAG")]
    pub total_revenue: Flag,
    #[serde(rename = "BORROWING_TO_REVENUE_FLAG")]
    pub borrowing_to_revenue: Flag,
    #[serde(rename = "ISCR_FLAG")]
    pub iscr: Flag,
}

/// Raw and derived values behind the flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calculations {
    pub total_revenue: f64,
    pub borrowing_to_revenue_ratio: f64,
    pub iscr: f64,
}

/// Output of one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub flags: FlagSet,
    pub calculations: Calculations,
    pub financial_index_used: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_keys() {
        let result = ProbeResult {
            flags: FlagSet {
                total_revenue: Flag::Red,
                borrowing_to_revenue: Flag::Amber,
                iscr: Flag::Green,
            },
            calculations: Calculations {
                total_revenue: 10_000_000.0,
                borrowing_to_revenue_ratio: 0.6,
                iscr: 2.5,
            },
            financial_index_used: 1,
        };

        let value = serde_json::to_value(&result).expect("serializes");

        assert_eq!(
            value,
            json!({
                "flags": {
                    "TOTAL_REVENUE_5CR_FLAG": 0,
                    "BORROWING_TO_REVENUE_FLAG": 2,
                    "ISCR_FLAG": 1
                },
                "calculations": {
                    "total_revenue": 10_000_000.0,
                    "borrowing_to_revenue_ratio": 0.6,
                    "iscr": 2.5
                },
                "financial_index_used": 1
            })
        );
    }
}
