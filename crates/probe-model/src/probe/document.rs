use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Nature tag identifying a single-entity (non-consolidated) statement.
pub const STANDALONE_NATURE: &str = "STANDALONE";

/// Nature tag used by group-level statements.
pub const CONSOLIDATED_NATURE: &str = "CONSOLIDATED";

/// Parsed financial statement document. Entry order is significant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<Vec<FinancialEntry>>,
}

impl Document {
    pub fn new(entries: Vec<FinancialEntry>) -> Self {
        Self {
            financials: Some(entries),
        }
    }

    /// Entries in document order; an absent list reads as empty.
    pub fn entries(&self) -> &[FinancialEntry] {
        self.financials.as_deref().unwrap_or_default()
    }

    pub fn entry(&self, index: usize) -> Option<&FinancialEntry> {
        self.entries().get(index)
    }
}

/// One reporting period's statement. Wrong-typed fields read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_none"
    )]
    pub nature: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "section_or_none"
    )]
    pub pnl: Option<StatementSection>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "section_or_none"
    )]
    pub bs: Option<StatementSection>,
}

impl FinancialEntry {
    pub fn with_nature(nature: impl Into<String>) -> Self {
        Self {
            nature: Some(nature.into()),
            ..Self::default()
        }
    }

    pub fn standalone() -> Self {
        Self::with_nature(STANDALONE_NATURE)
    }

    pub fn consolidated() -> Self {
        Self::with_nature(CONSOLIDATED_NATURE)
    }

    pub fn is_standalone(&self) -> bool {
        self.nature.as_deref() == Some(STANDALONE_NATURE)
    }

    pub fn section(&self, kind: SectionKind) -> Option<&StatementSection> {
        match kind {
            SectionKind::ProfitAndLoss => self.pnl.as_ref(),
            SectionKind::BalanceSheet => self.bs.as_ref(),
        }
    }

    /// Sets a line item in the section that owns it, creating the section if needed.
    pub fn with_line_item(mut self, item: LineItem, value: impl Into<Value>) -> Self {
        let section = match item.section() {
            SectionKind::ProfitAndLoss => self.pnl.get_or_insert_with(StatementSection::default),
            SectionKind::BalanceSheet => self.bs.get_or_insert_with(StatementSection::default),
        };
        section
            .line_items
            .insert(item.key().to_string(), value.into());
        self
    }
}

/// Mapping of line-item name to raw value. Values stay untyped so that
/// non-numeric entries surface as data gaps instead of parse failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementSection {
    #[serde(rename = "lineItems", default, deserialize_with = "map_or_empty")]
    pub line_items: BTreeMap<String, Value>,
}

impl StatementSection {
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.line_items.get(key)
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

fn section_or_none<'de, D>(deserializer: D) -> Result<Option<StatementSection>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn map_or_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(items) => Ok(items.into_iter().collect()),
        _ => Ok(BTreeMap::new()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    ProfitAndLoss,
    BalanceSheet,
}

impl SectionKind {
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::ProfitAndLoss => "pnl",
            SectionKind::BalanceSheet => "bs",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Line items the probe reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItem {
    NetRevenue,
    ProfitBeforeInterestTaxDepreciation,
    InterestExpenses,
    LongTermBorrowings,
    ShortTermBorrowings,
}

impl LineItem {
    pub fn key(self) -> &'static str {
        match self {
            LineItem::NetRevenue => "netRevenue",
            LineItem::ProfitBeforeInterestTaxDepreciation => "profitBeforeInterestTaxDepreciation",
            LineItem::InterestExpenses => "interestExpenses",
            LineItem::LongTermBorrowings => "longTermBorrowings",
            LineItem::ShortTermBorrowings => "shortTermBorrowings",
        }
    }

    pub fn section(self) -> SectionKind {
        match self {
            LineItem::NetRevenue
            | LineItem::ProfitBeforeInterestTaxDepreciation
            | LineItem::InterestExpenses => SectionKind::ProfitAndLoss,
            LineItem::LongTermBorrowings | LineItem::ShortTermBorrowings => {
                SectionKind::BalanceSheet
            }
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_shape_and_ignores_unknown_keys() {
        let document: Document = serde_json::from_value(json!({
            "companyName": "Acme Pvt Ltd",
            "financials": [{
                "nature": "STANDALONE",
                "year": "2023-03-31",
                "pnl": { "lineItems": { "netRevenue": 1250.5, "interestExpenses": null } },
                "bs": { "lineItems": { "longTermBorrowings": "n/a" } }
            }]
        }))
        .expect("document parses");

        let entry = document.entry(0).expect("entry present");
        assert!(entry.is_standalone());
        let pnl = entry.section(SectionKind::ProfitAndLoss).expect("pnl");
        assert_eq!(pnl.raw("netRevenue"), Some(&json!(1250.5)));
        assert_eq!(pnl.raw("interestExpenses"), Some(&Value::Null));
        let bs = entry.section(SectionKind::BalanceSheet).expect("bs");
        assert_eq!(bs.raw("longTermBorrowings"), Some(&json!("n/a")));
    }

    #[test]
    fn wrong_typed_nature_is_not_standalone() {
        let document: Document = serde_json::from_value(json!({
            "financials": [{ "nature": 5, "pnl": { "lineItems": { "netRevenue": 10 } } }]
        }))
        .expect("document parses");

        let entry = document.entry(0).expect("entry present");
        assert_eq!(entry.nature, None);
        assert!(!entry.is_standalone());
        assert!(entry.section(SectionKind::ProfitAndLoss).is_some());
    }

    #[test]
    fn null_line_items_read_as_empty_section() {
        let document: Document = serde_json::from_value(json!({
            "financials": [{ "nature": "STANDALONE", "pnl": { "lineItems": null } }]
        }))
        .expect("document parses");

        let pnl = document
            .entry(0)
            .and_then(|entry| entry.section(SectionKind::ProfitAndLoss))
            .expect("pnl section kept");
        assert!(pnl.line_items.is_empty());
    }

    #[test]
    fn non_mapping_section_reads_as_absent() {
        let document: Document = serde_json::from_value(json!({
            "financials": [{ "nature": "STANDALONE", "pnl": "n/a", "bs": [1, 2] }]
        }))
        .expect("document parses");

        let entry = document.entry(0).expect("entry present");
        assert!(entry.is_standalone());
        assert!(entry.section(SectionKind::ProfitAndLoss).is_none());
        assert!(entry.section(SectionKind::BalanceSheet).is_none());
    }

    #[test]
    fn missing_financials_reads_as_empty() {
        let document: Document = serde_json::from_value(json!({})).expect("document parses");
        assert!(document.financials.is_none());
        assert!(document.entries().is_empty());
        assert!(document.entry(0).is_none());
    }

    #[test]
    fn nature_match_is_case_sensitive() {
        assert!(!FinancialEntry::with_nature("standalone").is_standalone());
        assert!(!FinancialEntry::consolidated().is_standalone());
        assert!(!FinancialEntry::default().is_standalone());
    }

    #[test]
    fn builder_routes_items_to_owning_section() {
        let entry = FinancialEntry::standalone()
            .with_line_item(LineItem::NetRevenue, 10)
            .with_line_item(LineItem::ShortTermBorrowings, 4);

        assert!(entry
            .pnl
            .as_ref()
            .is_some_and(|pnl| pnl.raw("netRevenue").is_some()));
        assert!(entry
            .bs
            .as_ref()
            .is_some_and(|bs| bs.raw("shortTermBorrowings").is_some()));
    }
}
