//! Range-keyed attribute effect tables.
//!
//! Each attribute owns an ordered list of [`AttributeRangeEffect`] entries.
//! The entry whose range contains the attribute's current value supplies
//! the hourly deltas for that attribute and for others. Entries are
//! expected to partition the attribute's domain; a value that matches no
//! entry simply has no effect.

use std::collections::BTreeMap;

use ashfall_types::Attribute;
use serde::{Deserialize, Serialize};

use crate::error::SurvivalError;
use crate::range::Range;

/// Per-attribute deltas keyed by the attribute they change.
pub type Effect = BTreeMap<Attribute, f64>;

/// One row of an attribute's effect table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRangeEffect {
    /// Row identifier, unique within its table.
    pub id: u32,

    /// Interval string, e.g. `"(25,50]"`.
    pub range: String,

    /// Deltas applied while the value is inside `range`.
    #[serde(default)]
    pub effect: Effect,
}

/// The matching row returned by range lookups.
pub type AttributeRangeInfo = AttributeRangeEffect;

/// All configured tables, keyed by the attribute whose value selects a row.
pub type EffectTables = BTreeMap<Attribute, Vec<AttributeRangeEffect>>;

/// An effect table with its range strings parsed.
#[derive(Debug, Clone, Default)]
pub struct CompiledTable {
    rows: Vec<(Range, AttributeRangeEffect)>,
}

impl CompiledTable {
    /// Parse every row's range.
    ///
    /// # Errors
    ///
    /// Returns [`SurvivalError::InvalidRange`] for the first malformed row.
    pub fn compile(attribute: Attribute, rows: &[AttributeRangeEffect]) -> Result<Self, SurvivalError> {
        let rows = rows
            .iter()
            .map(|row| {
                row.range
                    .parse::<Range>()
                    .map(|range| (range, row.clone()))
                    .map_err(|source| SurvivalError::InvalidRange {
                        attribute,
                        id: row.id,
                        range: row.range.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    /// First row whose range contains `value`.
    pub fn lookup(&self, value: f64) -> Option<&AttributeRangeEffect> {
        self.rows
            .iter()
            .find(|(range, _)| range.contains(value))
            .map(|(_, row)| row)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Compile every configured table.
///
/// # Errors
///
/// Returns [`SurvivalError::InvalidRange`] for the first malformed row.
pub fn compile_tables(tables: &EffectTables) -> Result<BTreeMap<Attribute, CompiledTable>, SurvivalError> {
    tables
        .iter()
        .map(|(attribute, rows)| CompiledTable::compile(*attribute, rows).map(|table| (*attribute, table)))
        .collect()
}

fn row(id: u32, range: &str, effect: &[(Attribute, f64)]) -> AttributeRangeEffect {
    AttributeRangeEffect {
        id,
        range: range.to_owned(),
        effect: effect.iter().copied().collect(),
    }
}

/// Four quartile rows with effects only where listed.
fn quartiles(low: &[(Attribute, f64)], mid_low: &[(Attribute, f64)]) -> Vec<AttributeRangeEffect> {
    vec![
        row(1, "[-,25]", low),
        row(2, "(25,50]", mid_low),
        row(3, "(50,75]", &[]),
        row(4, "(75,-]", &[]),
    ]
}

/// The stock effect tables.
pub fn default_tables() -> EffectTables {
    use Attribute::{Hp, Infect, Spirit};

    let mut tables = EffectTables::new();
    tables.insert(
        Attribute::Starve,
        quartiles(&[(Spirit, -5.0), (Infect, 1.5)], &[(Spirit, -2.0)]),
    );
    tables.insert(
        Attribute::Infect,
        vec![
            row(1, "[-,0]", &[]),
            row(2, "(0,25]", &[]),
            row(3, "(25,50]", &[(Hp, -6.0)]),
            row(4, "(50,75]", &[(Spirit, -1.0), (Infect, 1.0), (Hp, -12.0)]),
            row(5, "(75,-]", &[(Spirit, -1.0), (Infect, 1.0), (Hp, -16.0)]),
        ],
    );
    tables.insert(Attribute::Vigour, quartiles(&[(Spirit, -2.0)], &[(Spirit, -1.0)]));
    tables.insert(
        Attribute::Injury,
        vec![
            row(1, "[-,0]", &[]),
            row(2, "(0,25]", &[]),
            row(3, "(25,50]", &[]),
            row(4, "(50,75]", &[(Spirit, -1.0), (Infect, 1.0)]),
            row(5, "(75,-]", &[(Spirit, -1.0), (Infect, 2.0)]),
        ],
    );
    tables.insert(Attribute::Spirit, quartiles(&[], &[]));
    tables.insert(Attribute::Water, quartiles(&[(Hp, -10.0)], &[]));
    tables.insert(Attribute::Virus, quartiles(&[], &[]));
    tables.insert(
        Attribute::Temperature,
        vec![
            row(1, "[-,-10)", &[]),
            row(2, "[-10,10]", &[(Infect, 1.0)]),
            row(3, "(10,-]", &[]),
        ],
    );
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(attribute: Attribute) -> CompiledTable {
        let tables = default_tables();
        let rows = tables.get(&attribute).cloned().unwrap_or_default();
        CompiledTable::compile(attribute, &rows).unwrap_or_default()
    }

    #[test]
    fn default_tables_all_compile() {
        let tables = compile_tables(&default_tables());
        assert!(tables.is_ok());
        assert_eq!(tables.map(|t| t.len()).unwrap_or(0), 8);
    }

    #[test]
    fn starve_boundaries() {
        let table = compiled(Attribute::Starve);
        assert_eq!(table.lookup(25.0).map(|r| r.id), Some(1));
        assert_eq!(table.lookup(25.5).map(|r| r.id), Some(2));
        assert_eq!(table.lookup(50.0).map(|r| r.id), Some(2));
        assert_eq!(table.lookup(100.0).map(|r| r.id), Some(4));
        let low = table.lookup(0.0).map(|r| r.effect.clone()).unwrap_or_default();
        assert_eq!(low.get(&Attribute::Infect).copied(), Some(1.5));
    }

    #[test]
    fn infect_zero_has_no_effect() {
        let table = compiled(Attribute::Infect);
        let row = table.lookup(0.0);
        assert_eq!(row.map(|r| r.id), Some(1));
        assert!(row.is_some_and(|r| r.effect.is_empty()));
    }

    #[test]
    fn temperature_band() {
        let table = compiled(Attribute::Temperature);
        assert_eq!(table.lookup(-10.5).map(|r| r.id), Some(1));
        assert_eq!(table.lookup(-10.0).map(|r| r.id), Some(2));
        assert_eq!(table.lookup(17.0).map(|r| r.id), Some(3));
    }

    #[test]
    fn gap_matches_nothing() {
        let rows = vec![row(1, "[0,10)", &[]), row(2, "(10,20]", &[])];
        let table = CompiledTable::compile(Attribute::Water, &rows).unwrap_or_default();
        assert!(table.lookup(10.0).is_none());
        assert!(table.lookup(-1.0).is_none());
    }

    #[test]
    fn bad_range_names_the_row() {
        let rows = vec![row(7, "25,50]", &[])];
        let err = CompiledTable::compile(Attribute::Vigour, &rows);
        assert!(matches!(
            err,
            Err(SurvivalError::InvalidRange {
                attribute: Attribute::Vigour,
                id: 7,
                ..
            })
        ));
    }

    #[test]
    fn rows_deserialize_from_json() {
        let json = r#"{"id": 3, "range": "(25,50]", "effect": {"hp": -6}}"#;
        let parsed: Result<AttributeRangeEffect, _> = serde_json::from_str(json);
        let parsed = parsed.ok();
        assert_eq!(parsed.as_ref().map(|r| r.id), Some(3));
        assert_eq!(
            parsed.and_then(|r| r.effect.get(&Attribute::Hp).copied()),
            Some(-6.0)
        );
    }
}
