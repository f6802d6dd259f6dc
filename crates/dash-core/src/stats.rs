//! Visit statistics aggregation.
//!
//! Stored statistics use month labels (`YYYY-MM`). The dashboard also shows quarterly trends,
//! per-month breakdowns and a family-member → doctor relationship diagram; those views are
//! derived here rather than stored.

use crate::{DashboardError, DashboardResult};
use api_shared::{MonthlyVisits, QuarterlyVisits, RelationshipFlow, VisitStat};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

/// Parses a `YYYY-MM` label into `(year, month)`.
fn parse_month(label: &str) -> DashboardResult<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", label.trim()), "%Y-%m-%d")
        .map_err(|_| DashboardError::InvalidPeriod(label.to_string()))?;
    Ok((date.year(), date.month()))
}

/// Converts a month label to its quarter label, e.g. `2023-04` → `Q2 2023`.
pub fn quarter_label(month: &str) -> DashboardResult<String> {
    let (year, month) = parse_month(month)?;
    Ok(format!("Q{} {}", month.div_ceil(3), year))
}

/// Sums visit counts per quarter and family member.
///
/// Quarters are returned in chronological order; within a quarter, family members keep the
/// order in which they first appear in `stats`.
pub fn aggregate_by_quarter(stats: &[VisitStat]) -> DashboardResult<Vec<QuarterlyVisits>> {
    let mut quarters: BTreeMap<(i32, u32), Vec<(String, u32)>> = BTreeMap::new();

    for stat in stats {
        let (year, month) = parse_month(&stat.date)?;
        let members = quarters.entry((year, month.div_ceil(3))).or_default();
        match members.iter_mut().find(|(name, _)| *name == stat.family_member) {
            Some((_, total)) => *total += stat.visit_count,
            None => members.push((stat.family_member.clone(), stat.visit_count)),
        }
    }

    Ok(quarters
        .into_iter()
        .flat_map(|((year, quarter), members)| {
            members
                .into_iter()
                .map(move |(family_member, visit_count)| QuarterlyVisits {
                    quarter: format!("Q{} {}", quarter, year),
                    family_member,
                    visit_count,
                })
        })
        .collect())
}

/// Distinct month labels, sorted ascending.
pub fn months(stats: &[VisitStat]) -> Vec<String> {
    stats
        .iter()
        .map(|s| s.date.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Visits per family member for a single month.
pub fn visits_for_month(stats: &[VisitStat], month: &str) -> Vec<MonthlyVisits> {
    let mut totals: Vec<MonthlyVisits> = Vec::new();
    for stat in stats.iter().filter(|s| s.date == month) {
        match totals
            .iter_mut()
            .find(|t| t.family_member == stat.family_member)
        {
            Some(entry) => entry.visit_count += stat.visit_count,
            None => totals.push(MonthlyVisits {
                family_member: stat.family_member.clone(),
                visit_count: stat.visit_count,
            }),
        }
    }
    totals
}

/// Total visits per (family member, doctor) pair. Pairs with no visits are omitted.
pub fn relationship_flows(stats: &[VisitStat]) -> Vec<RelationshipFlow> {
    let mut flows: Vec<RelationshipFlow> = Vec::new();
    for stat in stats {
        match flows
            .iter_mut()
            .find(|f| f.family_member == stat.family_member && f.doctor_id == stat.doctor_id)
        {
            Some(flow) => flow.visit_count += stat.visit_count,
            None => flows.push(RelationshipFlow {
                family_member: stat.family_member.clone(),
                doctor_id: stat.doctor_id.clone(),
                visit_count: stat.visit_count,
            }),
        }
    }
    flows.retain(|f| f.visit_count > 0);
    flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn stat(doctor_id: &str, family_member: &str, date: &str, visit_count: u32) -> VisitStat {
        VisitStat {
            doctor_id: doctor_id.into(),
            visit_count,
            date: date.into(),
            family_member: family_member.into(),
        }
    }

    #[test]
    fn test_quarter_label() {
        assert_eq!(quarter_label("2023-01").unwrap(), "Q1 2023");
        assert_eq!(quarter_label("2023-03").unwrap(), "Q1 2023");
        assert_eq!(quarter_label("2023-04").unwrap(), "Q2 2023");
        assert_eq!(quarter_label("2024-12").unwrap(), "Q4 2024");
    }

    #[test]
    fn test_quarter_label_rejects_bad_input() {
        assert!(matches!(
            quarter_label("Q1 2023"),
            Err(DashboardError::InvalidPeriod(_))
        ));
        assert!(quarter_label("2023-13").is_err());
    }

    #[test]
    fn test_aggregate_by_quarter_sums_per_member() {
        let stats = fixtures::visit_stats();
        let quarterly = aggregate_by_quarter(&stats).unwrap();

        // Jan..Aug spans Q1..Q3 for five family members.
        assert_eq!(quarterly.len(), 15);

        let dad_q1 = quarterly
            .iter()
            .find(|q| q.quarter == "Q1 2023" && q.family_member == "Dad")
            .expect("Dad should have Q1 visits");
        assert_eq!(dad_q1.visit_count, 2 + 1 + 2);

        let mom_q3 = quarterly
            .iter()
            .find(|q| q.quarter == "Q3 2023" && q.family_member == "Mom")
            .expect("Mom should have Q3 visits");
        assert_eq!(mom_q3.visit_count, 5 + 7);
    }

    #[test]
    fn test_aggregate_orders_quarters_chronologically() {
        let stats = vec![
            stat("1", "Dad", "2024-02", 1),
            stat("1", "Dad", "2023-11", 2),
            stat("2", "Mom", "2023-10", 3),
        ];
        let quarterly = aggregate_by_quarter(&stats).unwrap();

        let labels: Vec<_> = quarterly.iter().map(|q| q.quarter.as_str()).collect();
        assert_eq!(labels, vec!["Q4 2023", "Q4 2023", "Q1 2024"]);
        assert_eq!(quarterly[0].family_member, "Dad");
    }

    #[test]
    fn test_months_sorted_and_distinct() {
        let stats = vec![
            stat("1", "Dad", "2023-03", 1),
            stat("2", "Mom", "2023-01", 1),
            stat("1", "Dad", "2023-01", 1),
        ];
        assert_eq!(months(&stats), vec!["2023-01", "2023-03"]);
    }

    #[test]
    fn test_visits_for_month() {
        let stats = fixtures::visit_stats();
        let april = visits_for_month(&stats, "2023-04");

        assert_eq!(april.len(), 5);
        assert_eq!(april[0].family_member, "Dad");
        assert_eq!(april[0].visit_count, 5);
        assert!(visits_for_month(&stats, "2030-01").is_empty());
    }

    #[test]
    fn test_relationship_flows_skip_zero_totals() {
        let stats = vec![
            stat("1", "Dad", "2023-01", 2),
            stat("1", "Dad", "2023-02", 3),
            stat("2", "Dad", "2023-01", 0),
            stat("2", "Mom", "2023-01", 4),
        ];
        let flows = relationship_flows(&stats);

        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].visit_count, 5);
        assert_eq!(flows[1].family_member, "Mom");
    }
}
