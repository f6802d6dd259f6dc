//! Seed data loaded into the store at startup.

use api_shared::{Doctor, VisitStat};
use chrono::{NaiveDate, TimeZone, Utc};

const DOCTORS: [(&str, &str, &str, u32); 8] = [
    ("1", "Dr. Sarah Smith", "Cardiology", 10),
    ("2", "Dr. John Davis", "Pediatrics", 15),
    ("3", "Dr. Emily Chen", "Neurology", 5),
    ("4", "Dr. Michael Brown", "Orthopedics", 12),
    ("5", "Dr. Lisa Anderson", "Dermatology", 8),
    ("6", "Dr. James Wilson", "Ophthalmology", 20),
    ("7", "Dr. Maria Garcia", "Endocrinology", 18),
    ("8", "Dr. Robert Taylor", "Psychiatry", 3),
];

/// Monthly visit counts from January to August 2023, one row per family member.
const VISITS: [(&str, &str, [u32; 8]); 5] = [
    ("1", "Dad", [2, 1, 2, 5, 3, 4, 6, 4]),
    ("2", "Mom", [5, 4, 6, 4, 6, 3, 5, 7]),
    ("3", "Kid", [3, 2, 4, 2, 4, 5, 3, 4]),
    ("4", "Grandma", [4, 5, 7, 6, 5, 7, 4, 6]),
    ("5", "Grandpa", [5, 6, 4, 3, 4, 6, 5, 5]),
];

const VISIT_YEAR: i32 = 2023;

/// The doctors every fresh store starts with. All were last visited in January 2024.
pub fn doctors() -> Vec<Doctor> {
    DOCTORS
        .iter()
        .filter_map(|(id, name, specialty, day)| {
            let date = NaiveDate::from_ymd_opt(2024, 1, *day)?;
            let last_visited = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
            Some(Doctor {
                id: (*id).to_string(),
                name: (*name).to_string(),
                specialty: (*specialty).to_string(),
                last_visited,
            })
        })
        .collect()
}

/// Visit statistics linking family members to the first five seed doctors.
pub fn visit_stats() -> Vec<VisitStat> {
    VISITS
        .iter()
        .flat_map(|(doctor_id, family_member, counts)| {
            counts
                .iter()
                .enumerate()
                .map(move |(month_index, count)| VisitStat {
                    doctor_id: (*doctor_id).to_string(),
                    visit_count: *count,
                    date: format!("{}-{:02}", VISIT_YEAR, month_index + 1),
                    family_member: (*family_member).to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_doctors() {
        let doctors = doctors();
        assert_eq!(doctors.len(), 8);
        assert_eq!(doctors[0].name, "Dr. Sarah Smith");
        assert_eq!(
            doctors[5].last_visited.to_rfc3339(),
            "2024-01-20T00:00:00+00:00"
        );
    }

    #[test]
    fn test_seed_visit_stats() {
        let stats = visit_stats();
        assert_eq!(stats.len(), 40);
        assert_eq!(stats[0].date, "2023-01");
        assert_eq!(stats[7].date, "2023-08");
        assert_eq!(stats[8].family_member, "Mom");
        assert!(stats.iter().all(|s| s.doctor_id.as_str() <= "5"));
    }
}
