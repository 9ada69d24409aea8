//! Children-by-city report

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{ChildRecord, Gender};

/// Head count for one city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityGenderReport {
    pub city: String,
    pub male: usize,
    pub female: usize,
    pub total: usize,
}

impl CityGenderReport {
    fn empty(city: &str) -> Self {
        Self {
            city: city.to_string(),
            male: 0,
            female: 0,
            total: 0,
        }
    }

    fn count(&mut self, gender: Gender) {
        match gender {
            Gender::Masculine => self.male += 1,
            Gender::Feminine => self.female += 1,
        }
        self.total += 1;
    }
}

/// Group records by city, sorted by city name.
///
/// City names are compared exactly as stored; "Cali" and "cali" are two
/// different rows.
pub fn by_city<'a, I>(records: I) -> Vec<CityGenderReport>
where
    I: IntoIterator<Item = &'a ChildRecord>,
{
    let mut rows: BTreeMap<&str, CityGenderReport> = BTreeMap::new();
    for record in records {
        rows.entry(record.city.as_str())
            .or_insert_with(|| CityGenderReport::empty(&record.city))
            .count(record.gender);
    }
    rows.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(document: u64, city: &str, gender: Gender) -> ChildRecord {
        ChildRecord {
            document,
            name: "Test".into(),
            age: 5,
            city: city.into(),
            gender,
            guardian: "Guardian".into(),
            notes: None,
        }
    }

    #[test]
    fn test_groups_and_sorts_by_city() {
        let records = vec![
            child(1, "Cali", Gender::Masculine),
            child(2, "Bogotá", Gender::Masculine),
            child(3, "Bogotá", Gender::Feminine),
            child(4, "Bogotá", Gender::Masculine),
        ];

        let report = by_city(&records);
        assert_eq!(
            report,
            vec![
                CityGenderReport {
                    city: "Bogotá".into(),
                    male: 2,
                    female: 1,
                    total: 3
                },
                CityGenderReport {
                    city: "Cali".into(),
                    male: 1,
                    female: 0,
                    total: 1
                },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(by_city(&Vec::<ChildRecord>::new()).is_empty());
    }
}
