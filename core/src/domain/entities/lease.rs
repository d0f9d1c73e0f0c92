//! Lease entity. Only consulted by the delete guard; the lease lifecycle
//! itself is managed elsewhere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tenancy agreement over a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    pub id: i32,
    pub property_id: i32,
    pub tenant_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Lease {
    /// A lease blocks property deletion while its end date has not passed
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.end_date >= date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lease_ending(end: NaiveDate) -> Lease {
        Lease {
            id: 1,
            property_id: 1,
            tenant_id: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: end,
        }
    }

    #[test]
    fn test_lease_active_until_end_date_inclusive() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        assert!(lease_ending(today).is_active_on(today));
        assert!(lease_ending(today.succ_opt().unwrap()).is_active_on(today));
        assert!(!lease_ending(today.pred_opt().unwrap()).is_active_on(today));
    }
}
