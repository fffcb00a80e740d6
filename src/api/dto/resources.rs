use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `?limit=` on list routes. `0` lifts the cap.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn effective_limit(&self, default: Option<i64>) -> Option<i64> {
        match self.limit {
            Some(0) => None,
            Some(n) => Some(i64::from(n)),
            None => default,
        }
    }
}

/// `?email=` filter (cart listing, reviews by reviewer).
#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    #[serde(rename = "_id")]
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_zero_lifts_cap() {
        assert_eq!(ListQuery { limit: None }.effective_limit(Some(3)), Some(3));
        assert_eq!(ListQuery { limit: None }.effective_limit(None), None);
        assert_eq!(ListQuery { limit: Some(10) }.effective_limit(Some(3)), Some(10));
        assert_eq!(ListQuery { limit: Some(0) }.effective_limit(Some(3)), None);
    }
}
