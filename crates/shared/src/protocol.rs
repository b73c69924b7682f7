use crate::domain::ReservationId;

const RESERVATIONS_COLLECTION: &str = "/reservations/";
const HEALTH: &str = "/health/";

/// REST addresses relative to the configured API base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Reservations,
    Reservation(ReservationId),
    Health,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Reservations => RESERVATIONS_COLLECTION.to_string(),
            Endpoint::Reservation(id) => format!("{RESERVATIONS_COLLECTION}{}/", id.0),
            Endpoint::Health => HEALTH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_extends_collection_path() {
        assert_eq!(Endpoint::Reservations.path(), "/reservations/");
        assert_eq!(
            Endpoint::Reservation(ReservationId(42)).path(),
            "/reservations/42/"
        );
        assert_eq!(Endpoint::Health.path(), "/health/");
    }
}
