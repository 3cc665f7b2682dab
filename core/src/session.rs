use chrono::NaiveDate;

use crate::models::FoodChoice;

/// Transient state for one interactive session: the latest spin result and
/// the date the user is looking at. Last write wins. The stores themselves
/// stay stateless, so nothing here survives the process.
#[derive(Debug, Default)]
pub struct Session {
    pick: Option<FoodChoice>,
    focused_date: Option<NaiveDate>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Session::default()
    }

    pub fn set_pick(&mut self, pick: FoodChoice) {
        self.pick = Some(pick);
    }

    #[must_use]
    pub fn pick(&self) -> Option<&FoodChoice> {
        self.pick.as_ref()
    }

    /// Removes and returns the pick; committing it to the plan goes through
    /// here so a pick cannot be saved twice.
    pub fn take_pick(&mut self) -> Option<FoodChoice> {
        self.pick.take()
    }

    pub fn focus_date(&mut self, date: NaiveDate) {
        self.focused_date = Some(date);
    }

    #[must_use]
    pub fn focused_date(&self) -> Option<NaiveDate> {
        self.focused_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(name: &str) -> FoodChoice {
        FoodChoice {
            food_name: name.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.pick().is_none());
        assert!(session.focused_date().is_none());
    }

    #[test]
    fn test_last_pick_wins() {
        let mut session = Session::new();
        session.set_pick(choice("Pizza"));
        session.set_pick(choice("Sushi"));
        assert_eq!(session.pick().unwrap().food_name, "Sushi");
    }

    #[test]
    fn test_take_pick_clears_it() {
        let mut session = Session::new();
        session.set_pick(choice("Pizza"));
        let taken = session.take_pick().unwrap();
        assert_eq!(taken.food_name, "Pizza");
        assert!(session.pick().is_none());
        assert!(session.take_pick().is_none());
    }

    #[test]
    fn test_focused_date_roundtrip() {
        let mut session = Session::new();
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        session.focus_date(day);
        assert_eq!(session.focused_date(), Some(day));
    }
}
