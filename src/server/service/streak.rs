//! Daily activity streaks.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{StreakUpdate, User},
};

/// Streak state after the user is active on `today`.
///
/// Activity on the same day changes nothing, activity the day after the last active
/// day extends the streak, anything else starts over at one.
pub fn next_streak(user: &User, today: NaiveDate) -> StreakUpdate {
    let current = match user.last_active_date {
        Some(last) if last == today => user.current_streak.max(1),
        Some(last) if last.succ_opt() == Some(today) => user.current_streak + 1,
        _ => 1,
    };

    StreakUpdate {
        current_streak: current,
        longest_streak: user.longest_streak.max(current),
        last_active_date: today,
    }
}

pub struct StreakService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StreakService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records activity for `user` on `today` and returns the stored streak.
    pub async fn record_activity(
        &self,
        user: &User,
        today: NaiveDate,
    ) -> Result<StreakUpdate, AppError> {
        let update = next_streak(user, today);
        if user.last_active_date == Some(today) && user.current_streak == update.current_streak {
            return Ok(update);
        }

        UserRepository::new(self.db)
            .update_streak(user.id, update)
            .await?;

        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(current: i32, longest: i32, last: Option<NaiveDate>) -> User {
        User {
            id: 1,
            email: "a@example.com".to_string(),
            password_hash: String::new(),
            name: "A".to_string(),
            avatar_url: None,
            bio: None,
            current_streak: current,
            longest_streak: longest,
            last_active_date: last,
            created_at: Utc::now(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn same_day_keeps_streak() {
        let update = next_streak(&user(4, 6, Some(day(10))), day(10));
        assert_eq!((update.current_streak, update.longest_streak), (4, 6));
    }

    #[test]
    fn next_day_extends_and_raises_longest() {
        let update = next_streak(&user(6, 6, Some(day(10))), day(11));
        assert_eq!((update.current_streak, update.longest_streak), (7, 7));
        assert_eq!(update.last_active_date, day(11));
    }

    #[test]
    fn gap_or_first_activity_restarts_at_one() {
        assert_eq!(next_streak(&user(5, 9, Some(day(8))), day(11)).current_streak, 1);
        assert_eq!(next_streak(&user(0, 0, None), day(11)).current_streak, 1);
        assert_eq!(next_streak(&user(5, 9, Some(day(8))), day(11)).longest_streak, 9);
    }
}
