//! SMS text.

/// Body of the emergency text.
pub fn emergency(user_name: &str, days_missed: i64) -> String {
    format!(
        "[Lifeline emergency] {user_name} has not checked in for {days_missed} days in a row. \
         Please contact them as soon as possible to confirm they are safe."
    )
}
