//! Email subjects and bodies.

/// A rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Reminder to the user.
pub fn reminder(days_missed: i64, app_url: &str) -> RenderedEmail {
    let (subject, text) = if days_missed == 1 {
        (
            "[Lifeline] Daily check-in reminder".to_string(),
            "You have not checked in today. Please check in so we know you are safe.".to_string(),
        )
    } else {
        (
            format!("[Lifeline] You have not checked in for {days_missed} days"),
            format!(
                "You have not checked in for {days_missed} days in a row. \
                 For your safety, please check in as soon as possible."
            ),
        )
    };

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #137fec;">Lifeline check-in reminder</h2>
  <p>Hello,</p>
  <p>{text}</p>
  <p style="margin-top: 30px;">
    <a href="{app_url}" style="background-color: #137fec; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">Check in now</a>
  </p>
  <p style="color: #666; font-size: 12px; margin-top: 30px;">This message was sent automatically. Please do not reply.</p>
</div>"#
    );

    RenderedEmail { subject, html }
}

/// Alert to an emergency contact.
pub fn emergency_alert(user_name: &str, days_missed: i64) -> RenderedEmail {
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #dc2626;">Emergency alert from Lifeline</h2>
  <p>Hello,</p>
  <p><strong>{user_name}</strong> has not checked in for <strong>{days_missed} days</strong>.</p>
  <p>Please try to reach them and confirm they are safe.</p>
  <p style="background-color: #fef2f2; padding: 15px; border-left: 4px solid #dc2626; margin: 20px 0;">
    <strong>Suggested steps:</strong><br>
    1. Try to contact them right away<br>
    2. If you cannot reach them, consider visiting in person<br>
    3. Contact emergency services if necessary
  </p>
  <p style="color: #666; font-size: 12px; margin-top: 30px;">This message was sent automatically. Please do not reply.</p>
</div>"#
    );

    RenderedEmail {
        subject: format!("[Urgent] {user_name} has not checked in for {days_missed} days"),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_subject_depends_on_days() {
        assert_eq!(
            reminder(1, "http://app").subject,
            "[Lifeline] Daily check-in reminder"
        );
        let two = reminder(2, "http://app");
        assert!(two.subject.contains("2 days"));
        assert!(two.html.contains("href=\"http://app\""));
    }

    #[test]
    fn test_emergency_alert_names_user() {
        let alert = emergency_alert("Alex", 4);
        assert!(alert.subject.contains("Alex"));
        assert!(alert.html.contains("4 days"));
    }
}
