use super::domain::ApplicantContact;

/// Outbound mail hook. One delivery attempt per state transition; retry
/// policy, if any, belongs to the implementation.
pub trait Notifier: Send + Sync {
    fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// Notification dispatch error. Non-fatal to the engine: the state change is
/// committed before delivery is attempted.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// A rendered message ready for the [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

pub(crate) fn acceptance_message(contact: &ApplicantContact, speciality_title: &str) -> Message {
    Message {
        subject: format!("Application for \"{speciality_title}\" accepted"),
        body: format!(
            "Dear {} {},\n\n\
             Your application for the speciality \"{}\" has been accepted by the \
             administrator.\n\
             You can follow the results of the competitive selection for this \
             speciality in your personal account.",
            contact.first_name, contact.last_name, speciality_title
        ),
    }
}

pub(crate) fn rejection_message(
    contact: &ApplicantContact,
    speciality_title: &str,
    reason: &str,
) -> Message {
    Message {
        subject: format!("Application for \"{speciality_title}\" rejected"),
        body: format!(
            "Dear {} {},\n\n\
             Your application for the speciality \"{}\" has been rejected by the \
             administrator for the following reason: \"{}\".\n\
             To take part in the competitive selection for this speciality, please \
             correct the reported issues in your personal account.",
            contact.first_name, contact.last_name, speciality_title, reason
        ),
    }
}

pub(crate) fn enrollment_message(contact: &ApplicantContact, speciality_title: &str) -> Message {
    Message {
        subject: format!("Recruitment for \"{speciality_title}\" completed"),
        body: format!(
            "Dear {} {},\n\n\
             Congratulations! Based on the results of the competitive selection for \
             the speciality \"{}\", you are among the applicants recommended for \
             enrollment.\n\
             Please submit the originals of your documents to the admissions board \
             within 10 days.",
            contact.first_name, contact.last_name, speciality_title
        ),
    }
}
