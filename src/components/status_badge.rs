use leptos::prelude::*;

/// Status shown by a badge for an application or a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStatus {
    Complete,
    InProgress,
    Pending,
    Rejected,
    Unknown,
}

impl BadgeStatus {
    /// Map a backend application status string.
    pub fn for_application(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "approved" | "completed" | "complete" => BadgeStatus::Complete,
            "submitted" | "in_progress" | "in_review" | "under_review" | "processing" => {
                BadgeStatus::InProgress
            }
            "draft" | "pending" | "not_started" => BadgeStatus::Pending,
            "rejected" | "denied" | "cancelled" => BadgeStatus::Rejected,
            _ => BadgeStatus::Unknown,
        }
    }

    /// Map a document completion percentage.
    pub fn for_completion(percentage: u8) -> Self {
        match percentage {
            0 => BadgeStatus::Pending,
            100..=u8::MAX => BadgeStatus::Complete,
            _ => BadgeStatus::InProgress,
        }
    }

    fn icon_and_class(&self) -> (&'static str, &'static str) {
        match self {
            BadgeStatus::Complete => ("\u{2713}", "status-badge status-complete"),
            BadgeStatus::InProgress => ("\u{25D4}", "status-badge status-progress"),
            BadgeStatus::Pending => ("\u{2022}", "status-badge status-pending"),
            BadgeStatus::Rejected => ("\u{2717}", "status-badge status-rejected"),
            BadgeStatus::Unknown => ("?", "status-badge status-unknown"),
        }
    }
}

#[component]
pub fn StatusBadge(
    /// The label text, e.g. "Application" or "Form I-129"
    #[prop(into)]
    label: String,
    status: BadgeStatus,
    /// Optional detail text, e.g. "75% complete"
    #[prop(optional, into)]
    detail: Option<String>,
) -> impl IntoView {
    let (icon, class) = status.icon_and_class();

    view! {
        <div class="status-item">
            <span class=class>{icon}</span>
            <span class="status-label">{label}</span>
            <span class="status-detail">{detail.unwrap_or_default()}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_mapping() {
        assert_eq!(BadgeStatus::for_application("approved"), BadgeStatus::Complete);
        assert_eq!(BadgeStatus::for_application("In Review"), BadgeStatus::InProgress);
        assert_eq!(BadgeStatus::for_application("in-progress"), BadgeStatus::InProgress);
        assert_eq!(BadgeStatus::for_application("draft"), BadgeStatus::Pending);
        assert_eq!(BadgeStatus::for_application("DENIED"), BadgeStatus::Rejected);
        assert_eq!(BadgeStatus::for_application("archived"), BadgeStatus::Unknown);
    }

    #[test]
    fn test_completion_mapping() {
        assert_eq!(BadgeStatus::for_completion(0), BadgeStatus::Pending);
        assert_eq!(BadgeStatus::for_completion(1), BadgeStatus::InProgress);
        assert_eq!(BadgeStatus::for_completion(99), BadgeStatus::InProgress);
        assert_eq!(BadgeStatus::for_completion(100), BadgeStatus::Complete);
    }
}
