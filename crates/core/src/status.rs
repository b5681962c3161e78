//! Lifecycle status enums for assignments, applications, cohorts, purchases,
//! memberships, and invites.
//!
//! Each enum is persisted as TEXT using the string shown next to its variant.
//! The workflow modules match on these exhaustively, so adding a variant is a
//! compile error at every decision point until it is handled.

define_text_enum! {
    /// Review state of a Canon assignment (and of the mirrored module
    /// progress field).
    SubmissionStatus("submission status") {
        Pending = "pending",
        Pass = "pass",
        NotYet = "not_yet",
    }
}

define_text_enum! {
    /// Terminal outcome an admin may assign when reviewing an assignment.
    ///
    /// Kept separate from [`SubmissionStatus`] so `pending` can never be a
    /// review target.
    ReviewDecision("review status") {
        Pass = "pass",
        NotYet = "not_yet",
    }
}

impl From<ReviewDecision> for SubmissionStatus {
    fn from(value: ReviewDecision) -> Self {
        match value {
            ReviewDecision::Pass => SubmissionStatus::Pass,
            ReviewDecision::NotYet => SubmissionStatus::NotYet,
        }
    }
}

define_text_enum! {
    /// Guild application lifecycle.
    ApplicationStatus("application status") {
        Pending = "pending",
        Approved = "approved",
        Rejected = "rejected",
    }
}

define_text_enum! {
    /// Terminal outcome of a guild application review.
    ApplicationDecision("application decision") {
        Approved = "approved",
        Rejected = "rejected",
    }
}

impl From<ApplicationDecision> for ApplicationStatus {
    fn from(value: ApplicationDecision) -> Self {
        match value {
            ApplicationDecision::Approved => ApplicationStatus::Approved,
            ApplicationDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

define_text_enum! {
    /// Guild cohort lifecycle.
    CohortStatus("cohort status") {
        Upcoming = "upcoming",
        Active = "active",
        Completed = "completed",
    }
}

impl CohortStatus {
    /// Whether the cohort still appears in the public cohort listing.
    pub fn is_open(self) -> bool {
        match self {
            CohortStatus::Upcoming | CohortStatus::Active => true,
            CohortStatus::Completed => false,
        }
    }
}

define_text_enum! {
    /// Payment ledger entry status.
    PurchaseStatus("purchase status") {
        Pending = "pending",
        Completed = "completed",
        Refunded = "refunded",
    }
}

define_text_enum! {
    /// Fellowship membership standing.
    MembershipStatus("membership status") {
        Active = "active",
        Alumni = "alumni",
    }
}

define_text_enum! {
    /// Fellowship invite lifecycle.
    InviteStatus("invite status") {
        Pending = "pending",
        Accepted = "accepted",
        Expired = "expired",
    }
}
