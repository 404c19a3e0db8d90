use crate::types::account::UserDetail;
use chrono::{DateTime, Utc};
use entity::exam_registration::Model as RegistrationModel;
use entity::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Residential halls a registrant may choose from.
pub const HALLS: &[&str] = &[
    "Alaol Hall",
    "A. F. Rahman Hall",
    "Shahjalal Hall",
    "Suhrawardy Hall",
    "Shah Amanat Hall",
    "Shamsun Nahar Hall",
    "Shaheed Abdur Rab Hall",
    "Pritilata Hall",
    "Deshnetri Begum Khaleda Zia Hall",
    "Masterda Surja Sen Hall",
    "Shaheed Farhad Hossain Hall",
    "Bijoy 24 Hall",
    "Nawab Faizunnesa Hall",
    "Atish Dipankar Hall",
    "Shilpi Rashid Chowdhury Hostel",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Yes,
    No,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Yes => write!(f, "Yes"),
            PaymentStatus::No => write!(f, "No"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Regular,
    Improvement,
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentStatus::Regular => write!(f, "regular"),
            StudentStatus::Improvement => write!(f, "improvement"),
        }
    }
}

// ---- request bodies ----

/// Submission body. Snapshot fields are not accepted here at all; they are
/// derived from the account at write time.
#[derive(Serialize, Deserialize)]
pub struct RRegistrationCreate {
    pub payment_status: PaymentStatus,
    pub payment_slip: Option<String>,
    pub student_status: StudentStatus,
    pub courses: Vec<String>,
    pub hall_name: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
pub struct RRegistrationUpdate {
    pub payment_status: Option<PaymentStatus>,
    pub payment_slip: Option<String>,
    pub student_status: Option<StudentStatus>,
    pub courses: Option<Vec<String>>,
    pub hall_name: Option<String>,
}

// ---- response bodies ----

#[derive(Serialize, Deserialize)]
pub struct RegistrationRes {
    pub id: Uuid,
    pub user: Uuid,
    pub full_name: String,
    pub varsity_id: Option<String>,
    pub session: Option<String>,
    pub phone_number: Option<String>,
    pub payment_status: String,
    pub payment_slip: Option<String>,
    pub student_status: String,
    pub courses: Vec<String>,
    pub hall_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegistrationModel> for RegistrationRes {
    fn from(reg: RegistrationModel) -> Self {
        let courses = serde_json::from_value(reg.courses).unwrap_or_default();
        RegistrationRes {
            id: reg.id,
            user: reg.user_id,
            full_name: reg.full_name,
            varsity_id: reg.varsity_id,
            session: reg.session,
            phone_number: reg.phone_number,
            payment_status: reg.payment_status,
            payment_slip: reg.payment_slip,
            student_status: reg.student_status,
            courses,
            hall_name: reg.hall_name,
            created_at: reg.created_at,
            updated_at: reg.updated_at,
        }
    }
}

/// The account fields the registration snapshots, as they stand right now.
#[derive(Serialize, Deserialize)]
pub struct UserSnapshot {
    pub full_name: String,
    pub varsity_id: Option<String>,
    pub session: Option<String>,
    pub phone_number: Option<String>,
}

impl From<&UserModel> for UserSnapshot {
    fn from(user: &UserModel) -> Self {
        UserSnapshot {
            full_name: user.full_name.clone(),
            varsity_id: user.varsity_id.clone(),
            session: user.session.clone(),
            phone_number: Some(user.phone_number.clone()),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct MyRegistrationRes {
    pub registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSnapshot>,
}

#[derive(Serialize, Deserialize)]
pub struct SummaryRow {
    pub registration: RegistrationRes,
    pub user: UserDetail,
}
