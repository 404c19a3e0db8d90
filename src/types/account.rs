use entity::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Teacher => write!(f, "teacher"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            _ => Err(format!("{:?} is not a valid role", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("{:?} is not a valid gender", s)),
        }
    }
}

/// Role-gated fields as a tagged variant: a student account cannot be built
/// without its three extra fields and a teacher account cannot carry them.
#[derive(Clone, Debug, PartialEq)]
pub enum RoleFields {
    Student {
        varsity_id: String,
        session: String,
        gender: Gender,
    },
    Teacher,
}

/// A fully validated account ready for insertion.
#[derive(Clone, Debug)]
pub struct NewAccount {
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role_fields: RoleFields,
}

impl NewAccount {
    pub fn role(&self) -> Role {
        match self.role_fields {
            RoleFields::Student { .. } => Role::Student,
            RoleFields::Teacher => Role::Teacher,
        }
    }
}

/// A validated partial self-update. None means "leave unchanged".
#[derive(Clone, Debug, Default)]
pub struct AccountPatch {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub varsity_id: Option<String>,
    pub session: Option<String>,
    pub gender: Option<Gender>,
    pub password_hash: Option<String>,
}

// ---- request bodies ----

#[derive(Serialize, Deserialize)]
pub struct RStudentRegister {
    pub full_name: String,
    pub email: String,
    pub varsity_id: String,
    pub session: String,
    pub gender: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize)]
pub struct RTeacherRegister {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize)]
pub struct RUserCreate {
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub phone_number: String,
    pub varsity_id: Option<String>,
    pub session: Option<String>,
    pub gender: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize, Default)]
pub struct RUserUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub varsity_id: Option<String>,
    pub session: Option<String>,
    pub gender: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct RStudentLogin {
    pub varsity_id: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct RTeacherLogin {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct RLogout {
    pub refresh: String,
}

// ---- response bodies ----

#[derive(Serialize, Deserialize)]
pub struct MessageRes {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct DetailRes {
    pub detail: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenPairRes {
    pub access: String,
    pub refresh: String,
    pub role: String,
}

#[derive(Serialize, Deserialize)]
pub struct UserDetail {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub phone_number: String,
    pub varsity_id: Option<String>,
    pub session: Option<String>,
    pub gender: Option<String>,
}

impl From<UserModel> for UserDetail {
    fn from(user: UserModel) -> Self {
        UserDetail {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            phone_number: user.phone_number,
            varsity_id: user.varsity_id,
            session: user.session,
            gender: user.gender,
        }
    }
}
