use crate::config::EnvConfig;
use crate::types::account::{
    AccountPatch, Gender, NewAccount, RStudentRegister, RTeacherRegister, RUserCreate,
    RUserUpdate, Role, RoleFields,
};
use crate::types::error::{AppError, FieldErrors};
use crate::types::registration::{RRegistrationCreate, RRegistrationUpdate, HALLS};
use crate::utils::password;
use entity::user::Model as UserModel;

/// Sessions the portal accepts, newest first ("2025-26" down to "2015-16").
const SESSION_YEAR_RANGE: (i32, i32) = (2015, 2025);

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn is_email_like(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// "2024-25" style label: four-digit year, dash, the next year's last two
/// digits, within the advertised range.
fn is_session_label(value: &str) -> bool {
    let Some((start, end)) = value.split_once('-') else {
        return false;
    };
    if start.len() != 4 || end.len() != 2 {
        return false;
    }
    let (Ok(start), Ok(end)) = (start.parse::<i32>(), end.parse::<i32>()) else {
        return false;
    };
    start >= SESSION_YEAR_RANGE.0 && start <= SESSION_YEAR_RANGE.1 && (start + 1) % 100 == end
}

fn check_common(
    errs: &mut FieldErrors,
    email: &str,
    full_name: &str,
    phone_number: &str,
    password: &str,
    confirm_password: &str,
) {
    if full_name.trim().is_empty() {
        errs.push("full_name", "Full name is required.");
    }
    if !is_email_like(email) {
        errs.push("email", "Enter a valid email address.");
    }
    if !is_digits(phone_number, 11) {
        errs.push("phone_number", "Phone number must be exactly 11 digits.");
    }
    if let Err(msg) = password::check_policy(password) {
        errs.push("password", msg);
    }
    if password != confirm_password {
        errs.push("confirm_password", "Passwords do not match.");
    }
}

fn check_student_fields(
    errs: &mut FieldErrors,
    varsity_id: &str,
    session: &str,
    gender: &str,
) -> Option<RoleFields> {
    if !is_digits(varsity_id, 8) {
        errs.push("varsity_id", "Varsity ID must be exactly 8 digits.");
    }
    if !is_session_label(session) {
        errs.push("session", "Enter a valid session (e.g., 2024-25).");
    }
    let gender = match gender.parse::<Gender>() {
        Ok(g) => Some(g),
        Err(_) => {
            errs.push("gender", "Select a valid gender.");
            None
        }
    };
    gender.map(|gender| RoleFields::Student {
        varsity_id: varsity_id.to_string(),
        session: session.to_string(),
        gender,
    })
}

pub fn student_account(body: RStudentRegister) -> Result<NewAccount, AppError> {
    let mut errs = FieldErrors::new();
    check_common(
        &mut errs,
        &body.email,
        &body.full_name,
        &body.phone_number,
        &body.password,
        &body.confirm_password,
    );
    let role_fields = check_student_fields(&mut errs, &body.varsity_id, &body.session, &body.gender);
    errs.into_result()?;

    let password_hash = password::hash(&body.password)
        .map_err(|_| AppError::Internal("password hashing failed".to_string()))?;
    Ok(NewAccount {
        email: body.email,
        full_name: body.full_name,
        phone_number: body.phone_number,
        password_hash,
        // into_result() bailed unless all three student fields parsed
        role_fields: role_fields.expect("student fields validated"),
    })
}

pub fn teacher_account(
    body: RTeacherRegister,
    config: &EnvConfig,
) -> Result<NewAccount, AppError> {
    let mut errs = FieldErrors::new();
    check_common(
        &mut errs,
        &body.email,
        &body.full_name,
        &body.phone_number,
        &body.password,
        &body.confirm_password,
    );
    if !config.teacher_email_allowed(&body.email) {
        errs.push("email", "Email not authorized for teacher registration.");
    }
    errs.into_result()?;

    let password_hash = password::hash(&body.password)
        .map_err(|_| AppError::Internal("password hashing failed".to_string()))?;
    Ok(NewAccount {
        email: body.email,
        full_name: body.full_name,
        phone_number: body.phone_number,
        password_hash,
        role_fields: RoleFields::Teacher,
    })
}

/// Generic create (any role in the body). The teacher allow-list is not
/// consulted here; only the dedicated teacher-register endpoint checks it.
pub fn generic_account(body: RUserCreate) -> Result<NewAccount, AppError> {
    let mut errs = FieldErrors::new();
    check_common(
        &mut errs,
        &body.email,
        &body.full_name,
        &body.phone_number,
        &body.password,
        &body.confirm_password,
    );

    let role_fields = match body.role.parse::<Role>() {
        Ok(Role::Student) => {
            let varsity_id = body.varsity_id.as_deref().unwrap_or_default();
            let session = body.session.as_deref().unwrap_or_default();
            let gender = body.gender.as_deref().unwrap_or_default();
            if body.varsity_id.is_none() {
                errs.push("varsity_id", "Varsity ID is required for students.");
                None
            } else if body.session.is_none() {
                errs.push("session", "Session is required for students.");
                None
            } else if body.gender.is_none() {
                errs.push("gender", "Gender is required for students.");
                None
            } else {
                check_student_fields(&mut errs, varsity_id, session, gender)
            }
        }
        Ok(Role::Teacher) => {
            if body.varsity_id.is_some() {
                errs.push("varsity_id", "Teachers should not have a Varsity ID.");
            }
            if body.session.is_some() {
                errs.push("session", "Teachers should not have a session.");
            }
            if body.gender.is_some() {
                errs.push("gender", "Gender should not be provided for teachers.");
            }
            Some(RoleFields::Teacher)
        }
        Err(_) => {
            errs.push("role", "Role must be either student or teacher.");
            None
        }
    };
    errs.into_result()?;

    let password_hash = password::hash(&body.password)
        .map_err(|_| AppError::Internal("password hashing failed".to_string()))?;
    Ok(NewAccount {
        email: body.email,
        full_name: body.full_name,
        phone_number: body.phone_number,
        password_hash,
        role_fields: role_fields.expect("role fields validated"),
    })
}

/// Partial self-update. Role is immutable; student-only fields on a teacher
/// are rejected the same way they are at creation.
pub fn account_patch(body: RUserUpdate, current: &UserModel) -> Result<AccountPatch, AppError> {
    let mut errs = FieldErrors::new();
    let mut patch = AccountPatch::default();
    let is_student = current.role == Role::Student.to_string();

    if let Some(full_name) = body.full_name {
        if full_name.trim().is_empty() {
            errs.push("full_name", "Full name is required.");
        } else {
            patch.full_name = Some(full_name);
        }
    }
    if let Some(email) = body.email {
        if is_email_like(&email) {
            patch.email = Some(email);
        } else {
            errs.push("email", "Enter a valid email address.");
        }
    }
    if let Some(phone_number) = body.phone_number {
        if is_digits(&phone_number, 11) {
            patch.phone_number = Some(phone_number);
        } else {
            errs.push("phone_number", "Phone number must be exactly 11 digits.");
        }
    }

    if let Some(varsity_id) = body.varsity_id {
        if !is_student {
            errs.push("varsity_id", "Teachers should not have a Varsity ID.");
        } else if is_digits(&varsity_id, 8) {
            patch.varsity_id = Some(varsity_id);
        } else {
            errs.push("varsity_id", "Varsity ID must be exactly 8 digits.");
        }
    }
    if let Some(session) = body.session {
        if !is_student {
            errs.push("session", "Teachers should not have a session.");
        } else if is_session_label(&session) {
            patch.session = Some(session);
        } else {
            errs.push("session", "Enter a valid session (e.g., 2024-25).");
        }
    }
    if let Some(gender) = body.gender {
        if !is_student {
            errs.push("gender", "Gender should not be provided for teachers.");
        } else {
            match gender.parse::<Gender>() {
                Ok(g) => patch.gender = Some(g),
                Err(_) => errs.push("gender", "Select a valid gender."),
            }
        }
    }

    if let Some(ref new_password) = body.password {
        if let Err(msg) = password::check_policy(new_password) {
            errs.push("password", msg);
        }
        if body.confirm_password.as_deref() != Some(new_password.as_str()) {
            errs.push("confirm_password", "Passwords do not match.");
        }
    }
    errs.into_result()?;

    if let Some(new_password) = body.password {
        let hashed = password::hash(&new_password)
            .map_err(|_| AppError::Internal("password hashing failed".to_string()))?;
        patch.password_hash = Some(hashed);
    }
    Ok(patch)
}

fn check_courses(errs: &mut FieldErrors, courses: &[String]) {
    if courses.is_empty() {
        errs.push("courses", "At least one course code is required.");
    }
    if courses.iter().any(|c| c.trim().is_empty()) {
        errs.push("courses", "Course codes must not be blank.");
    }
}

fn check_hall(errs: &mut FieldErrors, hall_name: &str) {
    if !HALLS.contains(&hall_name) {
        errs.push("hall_name", "Select a valid residential hall.");
    }
}

pub fn registration_create(body: &RRegistrationCreate) -> Result<(), AppError> {
    let mut errs = FieldErrors::new();
    check_courses(&mut errs, &body.courses);
    if let Some(ref hall) = body.hall_name {
        check_hall(&mut errs, hall);
    }
    if let Some(ref slip) = body.payment_slip {
        if slip.trim().is_empty() {
            errs.push("payment_slip", "Payment slip must not be blank.");
        }
    }
    errs.into_result()
}

pub fn registration_update(body: &RRegistrationUpdate) -> Result<(), AppError> {
    let mut errs = FieldErrors::new();
    if let Some(ref courses) = body.courses {
        check_courses(&mut errs, courses);
    }
    if let Some(ref hall) = body.hall_name {
        check_hall(&mut errs, hall);
    }
    if let Some(ref slip) = body.payment_slip {
        if slip.trim().is_empty() {
            errs.push("payment_slip", "Payment slip must not be blank.");
        }
    }
    errs.into_result()
}
