use crate::db::postgres_service::PostgresService;
use crate::types::error::{AppError, FieldErrors};
use crate::types::registration::{RRegistrationCreate, RRegistrationUpdate};
use chrono::Utc;
use entity::exam_registration::{
    ActiveModel as RegistrationActive, Column, Entity as Registration, Model as RegistrationModel,
};
use entity::user::{Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

impl PostgresService {
    pub async fn get_registration_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<RegistrationModel>, AppError> {
        Ok(Registration::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    async fn payment_slip_taken(
        &self,
        slip: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let mut query = Registration::find().filter(Column::PaymentSlip.eq(slip));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    /// Create the caller's registration. Snapshot fields come from the user
    /// row, never from the payload. The unique index on user_id is the real
    /// one-per-user guard; a violation there means a concurrent submission
    /// won the race and the caller gets the same duplicate error.
    pub async fn create_registration(
        &self,
        user: &UserModel,
        input: RRegistrationCreate,
    ) -> Result<RegistrationModel, AppError> {
        if self.get_registration_for_user(user.id).await?.is_some() {
            return Err(AppError::AlreadyExists);
        }
        if let Some(ref slip) = input.payment_slip {
            if self.payment_slip_taken(slip, None).await? {
                return Err(AppError::Validation(FieldErrors::single(
                    "payment_slip",
                    "A registration with this payment slip already exists.",
                )));
            }
        }

        let now = Utc::now();
        let result = Registration::insert(RegistrationActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            full_name: Set(user.full_name.clone()),
            varsity_id: Set(user.varsity_id.clone()),
            session: Set(user.session.clone()),
            phone_number: Set(Some(user.phone_number.clone())),
            payment_status: Set(input.payment_status.to_string()),
            payment_slip: Set(input.payment_slip),
            student_status: Set(input.student_status.to_string()),
            courses: Set(serde_json::json!(input.courses)),
            hall_name: Set(input.hall_name),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_with_returning(&self.db)
        .await;

        match result {
            Ok(model) => Ok(model),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    Err(insert_conflict(&detail))
                }
                _ => Err(e.into()),
            },
        }
    }

    /// Update the caller's registration in place and refresh the snapshot
    /// from the current account state.
    pub async fn update_registration(
        &self,
        user: &UserModel,
        patch: RRegistrationUpdate,
    ) -> Result<RegistrationModel, AppError> {
        let existing = self
            .get_registration_for_user(user.id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(ref slip) = patch.payment_slip {
            if self.payment_slip_taken(slip, Some(existing.id)).await? {
                return Err(AppError::Validation(FieldErrors::single(
                    "payment_slip",
                    "A registration with this payment slip already exists.",
                )));
            }
        }

        let mut am: RegistrationActive = existing.into();
        if let Some(payment_status) = patch.payment_status {
            am.payment_status = Set(payment_status.to_string());
        }
        if let Some(payment_slip) = patch.payment_slip {
            am.payment_slip = Set(Some(payment_slip));
        }
        if let Some(student_status) = patch.student_status {
            am.student_status = Set(student_status.to_string());
        }
        if let Some(courses) = patch.courses {
            am.courses = Set(serde_json::json!(courses));
        }
        if let Some(hall_name) = patch.hall_name {
            am.hall_name = Set(Some(hall_name));
        }

        // Snapshot refresh happens on every write, not just creation
        am.full_name = Set(user.full_name.clone());
        am.varsity_id = Set(user.varsity_id.clone());
        am.session = Set(user.session.clone());
        am.phone_number = Set(Some(user.phone_number.clone()));
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.db).await?)
    }

    /// All registrations with their owning account, for the teacher summary.
    pub async fn list_registrations(
        &self,
    ) -> Result<Vec<(RegistrationModel, Option<UserModel>)>, AppError> {
        Ok(Registration::find()
            .find_also_related(User)
            .all(&self.db)
            .await?)
    }
}

/// Map a unique-constraint violation on insert to the same error the
/// pre-checks give: a payment_slip clash stays field-keyed, anything else
/// (the user_id index) is a duplicate submission.
fn insert_conflict(detail: &str) -> AppError {
    if detail.contains("payment_slip") {
        AppError::Validation(FieldErrors::single(
            "payment_slip",
            "A registration with this payment slip already exists.",
        ))
    } else {
        AppError::AlreadyExists
    }
}
