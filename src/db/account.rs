use crate::db::postgres_service::PostgresService;
use crate::types::account::{AccountPatch, NewAccount, Role, RoleFields};
use crate::types::error::{AppError, FieldErrors};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    async fn column_taken(
        &self,
        column: Column,
        value: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let mut query = User::find().filter(column.eq(value));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_student_by_varsity_id(&self, varsity_id: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::VarsityId.eq(varsity_id))
            .filter(Column::Role.eq(Role::Student.to_string()))
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Signup: create a validated account. Uniqueness collisions come back
    /// as field-keyed validation errors, same shape as any other rejection.
    pub async fn create_account(&self, account: NewAccount) -> Result<Uuid, AppError> {
        let mut errs = FieldErrors::new();
        if self.column_taken(Column::Email, &account.email, None).await? {
            errs.push("email", "A user with this email already exists.");
        }
        if self
            .column_taken(Column::PhoneNumber, &account.phone_number, None)
            .await?
        {
            errs.push("phone_number", "A user with this phone number already exists.");
        }
        if let RoleFields::Student { ref varsity_id, .. } = account.role_fields {
            if self.column_taken(Column::VarsityId, varsity_id, None).await? {
                errs.push("varsity_id", "A user with this varsity ID already exists.");
            }
        }
        errs.into_result()?;

        let role = account.role().to_string();
        let (varsity_id, session, gender) = match account.role_fields {
            RoleFields::Student {
                varsity_id,
                session,
                gender,
            } => (Some(varsity_id), Some(session), Some(gender.to_string())),
            RoleFields::Teacher => (None, None, None),
        };

        let uid = Uuid::new_v4();
        let now = Utc::now();
        let txn = self.db.begin().await?;

        User::insert(UserActive {
            id: Set(uid),
            email: Set(account.email),
            full_name: Set(account.full_name.to_uppercase()),
            role: Set(role),
            phone_number: Set(account.phone_number),
            varsity_id: Set(varsity_id),
            session: Set(session),
            gender: Set(gender),
            password_hash: Set(account.password_hash),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;
        Ok(uid)
    }

    /// Soft-disable or re-enable an account. A disabled account fails login,
    /// token refresh, and every bearer-authenticated request.
    pub async fn set_account_active(&self, user_id: Uuid, active: bool) -> Result<(), AppError> {
        let user = self.get_user_by_id(&user_id).await?;
        let mut am: UserActive = user.into();
        am.is_active = Set(active);
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await?;
        Ok(())
    }

    /// Partial self-update. Changed unique columns are re-checked against
    /// everyone else before the write.
    pub async fn update_account(
        &self,
        user_id: Uuid,
        patch: AccountPatch,
    ) -> Result<UserModel, AppError> {
        let user = self.get_user_by_id(&user_id).await?;

        let mut errs = FieldErrors::new();
        if let Some(ref email) = patch.email {
            if self.column_taken(Column::Email, email, Some(user_id)).await? {
                errs.push("email", "A user with this email already exists.");
            }
        }
        if let Some(ref phone) = patch.phone_number {
            if self
                .column_taken(Column::PhoneNumber, phone, Some(user_id))
                .await?
            {
                errs.push("phone_number", "A user with this phone number already exists.");
            }
        }
        if let Some(ref varsity_id) = patch.varsity_id {
            if self
                .column_taken(Column::VarsityId, varsity_id, Some(user_id))
                .await?
            {
                errs.push("varsity_id", "A user with this varsity ID already exists.");
            }
        }
        errs.into_result()?;

        let mut am: UserActive = user.into();
        if let Some(email) = patch.email {
            am.email = Set(email);
        }
        if let Some(full_name) = patch.full_name {
            am.full_name = Set(full_name.to_uppercase());
        }
        if let Some(phone_number) = patch.phone_number {
            am.phone_number = Set(phone_number);
        }
        if let Some(varsity_id) = patch.varsity_id {
            am.varsity_id = Set(Some(varsity_id));
        }
        if let Some(session) = patch.session {
            am.session = Set(Some(session));
        }
        if let Some(gender) = patch.gender {
            am.gender = Set(Some(gender.to_string()));
        }
        if let Some(password_hash) = patch.password_hash {
            am.password_hash = Set(password_hash);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.db).await?)
    }
}
