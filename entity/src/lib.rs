pub mod exam_registration;
pub mod revoked_token;
pub mod user;

/*
 Two roles share the user table: students carry varsity_id/session/gender,
 teachers carry none of them. The role column gates which set is allowed and
 that rule is enforced in the service layer, not here.
 An exam registration belongs to exactly one user (unique index on user_id)
 and snapshots the user's display fields every time it is written.
 */
