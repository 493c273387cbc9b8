//! Account management: registration, login, self-service maintenance and the
//! admin-only user operations. Role enforcement for the admin operations
//! happens in the routing layer; these functions trust their caller.

use uuid::Uuid;

use crate::{
    auth,
    dao::models::{Role, UserEntity, UserUpdate},
    dto::{
        user::{
            AdminCreateUserRequest, LoginRequest, LoginResponse, RegisterRequest,
            SearchUserRequest, UpdateUserRequest, UserResponse, UsersResponse,
        },
        validation,
    },
    error::ServiceError,
    state::SharedState,
};

/// Create a regular account from a registration payload.
pub async fn register(
    state: &SharedState,
    request: RegisterRequest,
) -> Result<UserResponse, ServiceError> {
    let store = state.require_store().await?;

    if store
        .find_user_by_username(request.username.clone())
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict("username already taken".into()));
    }

    let password = hash_password(&request.password)?;
    let user = UserEntity {
        id: Uuid::new_v4(),
        name: request.name,
        surname: request.surname,
        username: request.username,
        email: request.email,
        password,
        role: Role::User,
    };

    store.save_user(user.clone()).await?;

    Ok(UserResponse {
        message: Some("user registered successfully".into()),
        user: user.into(),
    })
}

/// Exchange credentials for a session token.
pub async fn login(
    state: &SharedState,
    request: LoginRequest,
) -> Result<LoginResponse, ServiceError> {
    let store = state.require_store().await?;

    let Some(user) = store
        .find_user_by_username(request.username.clone())
        .await?
    else {
        return Err(ServiceError::Unauthorized("invalid credentials".into()));
    };

    // Hash corruption reads as a mismatch.
    let valid = auth::verify_password(&request.password, &user.password).unwrap_or(false);
    if !valid {
        return Err(ServiceError::Unauthorized("invalid credentials".into()));
    }

    let token = auth::issue_token(
        state.config().jwt_secret.as_bytes(),
        state.config().token_ttl,
        &user,
    )
    .map_err(|err| ServiceError::Internal(format!("failed to issue session token: {err}")))?;

    Ok(LoginResponse {
        message: Some("login successful".into()),
        token,
    })
}

/// Fetch one account by id.
pub async fn get_user(state: &SharedState, id: Uuid) -> Result<UserResponse, ServiceError> {
    let store = state.require_store().await?;

    let user = store
        .find_user(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("user not found".into()))?;

    Ok(UserResponse {
        message: None,
        user: user.into(),
    })
}

/// Update the calling account. Rejects attempts to touch somebody else's
/// account, the password or the role.
pub async fn update_user(
    state: &SharedState,
    acting: Uuid,
    id: Uuid,
    request: UpdateUserRequest,
) -> Result<UserResponse, ServiceError> {
    if acting != id {
        return Err(ServiceError::Forbidden(
            "you can only modify your own account".into(),
        ));
    }

    check_update(&request, false)?;
    apply_user_update(state, id, request, false).await
}

/// Delete the calling account.
pub async fn delete_user(
    state: &SharedState,
    acting: Uuid,
    id: Uuid,
) -> Result<UserResponse, ServiceError> {
    if acting != id {
        return Err(ServiceError::Forbidden(
            "you can only delete your own account".into(),
        ));
    }

    let store = state.require_store().await?;
    let user = store
        .delete_user(id)
        .await?
        .ok_or_else(|| ServiceError::UpdateFailed("user not found or already deleted".into()))?;

    Ok(UserResponse {
        message: Some("user deleted successfully".into()),
        user: user.into(),
    })
}

/// List every account.
pub async fn admin_list_users(state: &SharedState) -> Result<UsersResponse, ServiceError> {
    let store = state.require_store().await?;

    let users = store.list_users().await?;
    if users.is_empty() {
        return Err(ServiceError::NotFound("users not found".into()));
    }

    Ok(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    })
}

/// Find one account by its login name.
pub async fn admin_search_user(
    state: &SharedState,
    request: SearchUserRequest,
) -> Result<UserResponse, ServiceError> {
    let store = state.require_store().await?;

    let user = store
        .find_user_by_username(request.username)
        .await?
        .ok_or_else(|| ServiceError::NotFound("user not found".into()))?;

    Ok(UserResponse {
        message: None,
        user: user.into(),
    })
}

/// Create an account with an arbitrary role.
pub async fn admin_create_user(
    state: &SharedState,
    request: AdminCreateUserRequest,
) -> Result<UserResponse, ServiceError> {
    let store = state.require_store().await?;

    if store
        .find_user_by_username(request.username.clone())
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict("username already taken".into()));
    }

    let password = hash_password(&request.password)?;
    let user = UserEntity {
        id: Uuid::new_v4(),
        name: request.name,
        surname: request.surname,
        username: request.username,
        email: request.email,
        password,
        role: request.role.unwrap_or_default(),
    };

    store.save_user(user.clone()).await?;

    Ok(UserResponse {
        message: Some("user created successfully".into()),
        user: user.into(),
    })
}

/// Update any account, role changes included. The password still cannot be
/// rewritten through this path.
pub async fn admin_update_user(
    state: &SharedState,
    id: Uuid,
    request: UpdateUserRequest,
) -> Result<UserResponse, ServiceError> {
    check_update(&request, true)?;
    apply_user_update(state, id, request, true).await
}

/// Delete any account.
pub async fn admin_delete_user(state: &SharedState, id: Uuid) -> Result<UserResponse, ServiceError> {
    let store = state.require_store().await?;

    let user = store
        .delete_user(id)
        .await?
        .ok_or_else(|| ServiceError::UpdateFailed("user not found or already deleted".into()))?;

    Ok(UserResponse {
        message: Some("user deleted successfully".into()),
        user: user.into(),
    })
}

async fn apply_user_update(
    state: &SharedState,
    id: Uuid,
    request: UpdateUserRequest,
    allow_role: bool,
) -> Result<UserResponse, ServiceError> {
    let store = state.require_store().await?;

    if let Some(username) = &request.username {
        let taken = store
            .find_user_by_username(username.clone())
            .await?
            .is_some_and(|existing| existing.id != id);
        if taken {
            return Err(ServiceError::Conflict("username already taken".into()));
        }
    }

    let update = UserUpdate {
        name: request.name,
        surname: request.surname,
        username: request.username,
        email: request.email,
        role: if allow_role { request.role } else { None },
    };

    let user = store
        .update_user(id, update)
        .await?
        .ok_or_else(|| ServiceError::UpdateFailed("user not found or not updated".into()))?;

    Ok(UserResponse {
        message: Some("user updated successfully".into()),
        user: user.into(),
    })
}

/// Shared screening for account updates: the password never travels through
/// this route, the role only on the admin path, present fields must not be
/// blank and at least one field must remain.
fn check_update(request: &UpdateUserRequest, allow_role: bool) -> Result<(), ServiceError> {
    if request.password.is_some() {
        return Err(ServiceError::Validation(
            "the password cannot be updated through this route".into(),
        ));
    }

    if !allow_role && request.role.is_some() {
        return Err(ServiceError::Validation(
            "the role cannot be updated through this route".into(),
        ));
    }

    if validation::any_blank([
        &request.name,
        &request.surname,
        &request.username,
        &request.email,
    ]) {
        return Err(ServiceError::Validation(
            "empty values are not allowed".into(),
        ));
    }

    let nothing_to_change = request.name.is_none()
        && request.surname.is_none()
        && request.username.is_none()
        && request.email.is_none()
        && (!allow_role || request.role.is_none());
    if nothing_to_change {
        return Err(ServiceError::Validation("no fields to update".into()));
    }

    Ok(())
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    auth::hash_password(password)
        .map_err(|err| ServiceError::Internal(format!("password hashing failed: {err}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::entity_store::memory::MemoryStore,
        state::{AppState, SharedState},
    };

    async fn state_with_store() -> SharedState {
        let state = AppState::new(AppConfig::default());
        let store = Arc::new(MemoryStore::new());
        state.install_store(store).await;
        state
    }

    fn registration(username: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            username: username.into(),
            email: format!("{username}@example.com"),
            password: "s3cret".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let state = state_with_store().await;

        let registered = register(&state, registration("ada")).await.unwrap();
        assert_eq!(registered.user.role, Role::User);

        let login_response = login(
            &state,
            LoginRequest {
                username: "ada".into(),
                password: "s3cret".into(),
            },
        )
        .await
        .unwrap();
        assert!(!login_response.token.is_empty());
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let state = state_with_store().await;

        register(&state, registration("ada")).await.unwrap();
        let err = register(&state, registration("ada")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let state = state_with_store().await;
        register(&state, registration("ada")).await.unwrap();

        let err = login(
            &state,
            LoginRequest {
                username: "ada".into(),
                password: "nope".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn accounts_can_only_modify_themselves() {
        let state = state_with_store().await;
        let registered = register(&state, registration("ada")).await.unwrap();

        let err = update_user(
            &state,
            Uuid::new_v4(),
            registered.user.id,
            UpdateUserRequest {
                name: Some("Eve".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = delete_user(&state, Uuid::new_v4(), registered.user.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn self_service_update_rejects_password_and_role() {
        let state = state_with_store().await;
        let registered = register(&state, registration("ada")).await.unwrap();
        let id = registered.user.id;

        let err = update_user(
            &state,
            id,
            id,
            UpdateUserRequest {
                password: Some("new".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = update_user(
            &state,
            id,
            id,
            UpdateUserRequest {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn self_service_update_changes_the_stored_account() {
        let state = state_with_store().await;
        let registered = register(&state, registration("ada")).await.unwrap();
        let id = registered.user.id;

        let updated = update_user(
            &state,
            id,
            id,
            UpdateUserRequest {
                email: Some("ada@maths.org".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.user.email, "ada@maths.org");

        let fetched = get_user(&state, id).await.unwrap();
        assert_eq!(fetched.user.email, "ada@maths.org");
    }

    #[tokio::test]
    async fn admin_update_may_change_the_role() {
        let state = state_with_store().await;
        let registered = register(&state, registration("ada")).await.unwrap();

        let promoted = admin_update_user(
            &state,
            registered.user.id,
            UpdateUserRequest {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(promoted.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn updates_with_nothing_to_change_are_rejected() {
        let state = state_with_store().await;
        let registered = register(&state, registration("ada")).await.unwrap();
        let id = registered.user.id;

        let err = update_user(&state, id, id, UpdateUserRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = update_user(
            &state,
            id,
            id,
            UpdateUserRequest {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn admin_listing_reports_an_empty_store() {
        let state = state_with_store().await;

        let err = admin_list_users(&state).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
