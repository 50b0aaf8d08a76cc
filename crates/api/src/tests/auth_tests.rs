// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_roster_audit::{Action, AuditEvent, Target};
use shift_roster_domain::Role;
use shift_roster_persistence::Persistence;
use time::{Duration, OffsetDateTime};

use super::helpers::{bootstrap_manager, create_test_persistence, hire, ten_day_config};
use crate::{
    ApiError, AuthError, AuthenticatedActor, AuthenticationService, ChangePasswordRequest,
    EmployeeInfo, LoginRequest, LoginResponse, MAX_SESSION_HOURS, RosterConfig, change_password,
    login, logout, submit_leave, whoami,
};

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
    }
}

#[test]
fn test_login_issues_a_session_that_validates() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);
    let omar: AuthenticatedActor = hire(
        &mut persistence,
        &config,
        &manager,
        "omar",
        "operator",
        Some("B"),
        "2021-01-01",
    );

    let response: LoginResponse =
        login(&mut persistence, &config, login_request("omar", "secret")).unwrap();

    assert!(response.token.starts_with("session_"));
    assert_eq!(response.employee.id, omar.employee_id());
    assert_eq!(response.employee.role, "operator");
    assert_eq!(response.employee.shift.as_deref(), Some("B"));

    let resolved: AuthenticatedActor =
        AuthenticationService::validate_session(&mut persistence, &response.token).unwrap();
    assert_eq!(resolved, omar);
    assert_eq!(resolved.role(), Role::Operator);
}

#[test]
fn test_login_tokens_are_unique() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    bootstrap_manager(&mut persistence);

    let first: LoginResponse =
        login(&mut persistence, &config, login_request("admin", "admin123")).unwrap();
    let second: LoginResponse =
        login(&mut persistence, &config, login_request("admin", "admin123")).unwrap();

    assert_ne!(first.token, second.token);
}

#[test]
fn test_wrong_password_and_unknown_user_fail_alike() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    bootstrap_manager(&mut persistence);

    let wrong_password = login(&mut persistence, &config, login_request("admin", "nope"));
    let unknown_user = login(&mut persistence, &config, login_request("ghost", "admin123"));

    assert!(matches!(
        wrong_password,
        Err(ApiError::AuthenticationFailed { .. })
    ));
    assert_eq!(wrong_password, unknown_user);
}

#[test]
fn test_username_is_case_sensitive_at_login() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    bootstrap_manager(&mut persistence);

    let result = login(&mut persistence, &config, login_request("ADMIN", "admin123"));

    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[test]
fn test_login_requires_both_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();

    let result = login(
        &mut persistence,
        &config,
        LoginRequest {
            username: Some(String::from("admin")),
            password: None,
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "password"
    ));
}

#[test]
fn test_logout_invalidates_the_session() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);
    let response: LoginResponse =
        login(&mut persistence, &config, login_request("admin", "admin123")).unwrap();

    logout(&mut persistence, &response.token, &manager).unwrap();

    assert!(matches!(
        AuthenticationService::validate_session(&mut persistence, &response.token),
        Err(AuthError::AuthenticationFailed { .. })
    ));
    assert!(matches!(
        logout(&mut persistence, &response.token, &manager),
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_expired_session_is_rejected_and_purged_on_login() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);

    let expired_at: String = AuthenticationService::format_timestamp(
        OffsetDateTime::now_utc() - Duration::hours(1),
    )
    .unwrap();
    let event: AuditEvent = AuditEvent::new(
        manager.to_audit_actor(),
        Action::new(String::from("Login"), None),
        Target::new(String::from("employee"), Some(manager.name.clone())),
    );
    persistence
        .create_session("session_stale", manager.employee_id(), &expired_at, &event)
        .unwrap();

    assert_eq!(
        AuthenticationService::validate_session(&mut persistence, "session_stale"),
        Err(AuthError::AuthenticationFailed {
            reason: String::from("Session expired"),
        })
    );

    login(&mut persistence, &config, login_request("admin", "admin123")).unwrap();
    assert!(
        persistence
            .get_session_by_token("session_stale")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_session_lifetime_follows_config() {
    let mut persistence: Persistence = create_test_persistence();
    bootstrap_manager(&mut persistence);
    let config: RosterConfig = RosterConfig::new(36, 2);

    let before: OffsetDateTime = OffsetDateTime::now_utc();
    let response: LoginResponse =
        login(&mut persistence, &config, login_request("admin", "admin123")).unwrap();

    let expires_at: OffsetDateTime = OffsetDateTime::parse(
        &response.expires_at,
        &time::format_description::well_known::Iso8601::DEFAULT,
    )
    .unwrap();
    let lifetime: Duration = expires_at - before;
    assert!(lifetime > Duration::minutes(119));
    assert!(lifetime <= Duration::minutes(121));
}

#[test]
fn test_oversized_session_lifetime_is_capped() {
    let mut persistence: Persistence = create_test_persistence();
    bootstrap_manager(&mut persistence);
    let config: RosterConfig = RosterConfig::new(36, 100_000_000);

    let before: OffsetDateTime = OffsetDateTime::now_utc();
    let response: LoginResponse =
        login(&mut persistence, &config, login_request("admin", "admin123")).unwrap();

    let expires_at: OffsetDateTime = OffsetDateTime::parse(
        &response.expires_at,
        &time::format_description::well_known::Iso8601::DEFAULT,
    )
    .unwrap();
    assert!(expires_at - before <= Duration::hours(MAX_SESSION_HOURS) + Duration::minutes(1));
}

#[test]
fn test_unrepresentable_session_expiry_fails_without_session() {
    let mut persistence: Persistence = create_test_persistence();
    bootstrap_manager(&mut persistence);
    let config: RosterConfig = RosterConfig {
        session_duration: Duration::MAX,
        ..RosterConfig::default()
    };

    let result = login(&mut persistence, &config, login_request("admin", "admin123"));

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { ref reason }) if reason.contains("out of range")
    ));
    assert!(
        persistence
            .list_activity(10)
            .unwrap()
            .iter()
            .all(|e| e.action.name != "Login")
    );
}

#[test]
fn test_whoami_reports_live_balance() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = ten_day_config();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);
    let omar: AuthenticatedActor = hire(
        &mut persistence,
        &config,
        &manager,
        "omar",
        "operator",
        Some("A"),
        "2021-01-01",
    );
    let leave_id: i64 = submit_leave(
        &mut persistence,
        &omar,
        super::helpers::leave_request("2026-03-01", "2026-03-03"),
    )
    .unwrap()
    .id;
    crate::approve_leave(&mut persistence, &manager, leave_id).unwrap();

    let info: EmployeeInfo = whoami(&mut persistence, &omar).unwrap();

    assert_eq!(info.username, "omar");
    assert_eq!(info.annual_leave_balance, 7);
}

#[test]
fn test_change_password_requires_current_password() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);

    let result = change_password(
        &mut persistence,
        &manager,
        ChangePasswordRequest {
            current_password: Some(String::from("wrong")),
            new_password: Some(String::from("hunter2")),
        },
    );
    assert_eq!(
        result,
        Err(ApiError::AuthenticationFailed {
            reason: String::from("Current password is incorrect"),
        })
    );

    // The old password still works.
    assert!(login(&mut persistence, &config, login_request("admin", "admin123")).is_ok());
}

#[test]
fn test_change_password_enforces_minimum_length() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);

    let result = change_password(
        &mut persistence,
        &manager,
        ChangePasswordRequest {
            current_password: Some(String::from("admin123")),
            new_password: Some(String::from("abc")),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
}

#[test]
fn test_change_password_requires_both_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);

    let result = change_password(
        &mut persistence,
        &manager,
        ChangePasswordRequest {
            current_password: None,
            new_password: Some(String::from("hunter2")),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "current_password"
    ));
}

#[test]
fn test_change_password_replaces_credentials() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);

    change_password(
        &mut persistence,
        &manager,
        ChangePasswordRequest {
            current_password: Some(String::from("admin123")),
            new_password: Some(String::from("hunter2")),
        },
    )
    .unwrap();

    assert!(login(&mut persistence, &config, login_request("admin", "admin123")).is_err());
    assert!(login(&mut persistence, &config, login_request("admin", "hunter2")).is_ok());

    let actions: Vec<String> = persistence
        .list_activity(10)
        .unwrap()
        .into_iter()
        .map(|e| e.action.name)
        .collect();
    assert_eq!(actions, vec!["Login", "ChangePassword"]);
}

#[test]
fn test_session_of_deleted_employee_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);
    let omar: AuthenticatedActor = hire(
        &mut persistence,
        &config,
        &manager,
        "omar",
        "operator",
        Some("A"),
        "2021-01-01",
    );
    let response: LoginResponse =
        login(&mut persistence, &config, login_request("omar", "secret")).unwrap();

    crate::delete_employee(&mut persistence, &manager, omar.employee_id()).unwrap();

    assert!(
        AuthenticationService::validate_session(&mut persistence, &response.token).is_err()
    );
}
