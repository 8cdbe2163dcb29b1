use chrono::{TimeZone, Utc};
use guardpost_core::{NonEmptyString, SessionToken};

use super::{Session, SessionEvent, SessionState, transition};
use crate::{
    AccountStatus, EmailAddress, Permission, ProfilePatch, Role, RolePermissionRegistry, UserId,
    UserProfile,
};

fn admin_profile() -> UserProfile {
    let created_at = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .unwrap_or_default();
    let (Ok(name), Ok(email)) = (
        NonEmptyString::new("Kofi Boateng"),
        EmailAddress::new("admin@x.com"),
    ) else {
        panic!("fixture profile values should be valid");
    };
    UserProfile::new(
        UserId::new(1),
        name,
        email,
        "+233 24 111 2222",
        Role::Admin,
        AccountStatus::Active,
        created_at,
        created_at,
    )
}

fn scenario_registry() -> RolePermissionRegistry {
    RolePermissionRegistry::from_grants([(
        Role::Admin,
        [Permission::ViewDashboard, Permission::ViewGuards],
    )])
}

fn admin_session() -> Session {
    Session::establish(admin_profile(), SessionToken::issue(), &scenario_registry())
}

#[test]
fn established_permissions_match_registry() {
    let session = admin_session();
    assert_eq!(
        session.permissions(),
        scenario_registry().permissions_for(Role::Admin)
    );
    assert_eq!(session.role(), Role::Admin);
}

#[test]
fn role_without_grants_establishes_empty_permission_set() {
    let registry =
        RolePermissionRegistry::from_grants([(Role::Staff, [Permission::ViewDashboard])]);
    let session = Session::establish(admin_profile(), SessionToken::issue(), &registry);
    assert!(session.permissions().is_empty());
}

#[test]
fn initial_state_is_loading() {
    assert!(SessionState::default().is_loading());
}

#[test]
fn restore_resolves_loading_state() {
    let restored = transition(
        SessionState::Loading,
        SessionEvent::Restored(admin_session()),
    );
    assert!(restored.is_authenticated());

    let discarded = transition(SessionState::Loading, SessionEvent::RestoreFailed);
    assert_eq!(discarded, SessionState::Unauthenticated);
}

#[test]
fn restore_started_keeps_active_session() {
    let state = SessionState::Authenticated(admin_session());
    let next = transition(state.clone(), SessionEvent::RestoreStarted);
    assert_eq!(next, state);
}

#[test]
fn login_cycle_moves_through_loading() {
    let loading = transition(SessionState::Unauthenticated, SessionEvent::LoginStarted);
    assert!(loading.is_loading());

    let session = admin_session();
    let authenticated = transition(loading, SessionEvent::LoginSucceeded(session.clone()));
    assert_eq!(authenticated.session(), Some(&session));
}

#[test]
fn failed_login_returns_to_unauthenticated() {
    let loading = transition(
        SessionState::Authenticated(admin_session()),
        SessionEvent::LoginStarted,
    );
    let next = transition(loading, SessionEvent::LoginFailed);
    assert_eq!(next, SessionState::Unauthenticated);
}

#[test]
fn logout_always_unauthenticates() {
    for state in [
        SessionState::Unauthenticated,
        SessionState::Loading,
        SessionState::Authenticated(admin_session()),
    ] {
        assert_eq!(
            transition(state, SessionEvent::LoggedOut),
            SessionState::Unauthenticated
        );
    }
}

#[test]
fn profile_update_keeps_role_and_permissions() {
    let session = admin_session();
    let patch = ProfilePatch {
        name: NonEmptyString::new("X").ok(),
        ..ProfilePatch::default()
    };
    let at = Utc
        .with_ymd_and_hms(2024, 3, 2, 10, 0, 0)
        .single()
        .unwrap_or_default();

    let next = transition(
        SessionState::Authenticated(session.clone()),
        SessionEvent::ProfileUpdated {
            token: session.token().clone(),
            patch,
            at,
        },
    );

    let Some(updated) = next.session() else {
        panic!("profile update should keep the session");
    };
    assert_eq!(updated.user().name(), "X");
    assert_eq!(updated.user().email(), session.user().email());
    assert_eq!(updated.role(), session.role());
    assert_eq!(updated.permissions(), session.permissions());
    assert_eq!(updated.token(), session.token());
    assert_eq!(updated.user().updated_at(), at);
}

#[test]
fn profile_update_without_session_is_ignored() {
    let next = transition(
        SessionState::Unauthenticated,
        SessionEvent::ProfileUpdated {
            token: SessionToken::issue(),
            patch: ProfilePatch::default(),
            at: Utc::now(),
        },
    );
    assert_eq!(next, SessionState::Unauthenticated);
}

#[test]
fn profile_update_for_another_session_is_ignored() {
    let current = admin_session();
    let patch = ProfilePatch {
        name: NonEmptyString::new("Someone Else").ok(),
        ..ProfilePatch::default()
    };

    let next = transition(
        SessionState::Authenticated(current.clone()),
        SessionEvent::ProfileUpdated {
            token: SessionToken::issue(),
            patch,
            at: Utc::now(),
        },
    );

    assert_eq!(next, SessionState::Authenticated(current));
}
