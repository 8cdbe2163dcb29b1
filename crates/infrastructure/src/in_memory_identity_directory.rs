use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use guardpost_application::IdentityDirectory;
use guardpost_core::{AppResult, NonEmptyString};
use guardpost_domain::{AccountStatus, EmailAddress, Identity, Role, UserId, UserProfile};

const SEEDED_ACCOUNTS: [(u64, &str, &str, &str, &str, Role, AccountStatus); 7] = [
    (
        1,
        "Kwame Mensah",
        "superadmin@guardpost.local",
        "+233 20 111 0001",
        "super123",
        Role::SuperAdmin,
        AccountStatus::Active,
    ),
    (
        2,
        "Abena Owusu",
        "admin@guardpost.local",
        "+233 20 111 0002",
        "admin123",
        Role::Admin,
        AccountStatus::Active,
    ),
    (
        3,
        "Kofi Asante",
        "manager@guardpost.local",
        "+233 20 111 0003",
        "manager123",
        Role::Manager,
        AccountStatus::Active,
    ),
    (
        4,
        "Ama Boateng",
        "supervisor@guardpost.local",
        "+233 20 111 0004",
        "supervisor123",
        Role::Supervisor,
        AccountStatus::Active,
    ),
    (
        5,
        "Yaw Darko",
        "staff@guardpost.local",
        "+233 20 111 0005",
        "staff123",
        Role::Staff,
        AccountStatus::Active,
    ),
    (
        6,
        "Efua Addo",
        "accounts@guardpost.local",
        "+233 20 111 0006",
        "accounts123",
        Role::Accountant,
        AccountStatus::Active,
    ),
    (
        7,
        "Kojo Frimpong",
        "inactive@guardpost.local",
        "+233 20 111 0007",
        "inactive123",
        Role::Staff,
        AccountStatus::Inactive,
    ),
];

/// In-memory identity directory with an optional artificial lookup delay.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityDirectory {
    identities: Vec<Identity>,
    latency: Duration,
}

impl InMemoryIdentityDirectory {
    /// Creates a directory over the given identities.
    #[must_use]
    pub fn new(identities: Vec<Identity>) -> Self {
        Self {
            identities,
            latency: Duration::ZERO,
        }
    }

    /// Creates the built-in directory: one active account per role plus one inactive account.
    pub fn seeded() -> AppResult<Self> {
        let seeded_at = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);

        let identities = SEEDED_ACCOUNTS
            .iter()
            .map(|(id, name, email, phone, secret, role, status)| -> AppResult<Identity> {
                let profile = UserProfile::new(
                    UserId::new(*id),
                    NonEmptyString::new(*name)?,
                    EmailAddress::new(*email)?,
                    *phone,
                    *role,
                    *status,
                    seeded_at,
                    seeded_at,
                );
                Ok(Identity::new(profile, *secret))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self::new(identities))
    }

    /// Delays every lookup by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Returns every identity, inactive ones included.
    #[must_use]
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn find_by_credentials(
        &self,
        email: &str,
        secret: &str,
    ) -> AppResult<Option<Identity>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self
            .identities
            .iter()
            .find(|identity| identity.accepts(email, secret))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use guardpost_application::IdentityDirectory;
    use guardpost_domain::{AccountStatus, Role};

    use super::InMemoryIdentityDirectory;

    fn seeded() -> InMemoryIdentityDirectory {
        match InMemoryIdentityDirectory::seeded() {
            Ok(directory) => directory,
            Err(error) => panic!("seeded directory should build: {error}"),
        }
    }

    #[test]
    fn seeded_directory_covers_every_role() {
        let directory = seeded();
        for role in Role::all() {
            assert!(directory.identities().iter().any(|identity| {
                identity.profile().role() == *role
                    && identity.profile().status() == AccountStatus::Active
            }));
        }
    }

    #[tokio::test]
    async fn lookup_matches_exact_credentials() {
        let directory = seeded();

        let found = directory
            .find_by_credentials("manager@guardpost.local", "manager123")
            .await;
        assert!(matches!(
            found,
            Ok(Some(ref identity)) if identity.profile().role() == Role::Manager
        ));

        for (email, secret) in [
            ("Manager@guardpost.local", "manager123"),
            ("manager@guardpost.local", "Manager123"),
            ("manager@guardpost.local", "wrong"),
        ] {
            assert!(matches!(
                directory.find_by_credentials(email, secret).await,
                Ok(None)
            ));
        }
    }

    #[tokio::test]
    async fn inactive_accounts_cannot_sign_in() {
        let directory = seeded();
        assert!(matches!(
            directory
                .find_by_credentials("inactive@guardpost.local", "inactive123")
                .await,
            Ok(None)
        ));
    }

    #[tokio::test]
    async fn latency_delays_lookup() {
        let directory = seeded().with_latency(Duration::from_millis(20));
        let started = Instant::now();
        let _ = directory
            .find_by_credentials("staff@guardpost.local", "staff123")
            .await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
