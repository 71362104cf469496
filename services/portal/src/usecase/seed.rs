use tracing::info;

use drl_domain::role::Role;

use crate::domain::repository::{AccountRepository, ActivityRepository, PasswordHasher};
use crate::domain::types::{ActivityOrder, NewAccount, NewActivity};
use crate::error::PortalError;

struct DemoAccount {
    username: &'static str,
    password: &'static str,
    fullname: &'static str,
    role: Role,
    student_id: Option<&'static str>,
    class_name: Option<&'static str>,
}

const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        username: "admin",
        password: "admin123",
        fullname: "Quản trị",
        role: Role::Admin,
        student_id: None,
        class_name: None,
    },
    DemoAccount {
        username: "teacher1",
        password: "teach123",
        fullname: "Giáo viên 1",
        role: Role::Teacher,
        student_id: None,
        class_name: None,
    },
    DemoAccount {
        username: "sv01",
        password: "sv123",
        fullname: "Nguyễn Văn A",
        role: Role::Student,
        student_id: Some("SV001"),
        class_name: Some("CNTT1"),
    },
];

fn demo_activities() -> [NewActivity; 2] {
    [
        NewActivity {
            name: "Tình nguyện dọn rác".to_owned(),
            description: "Hoạt động dọn rác khuôn viên".to_owned(),
            date: "2025-10-20".to_owned(),
            max_score: 10,
        },
        NewActivity {
            name: "Workshop kỹ năng".to_owned(),
            description: "Kỹ năng mềm cho SV".to_owned(),
            date: "2025-11-05".to_owned(),
            max_score: 8,
        },
    ]
}

/// What a seed run inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub accounts: Vec<String>,
    pub activities: usize,
}

/// Insert the demo accounts that are missing, and the demo activities when
/// the catalog is empty. Safe to run repeatedly.
pub struct SeedUseCase<U: AccountRepository, A: ActivityRepository, H: PasswordHasher> {
    pub accounts: U,
    pub activities: A,
    pub hasher: H,
}

impl<U, A, H> SeedUseCase<U, A, H>
where
    U: AccountRepository,
    A: ActivityRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self) -> Result<SeedSummary, PortalError> {
        let mut summary = SeedSummary::default();

        for demo in &DEMO_ACCOUNTS {
            if self.accounts.find_by_username(demo.username).await?.is_some() {
                continue;
            }
            self.accounts
                .create(&NewAccount {
                    username: demo.username.to_owned(),
                    fullname: demo.fullname.to_owned(),
                    password_hash: self.hasher.hash(demo.password).await?,
                    role: demo.role,
                    student_id: demo.student_id.map(str::to_owned),
                    class_name: demo.class_name.map(str::to_owned),
                })
                .await?;
            summary.accounts.push(demo.username.to_owned());
        }

        if self.activities.list(ActivityOrder::CreatedDesc).await?.is_empty() {
            for activity in demo_activities() {
                self.activities.create(&activity).await?;
                summary.activities += 1;
            }
        }

        info!(
            accounts = ?summary.accounts,
            activities = summary.activities,
            "seed complete"
        );
        Ok(summary)
    }
}
