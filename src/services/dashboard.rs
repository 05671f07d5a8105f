use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::api::ResourceApi;
use crate::error::AppError;
use crate::models::{Category, Course, Enrollment, Resource, User, UserProfile};
use crate::session::SessionStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub courses: usize,
    pub categories: usize,
    pub enrollments: usize,
    pub users: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub user: UserProfile,
    pub stats: DashboardStats,
}

pub struct DashboardService {
    courses: Arc<dyn ResourceApi<Course>>,
    categories: Arc<dyn ResourceApi<Category>>,
    enrollments: Arc<dyn ResourceApi<Enrollment>>,
    users: Arc<dyn ResourceApi<User>>,
    session: Arc<dyn SessionStore>,
}

impl DashboardService {
    pub fn new(
        courses: Arc<dyn ResourceApi<Course>>,
        categories: Arc<dyn ResourceApi<Category>>,
        enrollments: Arc<dyn ResourceApi<Enrollment>>,
        users: Arc<dyn ResourceApi<User>>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            courses,
            categories,
            enrollments,
            users,
            session,
        }
    }

    pub async fn load(&self) -> Result<Dashboard, AppError> {
        let session = self
            .session
            .load()?
            .filter(|s| !s.token.is_empty())
            .ok_or(AppError::MissingToken)?;

        let (courses, categories, enrollments, users) = tokio::join!(
            self.courses.list(),
            self.categories.list(),
            self.enrollments.list(),
            self.users.list(),
        );

        let stats = DashboardStats {
            courses: count_or_zero::<Course>(courses),
            categories: count_or_zero::<Category>(categories),
            enrollments: count_or_zero::<Enrollment>(enrollments),
            users: count_or_zero::<User>(users),
        };
        info!("Dashboard loaded: {:?}", stats);

        Ok(Dashboard {
            user: session.user,
            stats,
        })
    }
}

fn count_or_zero<R: Resource>(result: Result<Vec<R>, AppError>) -> usize {
    match result {
        Ok(records) => records.len(),
        Err(e) => {
            warn!("Failed to count {}: {}", R::TITLE, e);
            0
        }
    }
}
