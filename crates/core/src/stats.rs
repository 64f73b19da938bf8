//! Derived statistics over in-memory lists.
//!
//! Pure recomputation: nothing here is persisted. The client stores call
//! these after every mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dto::assessment::Attempt;
use crate::dto::content::ContentItem;
use crate::dto::course::Course;
use crate::dto::user::User;
use crate::dto::{ContentType, PublishStatus, UserStatus};
use crate::roles::Role;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub admins: usize,
    pub instructors: usize,
    pub students: usize,
    pub committee_testers: usize,
    /// Users per level; users without a level are not counted.
    pub by_level: BTreeMap<String, usize>,
}

pub fn user_stats(users: &[User]) -> UserStats {
    let mut stats = UserStats {
        total: users.len(),
        ..UserStats::default()
    };
    for user in users {
        if user.status == UserStatus::Active {
            stats.active += 1;
        }
        match user.role {
            Role::Admin => stats.admins += 1,
            Role::Instructor => stats.instructors += 1,
            Role::Student => stats.students += 1,
            Role::CommitteeTester => stats.committee_testers += 1,
        }
        if let Some(level) = &user.level {
            *stats.by_level.entry(level.clone()).or_default() += 1;
        }
    }
    stats
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub archived: usize,
    pub total_students: i64,
    /// Mean rating over courses with a non-zero rating.
    pub average_rating: f64,
    /// Sum of `price * students`.
    pub revenue: f64,
}

pub fn course_stats(courses: &[Course]) -> CourseStats {
    let mut stats = CourseStats {
        total: courses.len(),
        ..CourseStats::default()
    };
    let mut rated = 0usize;
    let mut rating_sum = 0.0;
    for course in courses {
        match course.status {
            PublishStatus::Published => stats.published += 1,
            PublishStatus::Draft => stats.drafts += 1,
            PublishStatus::Archived => stats.archived += 1,
        }
        stats.total_students += i64::from(course.students);
        stats.revenue += course.price * f64::from(course.students);
        if course.rating > 0.0 {
            rated += 1;
            rating_sum += course.rating;
        }
    }
    if rated > 0 {
        stats.average_rating = rating_sum / rated as f64;
    }
    stats
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStats {
    pub total: usize,
    pub videos: usize,
    pub files: usize,
    pub pages: usize,
    pub published: usize,
    pub total_views: i64,
    pub youtube_links: usize,
}

pub fn content_stats(items: &[ContentItem]) -> ContentStats {
    let mut stats = ContentStats {
        total: items.len(),
        ..ContentStats::default()
    };
    for item in items {
        match item.content_type {
            ContentType::Video => stats.videos += 1,
            ContentType::File => stats.files += 1,
            ContentType::Page => stats.pages += 1,
        }
        if item.status == PublishStatus::Published {
            stats.published += 1;
        }
        stats.total_views += i64::from(item.views);
        stats.youtube_links += item.youtube_links.len();
    }
    stats
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptStats {
    pub attempts: usize,
    pub passed: usize,
    pub average_score: f64,
    pub best_score: f64,
    /// Fraction of attempts that passed, `0.0..=1.0`.
    pub pass_rate: f64,
}

pub fn attempt_stats(attempts: &[Attempt]) -> AttemptStats {
    if attempts.is_empty() {
        return AttemptStats::default();
    }
    let n = attempts.len();
    let passed = attempts.iter().filter(|a| a.passed).count();
    let sum: f64 = attempts.iter().map(|a| a.score).sum();
    let best = attempts.iter().map(|a| a.score).fold(0.0, f64::max);
    AttemptStats {
        attempts: n,
        passed,
        average_score: sum / n as f64,
        best_score: best,
        pass_rate: passed as f64 / n as f64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(role: Role, status: UserStatus, level: Option<&str>) -> User {
        User {
            id: 1,
            name: "A".into(),
            email: "a@example.com".into(),
            role,
            level: level.map(str::to_string),
            status,
            phone: None,
            avatar: None,
            bio: None,
            last_active: None,
            join_date: Utc::now(),
        }
    }

    fn course(status: PublishStatus, students: i32, rating: f64, price: f64) -> Course {
        Course {
            id: 1,
            title: "C".into(),
            description: None,
            instructor: None,
            instructor_id: None,
            category: None,
            level: None,
            duration: 0,
            students,
            rating,
            price,
            status,
            thumbnail: None,
            youtube_links: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn attempt(score: f64, passed: bool) -> Attempt {
        Attempt {
            id: 1,
            assessment_id: 1,
            user_id: 1,
            user: None,
            answers: Vec::new(),
            correct: 0,
            wrong: 0,
            unanswered: 0,
            total: 0,
            score,
            passed,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn users_by_role_and_level() {
        let users = [
            user(Role::Student, UserStatus::Active, Some("Foundation")),
            user(Role::Student, UserStatus::Inactive, Some("Foundation")),
            user(Role::Instructor, UserStatus::Active, None),
            user(Role::CommitteeTester, UserStatus::Active, Some("Advanced")),
        ];
        let stats = user_stats(&users);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.students, 2);
        assert_eq!(stats.instructors, 1);
        assert_eq!(stats.committee_testers, 1);
        assert_eq!(stats.admins, 0);
        assert_eq!(stats.by_level.get("Foundation"), Some(&2));
        assert_eq!(stats.by_level.get("Advanced"), Some(&1));
    }

    #[test]
    fn course_rating_ignores_unrated() {
        let courses = [
            course(PublishStatus::Published, 10, 4.0, 20.0),
            course(PublishStatus::Published, 5, 5.0, 0.0),
            course(PublishStatus::Draft, 0, 0.0, 99.0),
        ];
        let stats = course_stats(&courses);
        assert_eq!(stats.published, 2);
        assert_eq!(stats.drafts, 1);
        assert_eq!(stats.total_students, 15);
        assert_eq!(stats.average_rating, 4.5);
        assert_eq!(stats.revenue, 200.0);
    }

    #[test]
    fn empty_lists_are_all_zero() {
        assert_eq!(course_stats(&[]), CourseStats::default());
        assert_eq!(user_stats(&[]), UserStats::default());
        assert_eq!(content_stats(&[]), ContentStats::default());
        assert_eq!(attempt_stats(&[]), AttemptStats::default());
    }

    #[test]
    fn attempt_pass_rate() {
        let stats = attempt_stats(&[attempt(75.0, true), attempt(25.0, false)]);
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.average_score, 50.0);
        assert_eq!(stats.best_score, 75.0);
        assert_eq!(stats.pass_rate, 0.5);
    }
}
